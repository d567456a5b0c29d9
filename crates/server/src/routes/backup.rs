use axum::{extract::State, Json};
use serde_json::json;

use service::db::backup_service::{self, BackupDocument};

use crate::errors::ApiError;
use crate::state::ServerState;

pub async fn export(State(state): State<ServerState>) -> Result<Json<BackupDocument>, ApiError> {
    Ok(Json(backup_service::export_backup(&state.db).await?))
}

pub async fn restore(
    State(state): State<ServerState>,
    Json(doc): Json<BackupDocument>,
) -> Result<Json<serde_json::Value>, ApiError> {
    backup_service::restore_backup(&state.db, doc).await?;
    Ok(Json(json!({ "success": true })))
}
