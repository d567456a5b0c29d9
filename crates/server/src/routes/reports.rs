use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use service::db::report_service::{self, LedgerEntry, Stats};

use crate::errors::ApiError;
use crate::state::ServerState;

/// Health keeps its own error shape: `{status:"error", message}` rather than
/// the usual `{error}` envelope.
pub async fn health(State(state): State<ServerState>) -> Response {
    match report_service::health(&state.db).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "status": "error", "message": e.to_string() })),
        )
            .into_response(),
    }
}

pub async fn stats(State(state): State<ServerState>) -> Result<Json<Stats>, ApiError> {
    Ok(Json(report_service::stats(&state.db).await?))
}

pub async fn transactions(
    State(state): State<ServerState>,
) -> Result<Json<Vec<LedgerEntry>>, ApiError> {
    Ok(Json(report_service::list_transactions(&state.db).await?))
}
