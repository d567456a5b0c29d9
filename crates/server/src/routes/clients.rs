use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;

use service::db::client_service::{self, ClientOverview, ClientPatch, NewClient};

use crate::errors::ApiError;
use crate::state::ServerState;

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<ClientOverview>>, ApiError> {
    Ok(Json(client_service::list_clients(&state.db).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<NewClient>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let id = client_service::create_client(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(patch): Json<ClientPatch>,
) -> Result<Json<serde_json::Value>, ApiError> {
    client_service::update_client(&state.db, id, patch).await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    client_service::delete_client(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
