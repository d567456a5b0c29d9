use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use service::db::task_service::{self, NewTask, TaskRow};

use crate::errors::ApiError;
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    #[serde(rename = "clientId")]
    pub client_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<Vec<TaskRow>>, ApiError> {
    Ok(Json(task_service::list_tasks(&state.db, query.client_id).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<NewTask>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let id = task_service::create_task(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(input): Json<StatusUpdate>,
) -> Result<Json<serde_json::Value>, ApiError> {
    task_service::update_task_status(&state.db, id, input.status).await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    task_service::delete_task(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
