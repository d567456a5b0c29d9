use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;

use service::db::payment_service::{self, PaymentUpdate};

use crate::errors::ApiError;
use crate::state::ServerState;

/// 404 when the client has no payment record; the API's only not-found case.
pub async fn update(
    State(state): State<ServerState>,
    Path(client_id): Path<i64>,
    Json(input): Json<PaymentUpdate>,
) -> Result<Json<serde_json::Value>, ApiError> {
    payment_service::update_payment(&state.db, client_id, input).await?;
    Ok(Json(json!({ "success": true })))
}
