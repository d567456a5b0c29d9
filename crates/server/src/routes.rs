use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::ServerState;

pub mod backup;
pub mod clients;
pub mod payments;
pub mod reports;
pub mod tasks;

/// Build the full application router: JSON API plus the static front-end.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let static_dir = ServeDir::new("frontend").fallback(ServeFile::new("frontend/index.html"));

    let api = Router::new()
        .route("/api/health", get(reports::health))
        .route("/api/stats", get(reports::stats))
        .route("/api/clients", get(clients::list).post(clients::create))
        .route("/api/clients/:id", patch(clients::update).delete(clients::delete))
        .route("/api/tasks", get(tasks::list).post(tasks::create))
        .route("/api/tasks/:id", patch(tasks::update_status).delete(tasks::delete))
        .route("/api/payments/:client_id", patch(payments::update))
        .route("/api/transactions", get(reports::transactions))
        .route("/api/backup", get(backup::export))
        .route("/api/restore", post(backup::restore))
        .with_state(state);

    Router::new()
        .nest_service("/", static_dir)
        .merge(api)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
