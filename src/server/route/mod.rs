use crate::config::Config;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tasks::task_router;

pub(super) mod tasks;

/// Fallback for routes nothing else matched.
pub async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "The requested resource was not found")
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub(crate) fn server_router(config: Arc<Config>) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/tasks", task_router(config))
        .fallback(handler_404)
}
