use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use tracing::{error, info, instrument};
use uuid::Uuid;

use super::super::error::TaskRouteError;
use super::super::types::{ApiResponse, SubmitTaskResponse, TaskId, TaskRouteResult, TaskStatusResponse};
use crate::config::Config;
use crate::error::task::TaskError;
use crate::worker::event_handler::service::TaskHandlerService;

/// Handles task submissions: the binary image body is validated, persisted
/// and queued; the response returns the id the client polls with. Never
/// waits for classification.
#[instrument(skip(config, body), fields(payload_size = body.len()))]
async fn handle_submit_task_request(State(config): State<Arc<Config>>, body: Bytes) -> TaskRouteResult {
    match TaskHandlerService::submit_task(body, config).await {
        Ok(record) => {
            info!(task_id = %record.id, "Task submitted");
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse::success_with_data(SubmitTaskResponse { id: record.id }, None)),
            )
                .into_response())
        }
        Err(e) => {
            error!(error = %e, "Task submission rejected");
            Err(submission_error(e))
        }
    }
}

/// Read-only status lookup by task id.
#[instrument(skip(config), fields(task_id = %id))]
async fn handle_get_task_request(Path(TaskId { id }): Path<TaskId>, State(config): State<Arc<Config>>) -> TaskRouteResult {
    let task_id = Uuid::parse_str(&id).map_err(|_| TaskRouteError::InvalidId(id.clone()))?;

    match TaskHandlerService::get_task(task_id, config).await {
        Ok(Some(record)) => {
            Ok(Json(ApiResponse::success_with_data(TaskStatusResponse::from(record), None)).into_response())
        }
        Ok(None) => Err(TaskRouteError::NotFound(id)),
        Err(e) => {
            error!(error = %e, "Failed to fetch task status");
            Err(TaskRouteError::InternalError(e.to_string()))
        }
    }
}

fn submission_error(error: TaskError) -> TaskRouteError {
    match error {
        TaskError::PayloadTooLarge { size, limit } => TaskRouteError::PayloadTooLarge { size, limit },
        TaskError::EmptyPayload | TaskError::UnsupportedImageFormat => TaskRouteError::UnsupportedMediaType,
        other => TaskRouteError::SubmissionFailed(other.to_string()),
    }
}

/// Creates the router for task endpoints: submission and status lookup.
pub(super) fn task_router(config: Arc<Config>) -> Router {
    // The axum body cap sits above the service-level limit so oversized
    // payloads reach the handler and get the 413 from validation.
    let body_limit = config.service_params().max_payload_bytes + 1024;
    Router::new()
        .route("/", post(handle_submit_task_request))
        .route("/:id", get(handle_get_task_request))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(config)
}
