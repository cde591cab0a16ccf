use crate::server::types::ApiResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;

/// Error types for task route handlers, each mapping to a client-visible
/// HTTP status.
#[derive(Error, Debug)]
pub enum TaskRouteError {
    #[error("Invalid task id: {0}")]
    InvalidId(String),

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Payload of {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("Unsupported media type")]
    UnsupportedMediaType,

    #[error("Submission failed: {0}")]
    SubmissionFailed(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for TaskRouteError {
    fn into_response(self) -> Response {
        let status = match &self {
            TaskRouteError::InvalidId(_) => StatusCode::BAD_REQUEST,
            TaskRouteError::NotFound(_) => StatusCode::NOT_FOUND,
            TaskRouteError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            TaskRouteError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            TaskRouteError::SubmissionFailed(_) | TaskRouteError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(ApiResponse::<()>::error(self.to_string()))).into_response()
    }
}
