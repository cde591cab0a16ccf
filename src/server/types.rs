use crate::server::error::TaskRouteError;
use crate::types::task::{Prediction, TaskRecord, TaskStatus};
use axum::response::Response;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Path parameter carrying a task id as received from the URL.
#[derive(Deserialize)]
pub struct TaskId {
    pub id: String,
}

/// Standardized API response envelope shared by all routes.
#[derive(Serialize, Deserialize, Debug)]
pub struct ApiResponse<T = ()> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse<()> {
    pub fn error(message: String) -> Self {
        Self { success: false, data: None, message: Some(message) }
    }

    pub fn success(message: Option<String>) -> Self {
        Self { success: true, data: None, message }
    }
}

impl<T> ApiResponse<T> {
    pub fn success_with_data(data: T, message: Option<String>) -> Self {
        Self { success: true, data: Some(data), message }
    }
}

/// Type alias for the result type used in task route handlers.
pub type TaskRouteResult = Result<Response<axum::body::Body>, TaskRouteError>;

/// Body of a successful submission: the id the client will poll with.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SubmitTaskResponse {
    pub id: Uuid,
}

/// Client view of a task record. `image_key` stays internal.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TaskStatusResponse {
    pub id: Uuid,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Vec<Prediction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TaskRecord> for TaskStatusResponse {
    fn from(record: TaskRecord) -> Self {
        Self {
            id: record.id,
            status: record.status,
            result: record.result,
            error: record.error,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
