use crate::core::client::classifier::ClassifierError;
use crate::core::client::database::DatabaseError;
use crate::core::client::queue::QueueError;
use crate::core::client::storage::StorageError;
use thiserror::Error;
use uuid::Uuid;

pub type TaskResult<T> = Result<T, TaskError>;

/// Error types for task-level operations: intake, processing, status
/// lookup, and dead-letter handling.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Payload of {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("Payload is empty")]
    EmptyPayload,

    /// The payload does not start with a recognized image signature
    #[error("Unsupported image format")]
    UnsupportedImageFormat,

    /// A processing attempt outran its wall-clock budget
    #[error("Processing of task {id} timed out after {seconds}s")]
    ProcessingTimeout { id: Uuid, seconds: u64 },

    #[error("Failed to serialize data: {0}")]
    FailedToSerializeData(#[from] serde_json::Error),

    #[error("Queue error: {0}")]
    QueueError(#[from] QueueError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Classifier error: {0}")]
    ClassifierError(#[from] ClassifierError),
}

impl TaskError {
    /// Submission errors are surfaced synchronously to the caller and never
    /// create a task; everything else is internal to the pipeline.
    pub fn is_submission_error(&self) -> bool {
        matches!(
            self,
            TaskError::PayloadTooLarge { .. } | TaskError::EmptyPayload | TaskError::UnsupportedImageFormat
        )
    }
}
