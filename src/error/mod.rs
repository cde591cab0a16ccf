pub mod consumer;
pub mod task;

use crate::core::client::classifier::ClassifierError;
use crate::core::client::database::DatabaseError;
use crate::core::client::queue::QueueError;
use crate::core::client::storage::StorageError;
use thiserror::Error;

pub use consumer::ConsumptionError;
pub use task::TaskError;

/// Result type for top-level service operations
pub type ClassifydResult<T> = Result<T, ClassifydError>;

/// Error types for the service as a whole
#[derive(Error, Debug)]
pub enum ClassifydError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Queue error: {0}")]
    QueueError(#[from] QueueError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),

    #[error("Classifier error: {0}")]
    ClassifierError(#[from] ClassifierError),

    #[error("Task error: {0}")]
    TaskError(#[from] TaskError),

    #[error("Consumption error: {0}")]
    ConsumptionError(#[from] ConsumptionError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Server error
    #[error("Server error: {0}")]
    ServerError(String),

    /// Worker error
    #[error("Worker error: {0}")]
    WorkerError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
