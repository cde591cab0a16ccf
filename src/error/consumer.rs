use thiserror::Error;
use uuid::Uuid;

pub type EventSystemResult<T> = Result<T, ConsumptionError>;

/// Error types for the event-worker consumption loop
#[derive(Error, Debug)]
pub enum ConsumptionError {
    #[error("Failed to consume from queue: {error_msg}")]
    FailedToConsumeFromQueue { error_msg: String },

    #[error("Failed to parse message payload: {error_msg}")]
    FailedToParseMessage { error_msg: String },

    #[error("Failed to handle task {task_id}: {error_msg}")]
    FailedToHandleTask { task_id: Uuid, error_msg: String },

    #[error("Failed to acknowledge message: {0}")]
    FailedToAcknowledgeMessage(String),

    #[error("Other error: {0}")]
    Other(String),
}
