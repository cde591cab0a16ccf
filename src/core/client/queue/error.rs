use crate::types::queue::QueueType;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum QueueError {
    /// No message is currently visible on the queue
    #[error("No messages available on queue {0}")]
    NoData(QueueType),

    #[error("Unknown queue: {0}")]
    QueueNotFound(String),

    /// The lease behind this receipt lapsed; the message was redelivered or
    /// escalated since this consumer received it
    #[error("Receipt {receipt} for message {message_id} is stale")]
    StaleReceipt { message_id: Uuid, receipt: Uuid },
}
