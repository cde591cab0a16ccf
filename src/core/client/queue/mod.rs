pub mod error;
pub mod memory;

use crate::types::queue::QueueType;
use async_trait::async_trait;
pub use error::QueueError;
use uuid::Uuid;

/// A leased message handed to exactly one consumer for the duration of the
/// visibility window. The receipt ties an ack to this particular lease: once
/// the window lapses and the message is redelivered, the old receipt goes
/// stale and can no longer remove it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub message_id: Uuid,
    pub payload: String,
    pub receipt: Uuid,
}

/// Trait defining at-least-once queue operations.
///
/// There is deliberately no negative-acknowledge: a consumer that fails
/// simply drops its delivery, the lease lapses, and the queue redelivers.
/// Retry policy lives entirely on this side of the seam.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskQueueClient: Send + Sync {
    /// Enqueue a payload on the given queue.
    async fn send_message(&self, queue: QueueType, payload: String) -> Result<(), QueueError>;

    /// Lease the next visible message, hiding it from other consumers for
    /// the visibility-timeout window and bumping its delivery counter.
    /// A message whose counter would exceed the maximum delivery count is
    /// moved to the dead-letter queue instead of being returned.
    ///
    /// # Returns
    /// * `Ok(Delivery)` - the leased message
    /// * `Err(QueueError::NoData)` - no message is currently visible
    async fn consume_message(&self, queue: QueueType) -> Result<Delivery, QueueError>;

    /// Remove a leased message. Fails with `QueueError::StaleReceipt` if the
    /// lease lapsed and the message was redelivered (or escalated) since.
    async fn ack_message(&self, queue: QueueType, delivery: &Delivery) -> Result<(), QueueError>;

    /// Perform a health check on the queue backend.
    async fn health_check(&self) -> Result<(), QueueError>;
}
