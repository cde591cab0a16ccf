use crate::core::client::queue::{Delivery, QueueError, TaskQueueClient};
use crate::types::queue::QueueType;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use strum::IntoEnumIterator;
use tokio::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

struct StoredMessage {
    id: Uuid,
    payload: String,
    /// Times the message has been handed to a consumer
    delivery_count: u32,
    /// Before this instant the message is invisible to consumers
    visible_at: Instant,
    /// Receipt of the lease currently holding the message, if any
    receipt: Option<Uuid>,
}

impl StoredMessage {
    fn new(payload: String) -> Self {
        Self { id: Uuid::new_v4(), payload, delivery_count: 0, visible_at: Instant::now(), receipt: None }
    }
}

/// In-process work queue with SQS-style delivery semantics: leases with a
/// visibility timeout, per-message delivery counting, and atomic move to the
/// dead-letter queue once the count exceeds the maximum.
///
/// Uses `tokio::time::Instant` for lease deadlines so tests can drive
/// redelivery with paused virtual time.
pub struct MemoryQueue {
    queues: Mutex<HashMap<QueueType, VecDeque<StoredMessage>>>,
    visibility_timeout: Duration,
    max_deliveries: u32,
}

impl MemoryQueue {
    pub fn new(visibility_timeout: Duration, max_deliveries: u32) -> Self {
        let queues = QueueType::iter().map(|queue| (queue, VecDeque::new())).collect();
        Self { queues: Mutex::new(queues), visibility_timeout, max_deliveries }
    }

    /// Number of messages currently stored on a queue, visible or not.
    /// Test observability; not part of the client trait.
    pub fn depth(&self, queue: QueueType) -> usize {
        self.queues.lock().expect("queue mutex poisoned").get(&queue).map(|q| q.len()).unwrap_or(0)
    }
}

#[async_trait]
impl TaskQueueClient for MemoryQueue {
    async fn send_message(&self, queue: QueueType, payload: String) -> Result<(), QueueError> {
        let mut queues = self.queues.lock().expect("queue mutex poisoned");
        let messages = queues.get_mut(&queue).ok_or_else(|| QueueError::QueueNotFound(queue.to_string()))?;
        let message = StoredMessage::new(payload);
        debug!(queue = %queue, message_id = %message.id, "Enqueued message");
        messages.push_back(message);
        Ok(())
    }

    async fn consume_message(&self, queue: QueueType) -> Result<Delivery, QueueError> {
        let now = Instant::now();
        let mut queues = self.queues.lock().expect("queue mutex poisoned");
        let messages = queues.get_mut(&queue).ok_or_else(|| QueueError::QueueNotFound(queue.to_string()))?;

        // Scan in arrival order. Visible messages over their delivery budget
        // are pulled aside for the dead-letter queue instead of being leased.
        let mut escalated = Vec::new();
        let mut leased = None;
        let mut index = 0;
        while index < messages.len() {
            if messages[index].visible_at > now {
                index += 1;
                continue;
            }
            let over_budget = messages[index].delivery_count + 1 > self.max_deliveries;
            if over_budget && queue.dead_letter_target().is_some() {
                let message = messages.remove(index).expect("index checked above");
                escalated.push(message);
                continue;
            }
            let message = &mut messages[index];
            message.delivery_count += 1;
            message.visible_at = now + self.visibility_timeout;
            let receipt = Uuid::new_v4();
            message.receipt = Some(receipt);
            leased = Some(Delivery { message_id: message.id, payload: message.payload.clone(), receipt });
            break;
        }

        if !escalated.is_empty() {
            let target = queue.dead_letter_target().expect("only queues with a target escalate");
            let dead_letter = queues.get_mut(&target).ok_or_else(|| QueueError::QueueNotFound(target.to_string()))?;
            for mut message in escalated {
                warn!(
                    queue = %queue,
                    message_id = %message.id,
                    delivery_count = message.delivery_count,
                    "Delivery budget exhausted, moving message to {}", target
                );
                message.delivery_count = 0;
                message.visible_at = now;
                message.receipt = None;
                dead_letter.push_back(message);
            }
        }

        leased.ok_or(QueueError::NoData(queue))
    }

    async fn ack_message(&self, queue: QueueType, delivery: &Delivery) -> Result<(), QueueError> {
        let mut queues = self.queues.lock().expect("queue mutex poisoned");
        let messages = queues.get_mut(&queue).ok_or_else(|| QueueError::QueueNotFound(queue.to_string()))?;

        match messages.iter().position(|m| m.id == delivery.message_id) {
            Some(index) => {
                if messages[index].receipt == Some(delivery.receipt) {
                    messages.remove(index);
                    debug!(queue = %queue, message_id = %delivery.message_id, "Acknowledged message");
                    Ok(())
                } else {
                    Err(QueueError::StaleReceipt { message_id: delivery.message_id, receipt: delivery.receipt })
                }
            }
            // Already removed, either by a duplicate ack or an escalation
            // that has since been acknowledged. Safe to treat as done.
            None => Ok(()),
        }
    }

    async fn health_check(&self) -> Result<(), QueueError> {
        Ok(())
    }
}
