use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskStatus {
    /// An acknowledgement that the task has been received and queued,
    /// waiting for a worker to pick it up. Retries stay in this state;
    /// attempts are opaque to clients.
    Pending,
    /// The classifier produced a result; `result` is populated
    Completed,
    /// Delivery attempts were exhausted; `error` is populated
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

/// One classifier prediction. Order within a result is most-confident first.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub confidence: f64,
}

impl Prediction {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self { label: label.into(), confidence }
    }
}

/// The status-store record for a single classification task.
///
/// `result` and `error` are mutually exclusive and each is present iff the
/// matching terminal status holds. The record transitions out of `Pending`
/// exactly once and is never mutated afterwards (enforced by
/// [`DatabaseClient::finalize_task`](crate::core::client::database::DatabaseClient::finalize_task)).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TaskRecord {
    pub id: Uuid,
    pub status: TaskStatus,
    pub image_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Vec<Prediction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskRecord {
    /// A fresh `Pending` record with the blob key derived from the id.
    pub fn new_pending(id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            status: TaskStatus::Pending,
            image_key: image_key_for(&id),
            result: None,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Blob-store key for a task's uploaded image.
pub fn image_key_for(id: &Uuid) -> String {
    format!("images/{}", id)
}

/// The terminal write a finalizer wants to apply to a record.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    Completed(Vec<Prediction>),
    Failed(String),
}
