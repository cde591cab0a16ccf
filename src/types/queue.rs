use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};
use uuid::Uuid;

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, EnumIter, Hash)]
pub enum QueueType {
    /// Main delivery queue feeding classification workers
    #[strum(serialize = "task_processing")]
    TaskProcessing,
    /// Terminal sink for messages that exhausted their delivery budget
    #[strum(serialize = "task_dead_letter")]
    TaskDeadLetter,
}

impl QueueType {
    /// Where messages go once their delivery count exceeds the maximum.
    /// The dead-letter queue itself has no further escalation target.
    pub fn dead_letter_target(&self) -> Option<QueueType> {
        match self {
            QueueType::TaskProcessing => Some(QueueType::TaskDeadLetter),
            QueueType::TaskDeadLetter => None,
        }
    }
}

/// Queue message envelope. Carries the task id and nothing else: workers
/// re-resolve the record and image location from the status store, which is
/// what makes redelivered messages safe to process again.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TaskQueueMessage {
    pub id: Uuid,
}

impl TaskQueueMessage {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}
