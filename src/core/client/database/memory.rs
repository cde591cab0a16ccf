use crate::core::client::database::{DatabaseClient, DatabaseError, FinalizeResult};
use crate::types::task::{TaskOutcome, TaskRecord, TaskStatus};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

/// In-process status store. One mutex over the whole table gives the
/// single-record atomic-write guarantee the pipeline relies on; the
/// compare-and-set in `finalize_task` runs entirely under the lock.
#[derive(Default)]
pub struct MemoryDatabase {
    records: Mutex<HashMap<Uuid, TaskRecord>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records. Test observability; not part of the trait.
    pub fn record_count(&self) -> usize {
        self.records.lock().expect("database mutex poisoned").len()
    }
}

#[async_trait]
impl DatabaseClient for MemoryDatabase {
    async fn create_task(&self, record: TaskRecord) -> Result<TaskRecord, DatabaseError> {
        let mut records = self.records.lock().expect("database mutex poisoned");
        if records.contains_key(&record.id) {
            return Err(DatabaseError::TaskAlreadyExists(record.id));
        }
        debug!(task_id = %record.id, "Created task record");
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get_task(&self, id: Uuid) -> Result<Option<TaskRecord>, DatabaseError> {
        let records = self.records.lock().expect("database mutex poisoned");
        Ok(records.get(&id).cloned())
    }

    async fn finalize_task(&self, id: Uuid, outcome: TaskOutcome) -> Result<FinalizeResult, DatabaseError> {
        let mut records = self.records.lock().expect("database mutex poisoned");
        let record = records.get_mut(&id).ok_or(DatabaseError::TaskNotFound(id))?;

        if record.is_terminal() {
            return Ok(FinalizeResult::AlreadyTerminal(record.clone()));
        }

        match outcome {
            TaskOutcome::Completed(predictions) => {
                record.status = TaskStatus::Completed;
                record.result = Some(predictions);
            }
            TaskOutcome::Failed(cause) => {
                record.status = TaskStatus::Failed;
                record.error = Some(cause);
            }
        }
        record.updated_at = Utc::now();
        debug!(task_id = %id, status = %record.status, "Finalized task record");
        Ok(FinalizeResult::Applied(record.clone()))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
