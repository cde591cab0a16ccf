pub mod error;
pub mod memory;

use crate::types::task::{TaskOutcome, TaskRecord};
use async_trait::async_trait;
pub use error::DatabaseError;
use uuid::Uuid;

/// Result of a conditional terminal write.
#[derive(Debug, Clone, PartialEq)]
pub enum FinalizeResult {
    /// The record was still `Pending`; the terminal transition was applied
    Applied(TaskRecord),
    /// Another finalizer won the race; the record is returned untouched
    AlreadyTerminal(TaskRecord),
}

/// Trait defining status-store operations.
///
/// Record creation happens once, at intake. The only mutation the store
/// supports afterwards is `finalize_task`, a compare-and-set on
/// `status == Pending`, which closes the window where two racing finalizers
/// could both pass a read-then-write terminal check.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Create a new task record. A duplicate id is an error.
    async fn create_task(&self, record: TaskRecord) -> Result<TaskRecord, DatabaseError>;

    /// Look up a task record by id.
    async fn get_task(&self, id: Uuid) -> Result<Option<TaskRecord>, DatabaseError>;

    /// Apply a terminal outcome iff the record is still `Pending`, moving
    /// `updated_at` only on success. Unknown ids are an error: finalizers
    /// only ever hold ids that were durably written at intake.
    async fn finalize_task(&self, id: Uuid, outcome: TaskOutcome) -> Result<FinalizeResult, DatabaseError>;

    /// Perform a health check on the database backend.
    async fn health_check(&self) -> Result<(), DatabaseError>;
}
