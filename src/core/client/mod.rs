// Client abstractions module - contains all collaborator interface traits

pub mod classifier;
pub mod database;
pub mod queue;
pub mod storage;

// Re-export commonly used types
pub use classifier::{stub::StubClassifier, Classifier};
pub use database::{memory::MemoryDatabase, DatabaseClient};
pub use queue::{memory::MemoryQueue, TaskQueueClient};
pub use storage::{memory::MemoryStorage, StorageClient};
