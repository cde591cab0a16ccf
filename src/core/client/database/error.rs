use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Task {0} already exists")]
    TaskAlreadyExists(Uuid),

    #[error("Task {0} does not exist")]
    TaskNotFound(Uuid),

    #[error("Database backend unavailable: {0}")]
    Unavailable(String),
}
