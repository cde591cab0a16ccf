use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("No blob stored under key: {0}")]
    KeyNotFound(String),

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}
