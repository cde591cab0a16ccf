pub mod error;
pub mod memory;

use async_trait::async_trait;
use bytes::Bytes;
pub use error::StorageError;

/// Trait defining blob storage operations. Content-addressable by caller-
/// supplied key; retention/expiry is external policy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Fetch the blob stored under `key`.
    async fn get_data(&self, key: &str) -> Result<Bytes, StorageError>;

    /// Store `data` under `key`, overwriting any previous blob.
    async fn put_data(&self, data: Bytes, key: &str) -> Result<(), StorageError>;

    /// Remove the blob stored under `key`.
    async fn delete_data(&self, key: &str) -> Result<(), StorageError>;

    /// Perform a health check on the storage backend.
    async fn health_check(&self) -> Result<(), StorageError>;
}
