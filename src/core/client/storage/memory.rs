use crate::core::client::storage::{StorageClient, StorageError};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

/// In-process blob store backing the pipeline when no object storage is
/// wired in. Keys are opaque strings.
#[derive(Default)]
pub struct MemoryStorage {
    blobs: Mutex<HashMap<String, Bytes>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs. Test observability; not part of the trait.
    pub fn blob_count(&self) -> usize {
        self.blobs.lock().expect("storage mutex poisoned").len()
    }
}

#[async_trait]
impl StorageClient for MemoryStorage {
    async fn get_data(&self, key: &str) -> Result<Bytes, StorageError> {
        let blobs = self.blobs.lock().expect("storage mutex poisoned");
        blobs.get(key).cloned().ok_or_else(|| StorageError::KeyNotFound(key.to_string()))
    }

    async fn put_data(&self, data: Bytes, key: &str) -> Result<(), StorageError> {
        let mut blobs = self.blobs.lock().expect("storage mutex poisoned");
        debug!(key = %key, size = data.len(), "Stored blob");
        blobs.insert(key.to_string(), data);
        Ok(())
    }

    async fn delete_data(&self, key: &str) -> Result<(), StorageError> {
        let mut blobs = self.blobs.lock().expect("storage mutex poisoned");
        blobs.remove(key);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
