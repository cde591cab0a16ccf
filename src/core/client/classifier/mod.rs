pub mod error;
pub mod stub;

use crate::types::task::Prediction;
use async_trait::async_trait;
use bytes::Bytes;
pub use error::ClassifierError;

/// Trait defining the classification collaborator. The model behind it is
/// opaque to the pipeline: bytes in, ordered (label, confidence) pairs out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify an image, returning predictions ordered most-confident
    /// first. Raises on unreadable or invalid image data.
    async fn classify(&self, image: Bytes) -> Result<Vec<Prediction>, ClassifierError>;
}
