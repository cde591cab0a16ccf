use crate::core::client::classifier::{Classifier, ClassifierError};
use crate::types::task::Prediction;
use async_trait::async_trait;
use bytes::Bytes;

/// Fixed-output classifier standing in for a real model. Used by the demo
/// binary and by pipeline tests; production deployments implement
/// [`Classifier`] over their inference runtime and swap it in at config
/// build time.
pub struct StubClassifier {
    predictions: Vec<Prediction>,
}

impl StubClassifier {
    pub fn new(predictions: Vec<Prediction>) -> Self {
        Self { predictions }
    }
}

impl Default for StubClassifier {
    fn default() -> Self {
        Self::new(vec![Prediction::new("unlabeled", 1.0)])
    }
}

#[async_trait]
impl Classifier for StubClassifier {
    async fn classify(&self, image: Bytes) -> Result<Vec<Prediction>, ClassifierError> {
        if image.is_empty() {
            return Err(ClassifierError::InvalidImage("empty payload".to_string()));
        }
        Ok(self.predictions.clone())
    }
}
