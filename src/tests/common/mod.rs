use crate::config::Config;
use crate::core::client::classifier::{Classifier, ClassifierError};
use crate::core::client::StubClassifier;
use crate::core::client::database::memory::MemoryDatabase;
use crate::core::client::queue::memory::MemoryQueue;
use crate::core::client::storage::memory::MemoryStorage;
use crate::types::params::{ServerParams, ServiceParams};
use crate::types::task::Prediction;
use async_trait::async_trait;
use bytes::Bytes;
use rstest::fixture;
use std::sync::Arc;
use std::time::Duration;

/// A config over in-process backends plus direct handles to them, so tests
/// can observe queue depths and record counts behind the trait seams.
pub struct TestContext {
    pub config: Arc<Config>,
    pub queue: Arc<MemoryQueue>,
    pub database: Arc<MemoryDatabase>,
    pub storage: Arc<MemoryStorage>,
}

/// Short virtual-time pipeline parameters. Tests run under
/// `start_paused = true`, so the absolute values only matter relative to
/// each other.
pub fn fast_params() -> ServiceParams {
    ServiceParams {
        max_payload_bytes: 1024 * 1024,
        visibility_timeout: Duration::from_secs(3),
        max_deliveries: 2,
        processing_timeout: Duration::from_secs(1),
        poll_interval: Duration::from_millis(50),
        worker_concurrency: 2,
    }
}

pub fn test_context(classifier: Arc<dyn Classifier>, service_params: ServiceParams) -> TestContext {
    let queue = Arc::new(MemoryQueue::new(service_params.visibility_timeout, service_params.max_deliveries));
    let database = Arc::new(MemoryDatabase::new());
    let storage = Arc::new(MemoryStorage::new());
    let config = Config::new(
        ServerParams { host: "127.0.0.1".to_string(), port: 0 },
        service_params,
        database.clone(),
        storage.clone(),
        queue.clone(),
        classifier,
    )
    .expect("test params are valid");
    TestContext { config: Arc::new(config), queue, database, storage }
}

/// Context with a stub classifier answering `[("cat", 0.92)]`.
#[fixture]
pub fn cat_context() -> TestContext {
    test_context(Arc::new(StubClassifier::new(vec![Prediction::new("cat", 0.92)])), fast_params())
}

/// A 10KB payload carrying a JPEG signature.
#[fixture]
pub fn sample_jpeg() -> Bytes {
    let mut payload = vec![0xFF, 0xD8, 0xFF, 0xE0];
    payload.resize(10 * 1024, 0xAB);
    Bytes::from(payload)
}

/// Classifier that fails every attempt, for exercising the retry and
/// dead-letter paths.
pub struct FailingClassifier;

#[async_trait]
impl Classifier for FailingClassifier {
    async fn classify(&self, _image: Bytes) -> Result<Vec<Prediction>, ClassifierError> {
        Err(ClassifierError::InferenceFailed("induced failure".to_string()))
    }
}

/// Classifier that stalls longer than any processing timeout a test
/// configures, for exercising the attempt deadline.
pub struct SlowClassifier {
    pub delay: Duration,
}

#[async_trait]
impl Classifier for SlowClassifier {
    async fn classify(&self, _image: Bytes) -> Result<Vec<Prediction>, ClassifierError> {
        tokio::time::sleep(self.delay).await;
        Ok(vec![Prediction::new("slow", 0.5)])
    }
}
