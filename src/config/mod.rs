use crate::cli::RunCmd;
use crate::core::client::classifier::{stub::StubClassifier, Classifier};
use crate::core::client::database::{memory::MemoryDatabase, DatabaseClient};
use crate::core::client::queue::{memory::MemoryQueue, TaskQueueClient};
use crate::core::client::storage::{memory::MemoryStorage, StorageClient};
use crate::types::params::{ServerParams, ServiceParams};
use crate::{ClassifydError, ClassifydResult};
use std::sync::Arc;
use tracing::debug;

/// Shared application configuration: pipeline parameters plus handles to the
/// four collaborator clients. Everything downstream (routes, workers, task
/// handlers) reaches its collaborators through an `Arc<Config>`.
pub struct Config {
    server_params: ServerParams,
    service_params: ServiceParams,
    database: Arc<dyn DatabaseClient>,
    storage: Arc<dyn StorageClient>,
    queue: Arc<dyn TaskQueueClient>,
    classifier: Arc<dyn Classifier>,
}

impl Config {
    /// Assemble a config, rejecting parameter combinations that would break
    /// the pipeline's retry semantics.
    pub fn new(
        server_params: ServerParams,
        service_params: ServiceParams,
        database: Arc<dyn DatabaseClient>,
        storage: Arc<dyn StorageClient>,
        queue: Arc<dyn TaskQueueClient>,
        classifier: Arc<dyn Classifier>,
    ) -> ClassifydResult<Self> {
        if service_params.max_deliveries == 0 {
            return Err(ClassifydError::ConfigError("max_deliveries must be at least 1".to_string()));
        }
        // A processing attempt must give up before the queue hands the
        // message to someone else, or a slow-but-healthy attempt would race
        // its own redelivery.
        if service_params.processing_timeout >= service_params.visibility_timeout {
            return Err(ClassifydError::ConfigError(format!(
                "processing timeout ({:?}) must be strictly below the visibility timeout ({:?})",
                service_params.processing_timeout, service_params.visibility_timeout
            )));
        }
        Ok(Self { server_params, service_params, database, storage, queue, classifier })
    }

    /// Build a config from the run command, wiring the in-process backends
    /// and the stub classifier.
    pub fn from_run_cmd(run_cmd: &RunCmd) -> ClassifydResult<Self> {
        let server_params = ServerParams::from(run_cmd.server_args.clone());
        let service_params = ServiceParams::from(run_cmd.service_args.clone());
        debug!(?server_params, ?service_params, "Building configuration");

        let queue = MemoryQueue::new(service_params.visibility_timeout, service_params.max_deliveries);
        Self::new(
            server_params,
            service_params,
            Arc::new(MemoryDatabase::new()),
            Arc::new(MemoryStorage::new()),
            Arc::new(queue),
            Arc::new(StubClassifier::default()),
        )
    }

    pub fn server_params(&self) -> &ServerParams {
        &self.server_params
    }

    pub fn service_params(&self) -> &ServiceParams {
        &self.service_params
    }

    pub fn database(&self) -> &dyn DatabaseClient {
        self.database.as_ref()
    }

    pub fn storage(&self) -> &dyn StorageClient {
        self.storage.as_ref()
    }

    pub fn queue(&self) -> &dyn TaskQueueClient {
        self.queue.as_ref()
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }
}
