use crate::config::Config;
use crate::error::consumer::{ConsumptionError, EventSystemResult};
use crate::types::queue::QueueType;
use crate::worker::controller::event_worker::EventWorker;
use crate::{ClassifydError, ClassifydResult};
use futures::future::try_join_all;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Owns one [`EventWorker`] per queue type and their background tasks.
pub struct WorkerController {
    config: Arc<Config>,
    workers: Vec<Arc<EventWorker>>,
    handles: Vec<JoinHandle<EventSystemResult<()>>>,
    cancellation_token: CancellationToken,
}

impl WorkerController {
    pub fn new(config: Arc<Config>, cancellation_token: CancellationToken) -> Self {
        Self { config, workers: Vec::new(), handles: Vec::new(), cancellation_token }
    }

    fn queues() -> Vec<QueueType> {
        QueueType::iter().collect()
    }

    pub fn workers(&self) -> &[Arc<EventWorker>] {
        &self.workers
    }

    /// Spawn all event workers in the background.
    pub async fn start(&mut self) -> ClassifydResult<()> {
        for queue_type in Self::queues() {
            let worker_token = self.cancellation_token.child_token();
            let worker = Arc::new(EventWorker::new(queue_type, self.config.clone(), worker_token));
            self.workers.push(worker.clone());

            let handle = tokio::spawn(async move {
                let result = worker.run().await;
                if let Err(ref e) = result {
                    error!(queue = %queue_type, error = %e, "Event worker exited with error");
                }
                result
            });
            self.handles.push(handle);
        }
        info!(worker_count = self.workers.len(), "Worker controller started");
        Ok(())
    }

    /// Cancel all workers and wait for their loops to drain in-flight work.
    pub async fn shutdown(self) -> ClassifydResult<()> {
        info!("Initiating worker controller shutdown");
        self.cancellation_token.cancel();
        let results = try_join_all(self.handles)
            .await
            .map_err(|e| ClassifydError::from(ConsumptionError::Other(format!("worker task join failed: {e}"))))?;
        for result in results {
            result.map_err(ClassifydError::from)?;
        }
        info!("Worker controller shutdown complete");
        Ok(())
    }
}
