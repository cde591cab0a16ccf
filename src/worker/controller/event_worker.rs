use crate::config::Config;
use crate::core::client::queue::{Delivery, QueueError};
use crate::error::consumer::{ConsumptionError, EventSystemResult};
use crate::types::queue::{QueueType, TaskQueueMessage};
use crate::worker::event_handler::service::TaskHandlerService;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn, Instrument, Span};

const QUEUE_GET_MESSAGE_WAIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Consumes one queue and dispatches its messages: the task-processing
/// queue into worker attempts, the dead-letter queue into terminal failure
/// writes. Batch size is 1 per dequeue to keep failure attribution
/// unambiguous; concurrency comes from spawning multiple in-flight messages
/// into a bounded `JoinSet`.
#[derive(Clone)]
pub struct EventWorker {
    config: Arc<Config>,
    queue_type: QueueType,
    cancellation_token: CancellationToken,
}

impl EventWorker {
    pub fn new(queue_type: QueueType, config: Arc<Config>, cancellation_token: CancellationToken) -> Self {
        Self { config, queue_type, cancellation_token }
    }

    /// Triggers a graceful shutdown of this worker's loop.
    pub fn shutdown(&self) {
        info!("Triggering shutdown for {} worker", self.queue_type);
        self.cancellation_token.cancel();
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.cancellation_token.is_cancelled()
    }

    /// Block until a message is available or the wait timeout elapses.
    /// Returns `Ok(None)` on timeout so the main loop can re-check shutdown.
    async fn get_message(&self) -> EventSystemResult<Option<Delivery>> {
        let start = Instant::now();
        loop {
            match self.config.queue().consume_message(self.queue_type).await {
                Ok(delivery) => return Ok(Some(delivery)),
                Err(QueueError::NoData(_)) => {
                    if start.elapsed() > QUEUE_GET_MESSAGE_WAIT_TIMEOUT {
                        return Ok(None);
                    }
                    sleep(self.config.service_params().poll_interval).await;
                }
                Err(e) => {
                    error!(queue = %self.queue_type, error = %e, "Failed to consume message from queue");
                    return Err(ConsumptionError::FailedToConsumeFromQueue { error_msg: e.to_string() });
                }
            }
        }
    }

    fn parse_message(&self, message: &Delivery) -> EventSystemResult<TaskQueueMessage> {
        serde_json::from_str(&message.payload)
            .map_err(|e| ConsumptionError::FailedToParseMessage { error_msg: e.to_string() })
    }

    fn create_task_span(&self, message: &TaskQueueMessage) -> Span {
        tracing::info_span!(
            "task_processing",
            task_id = %message.id,
            queue = %self.queue_type,
        )
    }

    async fn handle_message(&self, message: &TaskQueueMessage) -> EventSystemResult<()> {
        let result = match self.queue_type {
            QueueType::TaskProcessing => TaskHandlerService::process_task(message.id, self.config.clone()).await,
            QueueType::TaskDeadLetter => TaskHandlerService::handle_task_failure(message.id, self.config.clone()).await,
        };
        result.map_err(|e| ConsumptionError::FailedToHandleTask { task_id: message.id, error_msg: e.to_string() })
    }

    /// Acknowledge on success; on failure, deliberately leave the lease to
    /// lapse. The visibility timeout is the sole retry trigger and the
    /// queue's delivery counting owns dead-letter escalation.
    async fn post_processing(
        &self,
        result: EventSystemResult<()>,
        message: Delivery,
        parsed_message: &TaskQueueMessage,
    ) -> EventSystemResult<()> {
        if let Err(error) = result {
            warn!(
                task_id = %parsed_message.id,
                queue = %self.queue_type,
                error = %error,
                "Handling failed, leaving message to its visibility timeout"
            );
            return Err(error);
        }

        self.config
            .queue()
            .ack_message(self.queue_type, &message)
            .await
            .map_err(|e| ConsumptionError::FailedToAcknowledgeMessage(e.to_string()))?;
        Ok(())
    }

    async fn process_message(&self, message: Delivery) -> EventSystemResult<()> {
        let parsed_message = match self.parse_message(&message) {
            Ok(parsed) => parsed,
            Err(e) => {
                // A payload nobody can ever resolve to a task id would loop
                // through the dead-letter queue forever; drop it instead.
                error!(queue = %self.queue_type, error = %e, "Unparsable message payload, acknowledging and dropping");
                self.config
                    .queue()
                    .ack_message(self.queue_type, &message)
                    .await
                    .map_err(|e| ConsumptionError::FailedToAcknowledgeMessage(e.to_string()))?;
                return Err(e);
            }
        };

        let span = self.create_task_span(&parsed_message);
        async move {
            let result = self.handle_message(&parsed_message).await;
            self.post_processing(result, message, &parsed_message).await
        }
        .instrument(span)
        .await
    }

    /// Run the event worker: poll the queue, spawn handling up to the
    /// configured concurrency, and drain in-flight work on shutdown.
    pub async fn run(&self) -> EventSystemResult<()> {
        let mut tasks = JoinSet::new();
        let max_concurrent_tasks = self.config.service_params().worker_concurrency;
        info!("Starting {} worker (pool_size={})", self.queue_type, max_concurrent_tasks);

        loop {
            if self.is_shutdown_requested() {
                info!("Shutdown requested, stopping message processing");
                break;
            }

            tokio::select! {
                biased;

                Some(result) = tasks.join_next(), if !tasks.is_empty() => {
                    Self::handle_task_result(result);
                }

                _ = self.cancellation_token.cancelled() => {
                    info!("Shutdown signal received, breaking from main loop");
                    break;
                }

                message_result = self.get_message(), if tasks.len() < max_concurrent_tasks => {
                    match message_result {
                        Ok(Some(message)) => {
                            debug!(queue = %self.queue_type, message_id = %message.message_id, "Received message from queue");
                            let worker = self.clone();
                            tasks.spawn(async move { worker.process_message(message).await });
                        }
                        Ok(None) => {}
                        Err(e) => {
                            error!("Error receiving message: {:?}", e);
                            sleep(Duration::from_secs(1)).await;
                        }
                    }
                }
            }
        }

        info!("Waiting for {} remaining tasks to complete", tasks.len());
        while let Some(result) = tasks.join_next().await {
            Self::handle_task_result(result);
        }
        info!("All tasks completed, {} worker shutdown complete", self.queue_type);

        Ok(())
    }

    fn handle_task_result(result: Result<EventSystemResult<()>, tokio::task::JoinError>) {
        match result {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                error!("Task failed with application error: {:?}", e);
            }
            Err(e) => {
                error!("Task panicked or was cancelled: {:?}", e);
            }
        }
    }
}
