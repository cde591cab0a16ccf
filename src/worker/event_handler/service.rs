use crate::config::Config;
use crate::core::client::database::FinalizeResult;
use crate::error::task::{TaskError, TaskResult};
use crate::types::queue::{QueueType, TaskQueueMessage};
use crate::types::task::{TaskOutcome, TaskRecord};
use bytes::Bytes;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Cause written to records finalized through the dead-letter queue.
pub const RETRIES_EXHAUSTED_CAUSE: &str = "classification retries exhausted";

pub struct TaskHandlerService;

impl TaskHandlerService {
    /// Intake: validate the payload, persist the image, create the status
    /// record, then enqueue the task reference. In that order, so a worker
    /// dequeuing the message can never observe a missing record.
    ///
    /// Returns the created record immediately; this call never waits for
    /// classification.
    #[instrument(skip_all, fields(payload_size = payload.len()))]
    pub async fn submit_task(payload: Bytes, config: Arc<Config>) -> TaskResult<TaskRecord> {
        let start = Instant::now();
        Self::validate_payload(&payload, config.service_params().max_payload_bytes)?;

        let record = TaskRecord::new_pending(Uuid::new_v4());
        config.storage().put_data(payload, &record.image_key).await?;
        let record = config.database().create_task(record).await?;

        let message = serde_json::to_string(&TaskQueueMessage::new(record.id))?;
        if let Err(e) = config.queue().send_message(QueueType::TaskProcessing, message).await {
            // The record exists but no message references it, so nothing
            // will ever finalize it. Accepted edge case; an external
            // reconciliation sweep would pick these up.
            warn!(task_id = %record.id, error = %e, "Enqueue failed after record creation, task is orphaned");
            return Err(e.into());
        }

        info!(task_id = %record.id, elapsed_ms = start.elapsed().as_millis() as u64, "Accepted task");
        Ok(record)
    }

    /// Status lookup; read-only.
    pub async fn get_task(id: Uuid, config: Arc<Config>) -> TaskResult<Option<TaskRecord>> {
        Ok(config.database().get_task(id).await?)
    }

    /// One worker attempt for a dequeued task reference.
    ///
    /// Missing and already-terminal records are discarded successfully (the
    /// caller acks): both mean a duplicate delivery already lost the race.
    /// Every other failure propagates so the caller leaves the message to
    /// its visibility timeout: the queue owns retry and escalation, this
    /// function never writes a failure status.
    #[instrument(skip(config), fields(task_id = %id))]
    pub async fn process_task(id: Uuid, config: Arc<Config>) -> TaskResult<()> {
        let record = match config.database().get_task(id).await? {
            Some(record) => record,
            None => {
                warn!(task_id = %id, "Dequeued reference to an unknown task, discarding");
                return Ok(());
            }
        };
        if record.is_terminal() {
            debug!(task_id = %id, status = %record.status, "Task already terminal, discarding duplicate delivery");
            return Ok(());
        }

        let timeout = config.service_params().processing_timeout;
        let attempt = async {
            let image = config.storage().get_data(&record.image_key).await?;
            let predictions = config.classifier().classify(image).await?;
            Ok::<_, TaskError>(predictions)
        };
        let predictions = tokio::time::timeout(timeout, attempt)
            .await
            .map_err(|_| TaskError::ProcessingTimeout { id, seconds: timeout.as_secs() })??;

        match config.database().finalize_task(id, TaskOutcome::Completed(predictions)).await? {
            FinalizeResult::Applied(record) => {
                info!(task_id = %id, labels = record.result.as_ref().map(|r| r.len()).unwrap_or(0), "Task completed");
            }
            FinalizeResult::AlreadyTerminal(record) => {
                debug!(task_id = %id, status = %record.status, "Lost finalize race, keeping existing outcome");
            }
        }
        Ok(())
    }

    /// Dead-letter consumption: mark the task terminally failed unless a
    /// racing duplicate already finalized it. The single place a task is
    /// ever explicitly failed for worker-side problems.
    #[instrument(skip(config), fields(task_id = %id))]
    pub async fn handle_task_failure(id: Uuid, config: Arc<Config>) -> TaskResult<()> {
        match config.database().finalize_task(id, TaskOutcome::Failed(RETRIES_EXHAUSTED_CAUSE.to_string())).await {
            Ok(FinalizeResult::Applied(_)) => {
                info!(task_id = %id, "Task marked failed after exhausted deliveries");
                Ok(())
            }
            Ok(FinalizeResult::AlreadyTerminal(record)) => {
                debug!(task_id = %id, status = %record.status, "Dead-letter duplicate for terminal task, discarding");
                Ok(())
            }
            Err(crate::core::client::database::DatabaseError::TaskNotFound(_)) => {
                warn!(task_id = %id, "Dead-letter reference to an unknown task, discarding");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn validate_payload(payload: &Bytes, limit: usize) -> TaskResult<()> {
        if payload.is_empty() {
            return Err(TaskError::EmptyPayload);
        }
        if payload.len() > limit {
            return Err(TaskError::PayloadTooLarge { size: payload.len(), limit });
        }
        if !looks_like_image(payload) {
            return Err(TaskError::UnsupportedImageFormat);
        }
        Ok(())
    }
}

/// Signature sniffing for the formats the pipeline accepts: JPEG, PNG, GIF
/// and WebP. Decoding is the classifier's problem; intake only rejects
/// payloads that cannot possibly be images.
fn looks_like_image(payload: &[u8]) -> bool {
    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n";
    const GIF87A: &[u8] = b"GIF87a";
    const GIF89A: &[u8] = b"GIF89a";

    if payload.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return true; // JPEG
    }
    if payload.starts_with(PNG) || payload.starts_with(GIF87A) || payload.starts_with(GIF89A) {
        return true;
    }
    // RIFF....WEBP
    payload.len() >= 12 && payload.starts_with(b"RIFF") && &payload[8..12] == b"WEBP"
}
