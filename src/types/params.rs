use crate::cli::server::ServerCliArgs;
use crate::cli::service::ServiceCliArgs;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ServerParams {
    pub host: String,
    pub port: u16,
}

impl From<ServerCliArgs> for ServerParams {
    fn from(args: ServerCliArgs) -> Self {
        Self { host: args.host, port: args.port }
    }
}

/// Tuning knobs for the task pipeline. The visibility timeout is the sole
/// retry trigger, so `processing_timeout` must stay strictly below it to
/// avoid redelivery while an attempt is still legitimately running
/// (validated in [`Config::new`](crate::config::Config::new)).
#[derive(Debug, Clone)]
pub struct ServiceParams {
    /// Largest accepted image payload, in bytes
    pub max_payload_bytes: usize,
    /// How long a dequeued message stays invisible to other consumers
    pub visibility_timeout: Duration,
    /// Deliveries allowed before a message escalates to the dead-letter queue
    pub max_deliveries: u32,
    /// Hard wall-clock bound on a single processing attempt
    pub processing_timeout: Duration,
    /// Worker sleep between polls of an empty queue
    pub poll_interval: Duration,
    /// Concurrent in-flight messages per event worker
    pub worker_concurrency: usize,
}

impl From<ServiceCliArgs> for ServiceParams {
    fn from(args: ServiceCliArgs) -> Self {
        Self {
            max_payload_bytes: args.max_payload_bytes,
            visibility_timeout: Duration::from_secs(args.visibility_timeout_secs),
            max_deliveries: args.max_deliveries,
            processing_timeout: Duration::from_secs(args.processing_timeout_secs),
            poll_interval: Duration::from_millis(args.poll_interval_ms),
            worker_concurrency: args.worker_concurrency,
        }
    }
}
