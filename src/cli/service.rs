use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct ServiceCliArgs {
    /// Largest accepted image payload in bytes
    #[arg(env = "CLASSIFYD_MAX_PAYLOAD_BYTES", long, default_value_t = 10 * 1024 * 1024)]
    pub max_payload_bytes: usize,

    /// Visibility timeout of the task queue in seconds
    #[arg(env = "CLASSIFYD_VISIBILITY_TIMEOUT_SECS", long, default_value_t = 180)]
    pub visibility_timeout_secs: u64,

    /// Deliveries allowed before a message moves to the dead-letter queue
    #[arg(env = "CLASSIFYD_MAX_DELIVERIES", long, default_value_t = 2)]
    pub max_deliveries: u32,

    /// Wall-clock bound on a single processing attempt in seconds.
    /// Must be strictly below the visibility timeout.
    #[arg(env = "CLASSIFYD_PROCESSING_TIMEOUT_SECS", long, default_value_t = 60)]
    pub processing_timeout_secs: u64,

    /// Worker sleep between polls of an empty queue, in milliseconds
    #[arg(env = "CLASSIFYD_POLL_INTERVAL_MS", long, default_value_t = 1000)]
    pub poll_interval_ms: u64,

    /// Concurrent in-flight messages per event worker
    #[arg(env = "CLASSIFYD_WORKER_CONCURRENCY", long, default_value_t = 4)]
    pub worker_concurrency: usize,
}
