pub mod controller;
pub mod event_handler;

use crate::config::Config;
use crate::ClassifydResult;
use controller::worker_controller::WorkerController;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Initializes the event workers with the provided configuration.
///
/// Starts one worker per queue type (task processing and dead-letter) in the
/// background and returns the controller for shutdown management.
pub async fn initialize_worker(
    config: Arc<Config>,
    shutdown_token: CancellationToken,
) -> ClassifydResult<WorkerController> {
    let mut controller = WorkerController::new(config, shutdown_token);
    controller.start().await?;
    info!("Workers initialized and started successfully");
    Ok(controller)
}
