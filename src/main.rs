use clap::Parser as _;
use classifyd::cli::{Cli, Commands, RunCmd};
use classifyd::config::Config;
use classifyd::server::setup_server;
use classifyd::utils::logging::init_logging;
use classifyd::worker::initialize_worker;
use classifyd::ClassifydResult;
use dotenvy::dotenv;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();
    info!("Starting classifyd");
    let cli = Cli::parse();

    match &cli.command {
        Commands::Run { run_command } => {
            if let Err(e) = run_service(run_command).await {
                error!(error = %e, error_chain = ?e, "Failed to run classifyd service");
                panic!("Failed to run classifyd service: {}", e);
            }
            info!("classifyd service shut down cleanly");
        }
    }
}

async fn run_service(run_cmd: &RunCmd) -> ClassifydResult<()> {
    let config = Arc::new(Config::from_run_cmd(run_cmd)?);
    debug!("Configuration initialized");

    let (_address, server_handle) = setup_server(config.clone()).await?;

    let shutdown_token = CancellationToken::new();
    let worker_controller = initialize_worker(config.clone(), shutdown_token.clone()).await?;

    tokio::signal::ctrl_c().await.expect("Failed to listen for ctrl+c");
    info!("Shutdown signal received");

    worker_controller.shutdown().await?;
    server_handle.shutdown().await.map_err(|e| classifyd::ClassifydError::ServerError(e.to_string()))?;

    Ok(())
}
