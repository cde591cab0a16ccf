use clap::{Parser, Subcommand};

pub mod server;
pub mod service;

#[derive(Parser, Debug)]
#[command(
    name = "classifyd",
    about = "Asynchronous image-classification task pipeline",
    long_about = "classifyd accepts image-classification requests over HTTP, queues them for \
    background workers with bounded retry and dead-letter escalation, and serves task status \
    lookups while clients poll for completion."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the intake server and the task workers
    Run {
        #[command(flatten)]
        run_command: Box<RunCmd>,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct RunCmd {
    #[command(flatten)]
    pub server_args: server::ServerCliArgs,

    #[command(flatten)]
    pub service_args: service::ServiceCliArgs,
}
