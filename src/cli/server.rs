use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct ServerCliArgs {
    /// Host the HTTP server binds to
    #[arg(env = "CLASSIFYD_HOST", long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port the HTTP server binds to
    #[arg(env = "CLASSIFYD_PORT", long, default_value_t = 3000)]
    pub port: u16,
}
