mod app;
mod cli;
mod db;
mod paths;
mod tracker;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "SHOWTRACK_LOG";

fn main() -> Result<()> {
    init_tracing();
    let cli = cli::Cli::parse();
    app::run(cli)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
