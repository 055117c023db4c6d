use chainrouter::cli::{run_cli, Cli};
use chainrouter::logging::{init_logging, LogConfig};
use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_logging(&LogConfig::from_env())?;
    let cli = Cli::parse();
    run_cli(cli).await
}
