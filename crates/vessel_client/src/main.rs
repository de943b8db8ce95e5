use clap::Parser;
use vessel_core::{init_logging, LogSink};

mod cli;
mod commands;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let level = if cli.verbose { "debug" } else { "warn" };
    init_logging(level, &LogSink::Stderr).map_err(anyhow::Error::msg)?;
    commands::run_command(cli).await
}
