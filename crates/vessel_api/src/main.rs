use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use vessel_api::{ApiConfig, VesselServer};
use vessel_core::{init_logging, LogSink};

#[derive(Parser)]
#[command(name = "vessel-api", about = "Vessel registry HTTP server", version)]
struct Cli {
    /// TOML config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// SQLite database file (in-memory when omitted)
    #[arg(long)]
    database: Option<PathBuf>,

    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files (stderr when omitted)
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Seed the sample fleet into an empty registry
    #[arg(long)]
    seed: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<ApiConfig> {
        let mut config = match &self.config {
            Some(path) => ApiConfig::load(path)?,
            None => ApiConfig::default(),
        };
        if let Some(bind) = self.bind {
            config.bind_addr = bind;
        }
        if let Some(database) = self.database {
            config.database_path = Some(database);
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(dir) = self.log_dir {
            config.log_dir = Some(dir);
        }
        config.seed_sample_data |= self.seed;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse().into_config()?;

    init_logging(
        &config.log_level,
        &LogSink::from_dir(config.log_dir.as_deref()),
    )
    .map_err(anyhow::Error::msg)
    .context("failed to initialize logging")?;

    let server = VesselServer::new(config).context("failed to open registry")?;
    server.serve().await?;
    Ok(())
}
