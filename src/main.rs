use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use meteora_radar::agent::lifecycle;
use meteora_radar::config::{AppConfig, DEFAULT_CONFIG_PATH};
use meteora_radar::monitoring::logger;

#[derive(Debug, Parser)]
#[command(version, about = "Ranks Meteora DLMM pools for a token by fees/liquidity")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let (config, secrets) = AppConfig::load(&args.config)?;

    logger::init_logging(&config.monitoring)?;

    tracing::info!(
        config = %args.config.display(),
        sources = config.sources.len(),
        "MeteoraRadar starting"
    );

    lifecycle::run(config, secrets).await
}
