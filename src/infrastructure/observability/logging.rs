use crate::config::{LogFormat, ObservabilityEnvConfig};
use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_level` from the config is used.
/// Fails if a subscriber is already installed.
pub fn init_tracing(config: &ObservabilityEnvConfig) -> Result<()> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to install pretty log subscriber")?,
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to install JSON log subscriber")?,
    }
    Ok(())
}

fn build_filter(config: &ObservabilityEnvConfig) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_level))
        .with_context(|| format!("Invalid LOG_LEVEL directive: {}", config.default_level))
}
