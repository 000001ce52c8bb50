//! Configuration module for Datalens.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by component: Dashboard, Segmentation, Simulation, and Observability.

mod dashboard_config;
mod observability_config;
mod segmentation_config;
mod simulation_config;

pub use dashboard_config::DashboardEnvConfig;
pub use observability_config::{LogFormat, ObservabilityEnvConfig};
pub use segmentation_config::SegmentationEnvConfig;
pub use simulation_config::SimulationEnvConfig;

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Reads `key` from the environment, falling back to `default` when unset.
pub(crate) fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr + ToString,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .trim()
        .parse::<T>()
        .context(format!("Failed to parse {}", key))
}

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub dashboard: DashboardEnvConfig,
    pub segmentation: SegmentationEnvConfig,
    pub simulation: SimulationEnvConfig,
    pub observability: ObservabilityEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Missing variables take their defaults; malformed ones are errors.
    pub fn from_env() -> Result<Self> {
        let dashboard = DashboardEnvConfig::from_env().context("Failed to load dashboard config")?;
        let segmentation =
            SegmentationEnvConfig::from_env().context("Failed to load segmentation config")?;
        let simulation =
            SimulationEnvConfig::from_env().context("Failed to load simulation config")?;
        let observability =
            ObservabilityEnvConfig::from_env().context("Failed to load observability config")?;

        Ok(Self {
            dashboard,
            segmentation,
            simulation,
            observability,
        })
    }
}
