//! Performance dashboard configuration parsed from environment variables.

use super::parse_env;
use crate::domain::playback::process_pipeline::DEFAULT_STEP_INTERVAL_MS;
use crate::domain::playback::quarter_cycle::DEFAULT_QUARTER_INTERVAL_MS;
use anyhow::{Result, ensure};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardEnvConfig {
    /// First score on the bell-curve x axis.
    pub curve_start: f64,
    pub curve_points: usize,
    /// Display multiplier applied to densities.
    pub curve_scale: f64,
    pub quarter_interval_ms: u64,
    pub step_interval_ms: u64,
}

impl Default for DashboardEnvConfig {
    fn default() -> Self {
        Self {
            curve_start: 30.0,
            curve_points: 100,
            curve_scale: 1000.0,
            quarter_interval_ms: DEFAULT_QUARTER_INTERVAL_MS,
            step_interval_ms: DEFAULT_STEP_INTERVAL_MS,
        }
    }
}

impl DashboardEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            curve_start: parse_env("DASHBOARD_CURVE_START", defaults.curve_start)?,
            curve_points: parse_env("DASHBOARD_CURVE_POINTS", defaults.curve_points)?,
            curve_scale: parse_env("DASHBOARD_CURVE_SCALE", defaults.curve_scale)?,
            quarter_interval_ms: parse_env(
                "DASHBOARD_QUARTER_INTERVAL_MS",
                defaults.quarter_interval_ms,
            )?,
            step_interval_ms: parse_env("DASHBOARD_STEP_INTERVAL_MS", defaults.step_interval_ms)?,
        };

        ensure!(
            config.quarter_interval_ms > 0,
            "DASHBOARD_QUARTER_INTERVAL_MS must be positive"
        );
        ensure!(
            config.step_interval_ms > 0,
            "DASHBOARD_STEP_INTERVAL_MS must be positive"
        );
        Ok(config)
    }
}
