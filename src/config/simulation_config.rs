use super::parse_env;
use anyhow::{Context, Result};
use std::env;

/// Random data generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationEnvConfig {
    /// Fixed seed for reproducible runs; `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub employees_per_dataset: usize,
}

impl SimulationEnvConfig {
    pub fn from_env() -> Result<Self> {
        let seed = match env::var("SIMULATION_SEED") {
            Ok(value) if !value.trim().is_empty() => Some(
                value
                    .trim()
                    .parse::<u64>()
                    .context("Failed to parse SIMULATION_SEED")?,
            ),
            _ => None,
        };

        Ok(Self {
            seed,
            employees_per_dataset: parse_env("SIMULATION_EMPLOYEES", 100)?,
        })
    }
}
