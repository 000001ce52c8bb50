//! Customer segmentation configuration parsed from environment variables.

use super::parse_env;
use crate::domain::projection::transform::DEFAULT_PERSPECTIVE;
use anyhow::{Result, ensure};

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationEnvConfig {
    pub customers: usize,
    pub segments: usize,
    pub iterations: usize,
    pub perspective: f64,
}

impl Default for SegmentationEnvConfig {
    fn default() -> Self {
        Self {
            customers: 200,
            segments: 4,
            iterations: 5,
            perspective: DEFAULT_PERSPECTIVE,
        }
    }
}

impl SegmentationEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            customers: parse_env("SEGMENTATION_CUSTOMERS", defaults.customers)?,
            segments: parse_env("SEGMENTATION_SEGMENTS", defaults.segments)?,
            iterations: parse_env("KMEANS_ITERATIONS", defaults.iterations)?,
            perspective: parse_env("PROJECTION_PERSPECTIVE", defaults.perspective)?,
        };

        ensure!(config.segments > 0, "SEGMENTATION_SEGMENTS must be at least 1");
        ensure!(
            config.customers >= config.segments,
            "SEGMENTATION_CUSTOMERS ({}) must be at least SEGMENTATION_SEGMENTS ({})",
            config.customers,
            config.segments
        );
        ensure!(
            config.perspective > 0.0,
            "PROJECTION_PERSPECTIVE must be positive"
        );
        Ok(config)
    }
}
