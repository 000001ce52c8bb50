//! Gaussian distribution helpers used by the performance bell curve.
//!
//! Provides:
//! - Probability density of a normal distribution
//! - Cumulative percentile via a fast error-function approximation
//! - Bell-curve series sampling for charting

use crate::domain::errors::{AnalyticsError, ensure_std_dev};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, SQRT_2};

/// Chebyshev coefficients of the complementary error function fit
/// (fractional error below 1.2e-7 everywhere).
const ERFC_COEFFICIENTS: [f64; 10] = [
    -1.26551223,
    1.00002368,
    0.37409196,
    0.09678418,
    -0.18628806,
    0.27886807,
    -1.13520398,
    1.48851587,
    -0.82215223,
    0.17087277,
];

/// Mean and standard deviation of a normal distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionParams {
    pub mean: f64,
    pub std_dev: f64,
}

impl DistributionParams {
    /// Creates validated parameters (`std_dev` must be positive and finite).
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, AnalyticsError> {
        ensure_std_dev(std_dev)?;
        Ok(Self { mean, std_dev })
    }

    pub fn density(&self, x: f64) -> Result<f64, AnalyticsError> {
        normal_density(x, self.mean, self.std_dev)
    }

    pub fn percentile(&self, x: f64) -> Result<f64, AnalyticsError> {
        percentile(x, self.mean, self.std_dev)
    }
}

/// Probability density of N(mean, std_dev) at `x`.
///
/// # Errors
/// `InvalidStdDev` when `std_dev` is not strictly positive and finite.
pub fn normal_density(x: f64, mean: f64, std_dev: f64) -> Result<f64, AnalyticsError> {
    ensure_std_dev(std_dev)?;
    let z = (x - mean) / std_dev;
    Ok((1.0 / (std_dev * (2.0 * PI).sqrt())) * (-0.5 * z * z).exp())
}

/// Error function approximation evaluated with Horner's scheme over
/// `t = 1 / (1 + |z| / 2)`.
pub fn erf(z: f64) -> f64 {
    let t = 1.0 / (1.0 + 0.5 * z.abs());
    let poly = ERFC_COEFFICIENTS
        .iter()
        .rev()
        .fold(0.0, |acc, &coefficient| acc * t + coefficient);
    // The fit overshoots 1 by ~3e-8 at the origin; capping keeps erf odd and monotone.
    let tau = (t * (-z * z + poly).exp()).min(1.0);

    if z >= 0.0 { 1.0 - tau } else { tau - 1.0 }
}

/// Cumulative probability of N(mean, std_dev) up to `x`, clamped to [0, 1].
///
/// # Errors
/// `InvalidStdDev` when `std_dev` is not strictly positive and finite.
pub fn percentile(x: f64, mean: f64, std_dev: f64) -> Result<f64, AnalyticsError> {
    ensure_std_dev(std_dev)?;
    let cdf = 0.5 * (1.0 + erf((x - mean) / (std_dev * SQRT_2)));
    Ok(cdf.clamp(0.0, 1.0))
}

/// One sample of a charted density curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

/// Samples the density at `count` integer-spaced scores starting at `x_start`,
/// scaling every density by `y_scale` for display.
pub fn bell_curve(
    params: &DistributionParams,
    x_start: f64,
    count: usize,
    y_scale: f64,
) -> Result<Vec<CurvePoint>, AnalyticsError> {
    (0..count)
        .map(|i| {
            let x = x_start + i as f64;
            Ok(CurvePoint {
                x,
                y: params.density(x)? * y_scale,
            })
        })
        .collect()
}
