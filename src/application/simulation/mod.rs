//! Random data generation for the dashboards.
//!
//! Every generator takes the random source as an argument so runs can be
//! reproduced from a seed.

pub mod correlation_data;
pub mod customer_data;
pub mod performance_data;

use crate::domain::errors::AnalyticsError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, StandardNormal};

/// Seeded generator when `seed` is set, OS entropy otherwise.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    StandardNormal.sample(rng)
}

/// N(mean, std_dev) sampler; a negative or non-finite `std_dev` is rejected.
pub fn normal_distribution(mean: f64, std_dev: f64) -> Result<Normal<f64>, AnalyticsError> {
    Normal::new(mean, std_dev)
        .map_err(|e| AnalyticsError::invalid_parameter("std_dev", e.to_string()))
}
