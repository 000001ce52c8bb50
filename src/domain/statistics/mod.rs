// Gaussian density, percentile and bell-curve sampling
pub mod distribution;

// Low / Average / High performer bands
pub mod classification;

// Dashboard KPIs and insight rules
pub mod kpi;

// Paired-sample correlation measures
pub mod correlation;

pub use classification::{BandBreakdown, PerformanceBand, classify};
pub use distribution::{CurvePoint, DistributionParams, bell_curve, normal_density, percentile};
