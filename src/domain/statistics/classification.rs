use super::distribution::DistributionParams;
use crate::domain::errors::{AnalyticsError, ensure_std_dev};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Performer band of a score relative to a one-sigma window around the mean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerformanceBand {
    /// Strictly below mean - std_dev
    Low,
    /// Within [mean - std_dev, mean + std_dev]
    Average,
    /// Strictly above mean + std_dev
    High,
}

impl fmt::Display for PerformanceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformanceBand::Low => write!(f, "Low"),
            PerformanceBand::Average => write!(f, "Average"),
            PerformanceBand::High => write!(f, "High"),
        }
    }
}

/// Classifies `sample` against N(mean, std_dev).
pub fn classify(sample: f64, mean: f64, std_dev: f64) -> Result<PerformanceBand, AnalyticsError> {
    ensure_std_dev(std_dev)?;
    Ok(if sample < mean - std_dev {
        PerformanceBand::Low
    } else if sample > mean + std_dev {
        PerformanceBand::High
    } else {
        PerformanceBand::Average
    })
}

/// Band counts over a sample set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandBreakdown {
    pub low: usize,
    pub average: usize,
    pub high: usize,
}

impl BandBreakdown {
    pub fn from_samples(
        samples: &[f64],
        params: &DistributionParams,
    ) -> Result<Self, AnalyticsError> {
        let mut breakdown = Self::default();
        for &sample in samples {
            match classify(sample, params.mean, params.std_dev)? {
                PerformanceBand::Low => breakdown.low += 1,
                PerformanceBand::Average => breakdown.average += 1,
                PerformanceBand::High => breakdown.high += 1,
            }
        }
        Ok(breakdown)
    }

    pub fn total(&self) -> usize {
        self.low + self.average + self.high
    }

    pub fn count(&self, band: PerformanceBand) -> usize {
        match band {
            PerformanceBand::Low => self.low,
            PerformanceBand::Average => self.average,
            PerformanceBand::High => self.high,
        }
    }

    /// Share of the sample set in `band`, in percent. Zero for an empty set.
    pub fn percentage(&self, band: PerformanceBand) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.count(band) as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_bands() {
        assert_eq!(classify(90.0, 75.0, 5.0).unwrap(), PerformanceBand::High);
        assert_eq!(classify(60.0, 75.0, 5.0).unwrap(), PerformanceBand::Low);
        assert_eq!(classify(75.0, 75.0, 5.0).unwrap(), PerformanceBand::Average);
    }

    #[test]
    fn test_band_edges_are_average() {
        assert_eq!(classify(70.0, 75.0, 5.0).unwrap(), PerformanceBand::Average);
        assert_eq!(classify(80.0, 75.0, 5.0).unwrap(), PerformanceBand::Average);
    }

    #[test]
    fn test_classify_rejects_bad_std_dev() {
        assert!(classify(1.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_breakdown_percentages() {
        let params = DistributionParams::new(75.0, 5.0).unwrap();
        let samples = [60.0, 72.0, 75.0, 78.0, 95.0];
        let breakdown = BandBreakdown::from_samples(&samples, &params).unwrap();

        assert_eq!(breakdown.low, 1);
        assert_eq!(breakdown.average, 3);
        assert_eq!(breakdown.high, 1);
        assert_eq!(breakdown.total(), samples.len());

        let sum = breakdown.percentage(PerformanceBand::Low)
            + breakdown.percentage(PerformanceBand::Average)
            + breakdown.percentage(PerformanceBand::High);
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_breakdown() {
        let params = DistributionParams::new(75.0, 5.0).unwrap();
        let breakdown = BandBreakdown::from_samples(&[], &params).unwrap();
        assert_eq!(breakdown.total(), 0);
        assert_eq!(breakdown.percentage(PerformanceBand::High), 0.0);
    }
}
