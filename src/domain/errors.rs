use thiserror::Error;

/// Errors raised by the numeric engines (statistics, clustering, correlation)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    #[error("Standard deviation must be positive and finite, got {std_dev}")]
    InvalidStdDev { std_dev: f64 },

    #[error("Invalid cluster count: k={k} for {points} points (need 1 <= k <= points)")]
    InvalidClusterCount { k: usize, points: usize },

    #[error("Length mismatch: left has {left} observations, right has {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Insufficient data: need at least {needed} observations, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("Input '{name}' is constant, correlation is undefined")]
    ConstantInput { name: String },

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl AnalyticsError {
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Guard shared by every distribution-based operation.
pub fn ensure_std_dev(std_dev: f64) -> Result<(), AnalyticsError> {
    if std_dev.is_finite() && std_dev > 0.0 {
        Ok(())
    } else {
        Err(AnalyticsError::InvalidStdDev { std_dev })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_count_formatting() {
        let error = AnalyticsError::InvalidClusterCount { k: 5, points: 3 };

        let msg = error.to_string();
        assert!(msg.contains("k=5"));
        assert!(msg.contains("3 points"));
    }

    #[test]
    fn test_ensure_std_dev() {
        assert!(ensure_std_dev(1.5).is_ok());
        assert_eq!(
            ensure_std_dev(0.0),
            Err(AnalyticsError::InvalidStdDev { std_dev: 0.0 })
        );
        assert!(ensure_std_dev(-2.0).is_err());
        assert!(ensure_std_dev(f64::NAN).is_err());
        assert!(ensure_std_dev(f64::INFINITY).is_err());
    }
}
