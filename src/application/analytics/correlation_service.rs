use crate::application::simulation::correlation_data::CorrelationSample;
use crate::domain::statistics::correlation::{
    CorrelationMethod, CorrelationStrength, CramersV, cramers_v, quantile_bins,
};
use anyhow::{Context, Result, ensure};
use serde::Serialize;
use tracing::debug;

const QUARTILE_LABELS: [&str; 4] = ["A", "B", "C", "D"];
const TERCILE_LABELS: [&str; 3] = ["Low", "Medium", "High"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodResult {
    pub method: CorrelationMethod,
    pub coefficient: f64,
    pub p_value: Option<f64>,
    pub significant: Option<bool>,
    pub strength: CorrelationStrength,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationReport {
    pub name: String,
    pub results: Vec<MethodResult>,
}

impl CorrelationReport {
    pub fn result(&self, method: CorrelationMethod) -> Option<&MethodResult> {
        self.results.iter().find(|r| r.method == method)
    }
}

pub struct CorrelationService;

impl CorrelationService {
    /// Runs every correlation method on one pair of series.
    pub fn analyze(name: &str, x: &[f64], y: &[f64]) -> Result<CorrelationReport> {
        let results = CorrelationMethod::ALL
            .iter()
            .map(|method| -> Result<MethodResult> {
                let correlation = method
                    .compute(x, y)
                    .with_context(|| format!("{} correlation failed for {}", method, name))?;
                debug!("{}: {} = {:.4}", name, method, correlation.coefficient);
                Ok(MethodResult {
                    method: *method,
                    coefficient: correlation.coefficient,
                    p_value: correlation.p_value,
                    significant: correlation.is_significant(),
                    strength: correlation.strength(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CorrelationReport {
            name: name.to_string(),
            results,
        })
    }

    pub fn analyze_samples(samples: &[CorrelationSample]) -> Result<Vec<CorrelationReport>> {
        samples
            .iter()
            .map(|s| Self::analyze(s.relationship.label(), &s.x, &s.y))
            .collect()
    }

    /// Cramer's V after binning `x` into quartiles (A-D) and `y` into terciles
    /// (Low/Medium/High).
    pub fn categorical_association(x: &[f64], y: &[f64]) -> Result<CramersV> {
        ensure!(
            x.len() == y.len(),
            "Series lengths differ: {} vs {}",
            x.len(),
            y.len()
        );
        let x_bins = quantile_bins(x, QUARTILE_LABELS.len())?;
        let y_bins = quantile_bins(y, TERCILE_LABELS.len())?;

        let x_labels: Vec<&str> = x_bins.iter().map(|&b| QUARTILE_LABELS[b]).collect();
        // Category order follows bin order rather than label spelling.
        let y_keys: Vec<TercileLabel> = y_bins
            .iter()
            .map(|&b| TercileLabel(b, TERCILE_LABELS[b]))
            .collect();

        cramers_v(&x_labels, &y_keys).context("Cramer's V failed")
    }
}

/// Orders by bin index, displays as the bin name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct TercileLabel(usize, &'static str);

impl std::fmt::Display for TercileLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::simulation::correlation_data::generate_samples;
    use crate::application::simulation::seeded_rng;

    #[test]
    fn test_linear_sample_is_very_strong() {
        let samples = generate_samples(&mut seeded_rng(Some(42)), 1000).unwrap();
        let reports = CorrelationService::analyze_samples(&samples).unwrap();
        assert_eq!(reports.len(), 3);

        let linear = &reports[0];
        assert_eq!(linear.name, "Linear");
        let pearson = linear.result(CorrelationMethod::Pearson).unwrap();
        assert_eq!(pearson.strength, CorrelationStrength::VeryStrong);
        assert_eq!(pearson.significant, Some(true));

        let distance = linear.result(CorrelationMethod::Distance).unwrap();
        assert!(distance.p_value.is_none());
    }

    #[test]
    fn test_parabola_found_by_distance_not_pearson() {
        let samples = generate_samples(&mut seeded_rng(Some(42)), 500).unwrap();
        let report = CorrelationService::analyze("Monotonic", &samples[1].x, &samples[1].y).unwrap();
        let pearson = report.result(CorrelationMethod::Pearson).unwrap();
        let distance = report.result(CorrelationMethod::Distance).unwrap();
        assert!(pearson.coefficient.abs() < 0.2);
        assert!(distance.coefficient > 0.3);
    }

    #[test]
    fn test_categorical_association() {
        let samples = generate_samples(&mut seeded_rng(Some(42)), 1000).unwrap();
        let result =
            CorrelationService::categorical_association(&samples[0].x, &samples[0].y).unwrap();
        assert_eq!(result.table.row_labels, vec!["A", "B", "C", "D"]);
        assert_eq!(result.table.column_labels, vec!["Low", "Medium", "High"]);
        assert_eq!(result.degrees_of_freedom, 6);
        assert!(result.statistic > 0.5);
        assert!(result.is_significant());
    }

    #[test]
    fn test_errors_carry_context() {
        let err = CorrelationService::analyze("short", &[1.0, 2.0], &[1.0, 2.0]).unwrap_err();
        assert!(err.to_string().contains("Pearson correlation failed for short"));
    }
}
