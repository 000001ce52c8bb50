//! Correlation measures for paired samples.
//!
//! This module provides:
//! - Pearson, Spearman and Kendall (tau-b) coefficients with two-sided p-values
//! - Distance correlation (detects non-monotonic dependence, no p-value)
//! - Cramer's V for categorical pairs with a chi-square test
//! - Strength interpretation and equal-frequency binning helpers

use super::distribution::percentile;
use crate::domain::errors::AnalyticsError;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF, StudentsT};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Significance level used for the significant / not significant verdict
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

const MIN_OBSERVATIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorrelationMethod {
    Pearson,
    Spearman,
    Kendall,
    Distance,
}

impl CorrelationMethod {
    pub const ALL: [CorrelationMethod; 4] = [
        CorrelationMethod::Pearson,
        CorrelationMethod::Spearman,
        CorrelationMethod::Kendall,
        CorrelationMethod::Distance,
    ];

    pub fn compute(&self, x: &[f64], y: &[f64]) -> Result<Correlation, AnalyticsError> {
        match self {
            CorrelationMethod::Pearson => pearson(x, y),
            CorrelationMethod::Spearman => spearman(x, y),
            CorrelationMethod::Kendall => kendall_tau(x, y),
            CorrelationMethod::Distance => distance_correlation(x, y),
        }
    }
}

impl fmt::Display for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CorrelationMethod::Pearson => "Pearson",
            CorrelationMethod::Spearman => "Spearman",
            CorrelationMethod::Kendall => "Kendall",
            CorrelationMethod::Distance => "Distance",
        };
        f.write_str(name)
    }
}

/// Qualitative strength of a correlation coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrelationStrength {
    Negligible,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl CorrelationStrength {
    pub fn interpret(coefficient: f64) -> Self {
        let magnitude = coefficient.abs();
        if magnitude < 0.1 {
            CorrelationStrength::Negligible
        } else if magnitude < 0.3 {
            CorrelationStrength::Weak
        } else if magnitude < 0.5 {
            CorrelationStrength::Moderate
        } else if magnitude < 0.7 {
            CorrelationStrength::Strong
        } else {
            CorrelationStrength::VeryStrong
        }
    }
}

impl fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CorrelationStrength::Negligible => "Negligible",
            CorrelationStrength::Weak => "Weak",
            CorrelationStrength::Moderate => "Moderate",
            CorrelationStrength::Strong => "Strong",
            CorrelationStrength::VeryStrong => "Very Strong",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    pub coefficient: f64,
    pub p_value: Option<f64>,
}

impl Correlation {
    pub fn strength(&self) -> CorrelationStrength {
        CorrelationStrength::interpret(self.coefficient)
    }

    /// `None` when the measure has no associated test.
    pub fn is_significant(&self) -> Option<bool> {
        self.p_value.map(|p| p < SIGNIFICANCE_LEVEL)
    }
}

fn check_pair(x: &[f64], y: &[f64]) -> Result<usize, AnalyticsError> {
    if x.len() != y.len() {
        return Err(AnalyticsError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    if x.len() < MIN_OBSERVATIONS {
        return Err(AnalyticsError::InsufficientData {
            needed: MIN_OBSERVATIONS,
            got: x.len(),
        });
    }
    Ok(x.len())
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn pearson_coefficient(x: &[f64], y: &[f64]) -> Result<f64, AnalyticsError> {
    let mean_x = mean(x);
    let mean_y = mean(y);

    let mut numer = 0.0;
    let mut denom_x = 0.0;
    let mut denom_y = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        numer += dx * dy;
        denom_x += dx * dx;
        denom_y += dy * dy;
    }

    if denom_x == 0.0 {
        return Err(AnalyticsError::ConstantInput {
            name: "x".to_string(),
        });
    }
    if denom_y == 0.0 {
        return Err(AnalyticsError::ConstantInput {
            name: "y".to_string(),
        });
    }

    Ok((numer / (denom_x.sqrt() * denom_y.sqrt())).clamp(-1.0, 1.0))
}

/// Two-sided p-value of a correlation coefficient under the t distribution
/// with n - 2 degrees of freedom.
fn t_test_p_value(r: f64, n: usize) -> Result<f64, AnalyticsError> {
    let dof = (n - 2) as f64;
    let remainder = 1.0 - r * r;
    if remainder <= 0.0 {
        return Ok(0.0);
    }
    let t = r * (dof / remainder).sqrt();
    let dist = StudentsT::new(0.0, 1.0, dof)
        .map_err(|e| AnalyticsError::invalid_parameter("degrees_of_freedom", e.to_string()))?;
    Ok((2.0 * dist.sf(t.abs())).min(1.0))
}

/// Pearson product-moment correlation.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<Correlation, AnalyticsError> {
    let n = check_pair(x, y)?;
    let r = pearson_coefficient(x, y)?;
    Ok(Correlation {
        coefficient: r,
        p_value: Some(t_test_p_value(r, n)?),
    })
}

/// 1-based ranks with ties sharing their average rank.
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // positions start..end share ranks start+1..=end
        let shared = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = shared;
        }
        start = end;
    }
    ranks
}

/// Spearman rank correlation: Pearson over average ranks.
pub fn spearman(x: &[f64], y: &[f64]) -> Result<Correlation, AnalyticsError> {
    let n = check_pair(x, y)?;
    let rho = pearson_coefficient(&average_ranks(x), &average_ranks(y))?;
    Ok(Correlation {
        coefficient: rho,
        p_value: Some(t_test_p_value(rho, n)?),
    })
}

/// Kendall tau-b with a normal-approximation two-sided p-value.
pub fn kendall_tau(x: &[f64], y: &[f64]) -> Result<Correlation, AnalyticsError> {
    let n = check_pair(x, y)?;

    let mut concordant = 0i64;
    let mut discordant = 0i64;
    let mut ties_x = 0i64;
    let mut ties_y = 0i64;

    for i in 0..n {
        for j in (i + 1)..n {
            let dx = x[i] - x[j];
            let dy = y[i] - y[j];
            if dx == 0.0 && dy == 0.0 {
                ties_x += 1;
                ties_y += 1;
            } else if dx == 0.0 {
                ties_x += 1;
            } else if dy == 0.0 {
                ties_y += 1;
            } else if (dx > 0.0) == (dy > 0.0) {
                concordant += 1;
            } else {
                discordant += 1;
            }
        }
    }

    let pairs = (n * (n - 1) / 2) as i64;
    if ties_x == pairs {
        return Err(AnalyticsError::ConstantInput {
            name: "x".to_string(),
        });
    }
    if ties_y == pairs {
        return Err(AnalyticsError::ConstantInput {
            name: "y".to_string(),
        });
    }

    let tau = tau_b(concordant - discordant, pairs, ties_x, ties_y);

    let nf = n as f64;
    let variance = 2.0 * (2.0 * nf + 5.0) / (9.0 * nf * (nf - 1.0));
    let z = tau / variance.sqrt();
    let p_value = (2.0 * (1.0 - percentile(z.abs(), 0.0, 1.0)?)).clamp(0.0, 1.0);

    Ok(Correlation {
        coefficient: tau,
        p_value: Some(p_value),
    })
}

/// Pair counts can reach n^2 / 2, so the product is taken in floating point.
fn tau_b(score: i64, pairs: i64, ties_x: i64, ties_y: i64) -> f64 {
    let denom = ((pairs - ties_x) as f64 * (pairs - ties_y) as f64).sqrt();
    (score as f64 / denom).clamp(-1.0, 1.0)
}

/// Double-centred pairwise distance matrix, stored row-major.
fn centred_distances(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut matrix = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            matrix[i * n + j] = (values[i] - values[j]).abs();
        }
    }

    let row_means: Vec<f64> = (0..n)
        .map(|i| matrix[i * n..(i + 1) * n].iter().sum::<f64>() / n as f64)
        .collect();
    let grand_mean = row_means.iter().sum::<f64>() / n as f64;

    // Distance matrices are symmetric, so column means equal row means.
    for i in 0..n {
        for j in 0..n {
            matrix[i * n + j] += grand_mean - row_means[i] - row_means[j];
        }
    }
    matrix
}

/// Distance correlation in [0, 1]; zero only under independence.
pub fn distance_correlation(x: &[f64], y: &[f64]) -> Result<Correlation, AnalyticsError> {
    let n = check_pair(x, y)?;
    let a = centred_distances(x);
    let b = centred_distances(y);

    let n2 = (n * n) as f64;
    let dcov_xy = a.iter().zip(&b).map(|(ai, bi)| ai * bi).sum::<f64>() / n2;
    let dvar_x = a.iter().map(|ai| ai * ai).sum::<f64>() / n2;
    let dvar_y = b.iter().map(|bi| bi * bi).sum::<f64>() / n2;

    let denom = (dvar_x * dvar_y).sqrt();
    let coefficient = if denom > 0.0 {
        (dcov_xy.max(0.0) / denom).sqrt().min(1.0)
    } else {
        0.0
    };

    Ok(Correlation {
        coefficient,
        p_value: None,
    })
}

/// Counts of co-occurring category labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContingencyTable {
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    pub counts: Vec<Vec<usize>>,
}

impl ContingencyTable {
    pub fn from_pairs<A, B>(x: &[A], y: &[B]) -> Result<Self, AnalyticsError>
    where
        A: Ord + Clone + ToString,
        B: Ord + Clone + ToString,
    {
        if x.len() != y.len() {
            return Err(AnalyticsError::LengthMismatch {
                left: x.len(),
                right: y.len(),
            });
        }

        let rows: BTreeMap<A, usize> = x
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .enumerate()
            .map(|(i, label)| (label, i))
            .collect();
        let columns: BTreeMap<B, usize> = y
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .enumerate()
            .map(|(i, label)| (label, i))
            .collect();

        let mut counts = vec![vec![0; columns.len()]; rows.len()];
        for (a, b) in x.iter().zip(y) {
            counts[rows[a]][columns[b]] += 1;
        }

        Ok(Self {
            row_labels: rows.keys().map(|k| k.to_string()).collect(),
            column_labels: columns.keys().map(|k| k.to_string()).collect(),
            counts,
        })
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Cell proportions of the grand total.
    pub fn proportions(&self) -> Vec<Vec<f64>> {
        let total = self.total().max(1) as f64;
        self.counts
            .iter()
            .map(|row| row.iter().map(|&c| c as f64 / total).collect())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CramersV {
    pub statistic: f64,
    pub chi_square: f64,
    pub degrees_of_freedom: usize,
    pub p_value: f64,
    pub table: ContingencyTable,
}

impl CramersV {
    pub fn is_significant(&self) -> bool {
        self.p_value < SIGNIFICANCE_LEVEL
    }
}

/// Cramer's V association between two categorical series. A 2x2 table gets
/// Yates' continuity correction in its chi-square statistic.
pub fn cramers_v<A, B>(x: &[A], y: &[B]) -> Result<CramersV, AnalyticsError>
where
    A: Ord + Clone + ToString,
    B: Ord + Clone + ToString,
{
    let table = ContingencyTable::from_pairs(x, y)?;
    let rows = table.row_labels.len();
    let cols = table.column_labels.len();
    if rows < 2 || cols < 2 {
        return Err(AnalyticsError::invalid_parameter(
            "contingency_table",
            format!("need at least 2x2 categories, got {}x{}", rows, cols),
        ));
    }

    let total = table.total() as f64;
    let row_sums: Vec<f64> = table
        .counts
        .iter()
        .map(|row| row.iter().sum::<usize>() as f64)
        .collect();
    let col_sums: Vec<f64> = (0..cols)
        .map(|j| table.counts.iter().map(|row| row[j]).sum::<usize>() as f64)
        .collect();

    let dof = (rows - 1) * (cols - 1);
    let mut chi_square = 0.0;
    for (i, row) in table.counts.iter().enumerate() {
        for (j, &observed) in row.iter().enumerate() {
            let expected = row_sums[i] * col_sums[j] / total;
            let mut diff = (observed as f64 - expected).abs();
            if dof == 1 {
                diff = (diff - 0.5).max(0.0);
            }
            chi_square += diff * diff / expected;
        }
    }

    let dist = ChiSquared::new(dof as f64)
        .map_err(|e| AnalyticsError::invalid_parameter("degrees_of_freedom", e.to_string()))?;
    let p_value = dist.sf(chi_square);

    let min_dim = (rows.min(cols) - 1) as f64;
    let statistic = (chi_square / (total * min_dim)).sqrt();

    Ok(CramersV {
        statistic,
        chi_square,
        degrees_of_freedom: dof,
        p_value,
        table,
    })
}

/// Assigns each value to one of `bins` equal-frequency bins by rank order.
pub fn quantile_bins(values: &[f64], bins: usize) -> Result<Vec<usize>, AnalyticsError> {
    if bins == 0 {
        return Err(AnalyticsError::invalid_parameter("bins", "must be at least 1"));
    }
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut assignment = vec![0; n];
    for (position, idx) in order.into_iter().enumerate() {
        assignment[idx] = position * bins / n;
    }
    Ok(assignment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pearson_perfect_linear() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 6.0, 8.0, 10.0];
        let result = pearson(&x, &y).unwrap();
        assert!((result.coefficient - 1.0).abs() < 1e-12);
        assert!(result.p_value.unwrap() < 1e-10);
        assert_eq!(result.strength(), CorrelationStrength::VeryStrong);
    }

    #[test]
    fn test_pearson_rejects_mismatch_and_constant() {
        assert_eq!(
            pearson(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
            Err(AnalyticsError::LengthMismatch { left: 3, right: 2 })
        );
        assert!(matches!(
            pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]),
            Err(AnalyticsError::ConstantInput { .. })
        ));
        assert!(matches!(
            pearson(&[1.0, 2.0], &[1.0, 2.0]),
            Err(AnalyticsError::InsufficientData { needed: 3, got: 2 })
        ));
    }

    #[test]
    fn test_pearson_p_value_matches_reference() {
        // scipy.stats.pearsonr gives r = 0.8, p = 0.104088
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 1.0, 4.0, 3.0, 5.0];
        let result = pearson(&x, &y).unwrap();
        assert!((result.coefficient - 0.8).abs() < 1e-9);
        let p = result.p_value.unwrap();
        assert!((p - 0.104088).abs() < 1e-4, "p = {}", p);
    }

    #[test]
    fn test_average_ranks_with_ties() {
        let ranks = average_ranks(&[10.0, 20.0, 20.0, 5.0]);
        assert_eq!(ranks, vec![2.0, 3.5, 3.5, 1.0]);
    }

    #[test]
    fn test_spearman_monotonic() {
        let x: Vec<f64> = (1..=10).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| v.powi(3)).collect();
        let result = spearman(&x, &y).unwrap();
        assert!((result.coefficient - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_kendall_reversed() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let y = [6.0, 5.0, 4.0, 3.0, 2.0, 1.0];
        let result = kendall_tau(&x, &y).unwrap();
        assert!((result.coefficient + 1.0).abs() < 1e-12);
        assert!(result.is_significant().unwrap());
    }

    #[test]
    fn test_tau_b_large_pair_counts() {
        // 80k tie-free observations
        let n: i64 = 80_000;
        let pairs = n * (n - 1) / 2;
        assert!((tau_b(pairs, pairs, 0, 0) - 1.0).abs() < 1e-12);
        assert!((tau_b(-pairs, pairs, 0, 0) + 1.0).abs() < 1e-12);

        let partial = tau_b(pairs / 2, pairs, 1_000, 0);
        assert!(partial.is_finite());
        assert!(partial > 0.49 && partial < 0.51);
    }

    #[test]
    fn test_distance_correlation_detects_parabola() {
        let x: Vec<f64> = (-10..=10).map(|i| i as f64 / 10.0).collect();
        let y: Vec<f64> = x.iter().map(|v| v * v).collect();

        let linear = pearson(&x, &y).unwrap();
        assert!(linear.coefficient.abs() < 1e-9);

        let dcor = distance_correlation(&x, &y).unwrap();
        assert!(dcor.coefficient > 0.4);
        assert!(dcor.p_value.is_none());
        assert!(dcor.is_significant().is_none());
    }

    #[test]
    fn test_distance_correlation_identity() {
        let x = [1.0, 3.0, 2.0, 7.0, 5.0];
        let dcor = distance_correlation(&x, &x).unwrap();
        assert!((dcor.coefficient - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_interpretation_thresholds() {
        assert_eq!(CorrelationStrength::interpret(0.05), CorrelationStrength::Negligible);
        assert_eq!(CorrelationStrength::interpret(-0.2), CorrelationStrength::Weak);
        assert_eq!(CorrelationStrength::interpret(0.3), CorrelationStrength::Moderate);
        assert_eq!(CorrelationStrength::interpret(0.69), CorrelationStrength::Strong);
        assert_eq!(CorrelationStrength::interpret(-0.7), CorrelationStrength::VeryStrong);
        assert_eq!(CorrelationStrength::VeryStrong.to_string(), "Very Strong");
    }

    #[test]
    fn test_cramers_v_perfect_association() {
        let x = ["A", "A", "B", "B", "C", "C"].repeat(5);
        let y = ["Low", "Low", "Mid", "Mid", "High", "High"].repeat(5);
        let result = cramers_v(&x, &y).unwrap();
        assert!((result.statistic - 1.0).abs() < 1e-9);
        assert_eq!(result.degrees_of_freedom, 4);
        assert!(result.is_significant());
        assert_eq!(result.table.total(), 30);
    }

    #[test]
    fn test_cramers_v_needs_two_categories() {
        let x = ["A", "A", "A"];
        let y = ["L", "M", "H"];
        assert!(cramers_v(&x, &y).is_err());
    }

    #[test]
    fn test_quantile_bins() {
        let values = [5.0, 1.0, 4.0, 2.0, 3.0, 6.0, 8.0, 7.0];
        let bins = quantile_bins(&values, 4).unwrap();
        assert_eq!(bins, vec![2, 0, 1, 0, 1, 2, 3, 3]);
        assert!(quantile_bins(&values, 0).is_err());
    }
}
