//! Dashboard KPIs derived from a department's score distribution.
//!
//! The insight rules flag three conditions, each with a chart annotation and
//! a follow-up action:
//! - more than 30% underperformers
//! - fewer than 10% top performers
//! - a standard deviation above 10 points

use super::classification::{BandBreakdown, PerformanceBand};
use super::distribution::DistributionParams;
use crate::domain::errors::AnalyticsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const UNDERPERFORMANCE_ALERT_PCT: f64 = 30.0;
pub const TOP_PERFORMANCE_ALERT_PCT: f64 = 30.0;
pub const FEW_TOP_PERFORMERS_PCT: f64 = 10.0;
pub const HIGH_VARIABILITY_THRESHOLD: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Engineering,
    Sales,
    Marketing,
    CustomerSupport,
}

impl Department {
    pub const ALL: [Department; 4] = [
        Department::Engineering,
        Department::Sales,
        Department::Marketing,
        Department::CustomerSupport,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Department::Engineering => "Engineering",
            Department::Sales => "Sales",
            Department::Marketing => "Marketing",
            Department::CustomerSupport => "Customer Support",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|d| d == self).unwrap_or(0)
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Department {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "engineering" => Ok(Department::Engineering),
            "sales" => Ok(Department::Sales),
            "marketing" => Ok(Department::Marketing),
            "customersupport" | "support" => Ok(Department::CustomerSupport),
            _ => anyhow::bail!(
                "Invalid department: {}. Must be 'engineering', 'sales', 'marketing', or 'customer-support'",
                s
            ),
        }
    }
}

/// Reporting quarter, Q1..Q4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quarter(u8);

impl Quarter {
    pub const COUNT: usize = 4;

    /// Quarter from a zero-based index, wrapping modulo 4.
    pub fn from_index(index: usize) -> Self {
        Self((index % Self::COUNT) as u8)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn next(&self) -> Self {
        Self::from_index(self.index() + 1)
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0 + 1)
    }
}

/// A flagged condition, anchored at a score on the chart's x axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub message: String,
    pub anchor_score: f64,
    pub action: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceKind {
    Under,
    Core,
    Top,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub kind: ReferenceKind,
    pub score: f64,
}

/// Summary statistics shown on the performance dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceKpis {
    pub average_score: f64,
    pub variability: f64,
    pub high_performers_pct: f64,
    pub average_performers_pct: f64,
    pub low_performers_pct: f64,
    pub breakdown: BandBreakdown,
}

impl PerformanceKpis {
    pub fn calculate(
        params: &DistributionParams,
        scores: &[f64],
    ) -> Result<Self, AnalyticsError> {
        let breakdown = BandBreakdown::from_samples(scores, params)?;
        Ok(Self {
            average_score: params.mean,
            variability: params.std_dev,
            high_performers_pct: breakdown.percentage(PerformanceBand::High),
            average_performers_pct: breakdown.percentage(PerformanceBand::Average),
            low_performers_pct: breakdown.percentage(PerformanceBand::Low),
            breakdown,
        })
    }

    pub fn insights(&self) -> Vec<Insight> {
        let mut insights = Vec::new();

        if self.low_performers_pct > UNDERPERFORMANCE_ALERT_PCT {
            insights.push(Insight {
                message: "High number of underperformers".to_string(),
                anchor_score: self.average_score - self.variability,
                action: "Implement targeted training programs for underperformers".to_string(),
            });
        }
        if self.high_performers_pct < FEW_TOP_PERFORMERS_PCT {
            insights.push(Insight {
                message: "Few top performers identified".to_string(),
                anchor_score: self.average_score + self.variability,
                action: "Develop strategies to identify and nurture potential top performers"
                    .to_string(),
            });
        }
        if self.variability > HIGH_VARIABILITY_THRESHOLD {
            insights.push(Insight {
                message: "High performance variability".to_string(),
                anchor_score: self.average_score,
                action: "Investigate causes of high performance variability and standardize best practices"
                    .to_string(),
            });
        }

        insights
    }

    pub fn headline(&self, department: Department, quarter: Quarter) -> String {
        let mut title = format!(
            "{} Department - {} Performance Highlights",
            department, quarter
        );
        if self.low_performers_pct > UNDERPERFORMANCE_ALERT_PCT {
            title.push_str(": High Underperformance Identified");
        } else if self.high_performers_pct > TOP_PERFORMANCE_ALERT_PCT {
            title.push_str(": Strong Top Performance Noted");
        }
        title
    }

    pub fn reference_lines(&self) -> [ReferenceLine; 3] {
        [
            ReferenceLine {
                kind: ReferenceKind::Under,
                score: self.average_score - self.variability,
            },
            ReferenceLine {
                kind: ReferenceKind::Core,
                score: self.average_score,
            },
            ReferenceLine {
                kind: ReferenceKind::Top,
                score: self.average_score + self.variability,
            },
        ]
    }
}
