use crate::application::simulation::performance_data::{DepartmentDataset, PerformanceDataset};
use crate::config::DashboardEnvConfig;
use crate::domain::playback::QuarterCycle;
use crate::domain::statistics::kpi::{
    Department, Insight, PerformanceKpis, Quarter, ReferenceLine,
};
use crate::domain::statistics::{CurvePoint, bell_curve};
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

/// A reference line together with the share of the fitted distribution below it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceMarker {
    pub line: ReferenceLine,
    pub percentile: f64,
}

/// Everything the bell-curve dashboard displays for one department and quarter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub department: Department,
    pub quarter: Quarter,
    pub headline: String,
    pub kpis: PerformanceKpis,
    pub insights: Vec<Insight>,
    pub reference_markers: Vec<ReferenceMarker>,
    pub curve: Vec<CurvePoint>,
}

/// Builds dashboard reports from a simulated performance dataset.
pub struct PerformanceDashboard {
    config: DashboardEnvConfig,
    dataset: PerformanceDataset,
}

impl PerformanceDashboard {
    pub fn new(config: DashboardEnvConfig, dataset: PerformanceDataset) -> Self {
        Self { config, dataset }
    }

    fn dataset(&self, department: Department, quarter: Quarter) -> Result<&DepartmentDataset> {
        self.dataset
            .get(department, quarter)
            .with_context(|| format!("No data for {} {}", department, quarter))
    }

    pub fn report(&self, department: Department, quarter: Quarter) -> Result<DashboardReport> {
        let data = self.dataset(department, quarter)?;
        let kpis = PerformanceKpis::calculate(&data.params, &data.scores)
            .context("Failed to calculate KPIs")?;

        let curve = bell_curve(
            &data.params,
            self.config.curve_start,
            self.config.curve_points,
            self.config.curve_scale,
        )?;

        let reference_markers = kpis
            .reference_lines()
            .into_iter()
            .map(|line| -> Result<ReferenceMarker> {
                Ok(ReferenceMarker {
                    line,
                    percentile: data.params.percentile(line.score)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let report = DashboardReport {
            department,
            quarter,
            headline: kpis.headline(department, quarter),
            insights: kpis.insights(),
            kpis,
            reference_markers,
            curve,
        };

        debug!(
            "Dashboard: {} {} avg={:.2} low={:.2}% high={:.2}%",
            department,
            quarter,
            report.kpis.average_score,
            report.kpis.low_performers_pct,
            report.kpis.high_performers_pct
        );
        Ok(report)
    }

    /// Reports produced while auto-play runs for `duration_ms`, one per quarter change,
    /// starting with `start`.
    pub fn playback(
        &self,
        department: Department,
        start: Quarter,
        duration_ms: u64,
        tick_ms: u64,
    ) -> Result<Vec<DashboardReport>> {
        let tick_ms = tick_ms.max(1);
        let mut cycle = QuarterCycle::new(self.config.quarter_interval_ms).starting_at(start);
        let mut reports = vec![self.report(department, cycle.quarter)?];

        let mut elapsed = 0;
        while elapsed + tick_ms <= duration_ms {
            let next = cycle.advance(tick_ms);
            if next.quarter != cycle.quarter {
                reports.push(self.report(department, next.quarter)?);
            }
            cycle = next;
            elapsed += tick_ms;
        }

        info!(
            "Dashboard playback: {} over {}ms produced {} reports",
            department,
            duration_ms,
            reports.len()
        );
        Ok(reports)
    }
}
