//! Services that compose the statistics, clustering and projection engines
//! into dashboard-ready reports.

pub mod correlation_service;
pub mod dashboard_service;
pub mod pipeline_service;
pub mod segmentation_service;

pub use correlation_service::{CorrelationReport, CorrelationService, MethodResult};
pub use dashboard_service::{DashboardReport, PerformanceDashboard, ReferenceMarker};
pub use pipeline_service::{PipelineFrame, timeline};
pub use segmentation_service::{
    ScatterPoint, SceneFrame, SegmentSummary, SegmentationRun, SegmentationService,
};
