use datalens::application::analytics::{
    CorrelationService, PerformanceDashboard, SegmentationService, timeline,
};
use datalens::application::simulation::correlation_data::generate_samples;
use datalens::application::simulation::performance_data::PerformanceDataset;
use datalens::application::simulation::seeded_rng;
use datalens::config::{DashboardEnvConfig, SegmentationEnvConfig};
use datalens::domain::statistics::correlation::CorrelationMethod;
use datalens::domain::statistics::kpi::{Department, Quarter};
use datalens::infrastructure::observability::JsonReporter;

#[test]
fn test_seeded_dashboard_is_reproducible() {
    let build = || {
        let dataset = PerformanceDataset::generate(&mut seeded_rng(Some(99)), 100);
        PerformanceDashboard::new(DashboardEnvConfig::default(), dataset)
            .report(Department::Sales, Quarter::from_index(2))
            .unwrap()
    };
    assert_eq!(build(), build());
}

#[test]
fn test_every_department_and_quarter_reports() {
    let dataset = PerformanceDataset::generate(&mut seeded_rng(Some(5)), 50);
    let dashboard = PerformanceDashboard::new(DashboardEnvConfig::default(), dataset);

    for department in Department::ALL {
        for q in 0..Quarter::COUNT {
            let report = dashboard.report(department, Quarter::from_index(q)).unwrap();
            assert_eq!(report.kpis.breakdown.total(), 50);
            assert!(report.headline.contains(department.label()));
        }
    }
}

#[test]
fn test_segmentation_report_serializes() {
    let service = SegmentationService::new(SegmentationEnvConfig::default());
    let run = service.run(&mut seeded_rng(Some(3))).unwrap();
    let frame = service.frame(&run, Default::default(), 0);

    let mut reporter = JsonReporter::new(Vec::new());
    reporter.emit("segmentation", &run).unwrap();
    reporter.emit("scene_frame", &frame).unwrap();

    let output = String::from_utf8(reporter.into_inner()).unwrap();
    let lines: Vec<serde_json::Value> = output
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["payload"]["segments"].as_array().unwrap().len(), 4);
    assert_eq!(lines[1]["payload"]["points"].as_array().unwrap().len(), 200);
}

#[test]
fn test_pipeline_timeline_finishes() {
    let frames = timeline(1_000, 100, 60_000);
    let last = frames.last().unwrap();
    assert!(last.finished);
    assert_eq!(last.active.len(), 7);
    assert_eq!(last.time_ms, 8_000);
}

#[test]
fn test_correlation_reports_for_all_samples() {
    let samples = generate_samples(&mut seeded_rng(Some(11)), 300).unwrap();
    let reports = CorrelationService::analyze_samples(&samples).unwrap();

    let names: Vec<&str> = reports.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Linear", "Monotonic", "Non-linear"]);
    for report in &reports {
        assert_eq!(report.results.len(), CorrelationMethod::ALL.len());
        assert!(report.results.iter().all(|r| r.coefficient.abs() <= 1.0 + 1e-12));
    }
}
