use anyhow::{Context, ensure};
use clap::{Parser, Subcommand};
use datalens::application::analytics::{
    CorrelationReport, CorrelationService, DashboardReport, PerformanceDashboard, PipelineFrame,
    SegmentationRun, SegmentationService, timeline,
};
use datalens::application::simulation::correlation_data::generate_samples;
use datalens::application::simulation::performance_data::PerformanceDataset;
use datalens::application::simulation::seeded_rng;
use datalens::config::Config;
use datalens::domain::statistics::kpi::{Department, Quarter};
use datalens::infrastructure::observability::{JsonReporter, init_tracing};
use serde::Serialize;
use tracing::info;

#[derive(Parser)]
#[command(name = "datalens", author, version, about = "Statistical dashboards from simulated data", long_about = None)]
struct Cli {
    /// Seed for reproducible data (overrides SIMULATION_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Emit JSON reports instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bell-curve performance dashboard for one department
    Dashboard {
        /// engineering, marketing, sales or customer-support
        #[arg(short, long, default_value = "engineering")]
        department: String,

        /// Quarter (1-4)
        #[arg(short, long, default_value_t = 1)]
        quarter: u8,

        /// Auto-play through quarters for this many milliseconds, starting at --quarter
        #[arg(long)]
        playback_ms: Option<u64>,
    },
    /// k-means customer segmentation with a rotating 3D projection
    Segmentation {
        /// Animation length in milliseconds (0 renders a single frame)
        #[arg(long, default_value_t = 0)]
        duration_ms: u64,

        /// Time between animation frames
        #[arg(long, default_value_t = 100)]
        frame_ms: u64,
    },
    /// Step-by-step semantic search process diagram
    Pipeline {
        #[arg(long, default_value_t = 100)]
        tick_ms: u64,

        #[arg(long, default_value_t = 60_000)]
        max_ms: u64,
    },
    /// Correlation methods compared on generated sample pairs
    Correlation {
        /// Observations per sample
        #[arg(short, long, default_value_t = 1000)]
        samples: usize,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(&config.observability)?;

    let seed = cli.seed.or(config.simulation.seed);
    let mut rng = seeded_rng(seed);
    info!("Datalens starting (seed: {:?})", seed);

    match cli.command {
        Commands::Dashboard {
            department,
            quarter,
            playback_ms,
        } => {
            let department: Department = department.parse()?;
            ensure!(
                (1..=4).contains(&quarter),
                "Quarter must be between 1 and 4, got: {}",
                quarter
            );
            let quarter = Quarter::from_index(usize::from(quarter - 1));

            let dataset =
                PerformanceDataset::generate(&mut rng, config.simulation.employees_per_dataset);
            let dashboard = PerformanceDashboard::new(config.dashboard.clone(), dataset);

            let reports = match playback_ms {
                Some(duration) => dashboard.playback(department, quarter, duration, 100)?,
                None => vec![dashboard.report(department, quarter)?],
            };
            if cli.json {
                emit_all("dashboard", &reports)?;
            } else {
                reports.iter().for_each(print_dashboard);
            }
        }
        Commands::Segmentation {
            duration_ms,
            frame_ms,
        } => {
            let service = SegmentationService::new(config.segmentation.clone());
            let run = service.run(&mut rng)?;
            if cli.json {
                let mut reporter = JsonReporter::stdout();
                reporter.emit("segmentation", &run)?;
                for frame in service.animate(&run, duration_ms, frame_ms) {
                    reporter.emit("scene_frame", &frame)?;
                }
            } else {
                print_segmentation(&run);
                for frame in service.animate(&run, duration_ms, frame_ms) {
                    println!(
                        "t={:>6}ms rotation=({:.1}, {:.1}, {:.1}) points={}",
                        frame.time_ms,
                        frame.rotation.x,
                        frame.rotation.y,
                        frame.rotation.z,
                        frame.points.len()
                    );
                }
            }
        }
        Commands::Pipeline { tick_ms, max_ms } => {
            let frames = timeline(config.dashboard.step_interval_ms, tick_ms, max_ms);
            if cli.json {
                emit_all("pipeline_frame", &frames)?;
            } else {
                frames.iter().for_each(print_pipeline_frame);
            }
        }
        Commands::Correlation { samples } => {
            let data = generate_samples(&mut rng, samples)?;
            let reports = CorrelationService::analyze_samples(&data)?;
            let association = CorrelationService::categorical_association(&data[0].x, &data[0].y)?;
            if cli.json {
                let mut reporter = JsonReporter::stdout();
                for report in &reports {
                    reporter.emit("correlation", report)?;
                }
                reporter.emit("cramers_v", &association)?;
            } else {
                reports.iter().for_each(print_correlation);
                println!(
                    "Cramer's V (Linear, binned): {:.4} (chi2 = {:.2}, dof = {}, p = {:.4})",
                    association.statistic,
                    association.chi_square,
                    association.degrees_of_freedom,
                    association.p_value
                );
            }
        }
    }

    Ok(())
}

fn emit_all<T: Serialize>(kind: &str, items: &[T]) -> anyhow::Result<()> {
    let mut reporter = JsonReporter::stdout();
    for item in items {
        reporter.emit(kind, item)?;
    }
    Ok(())
}

fn print_dashboard(report: &DashboardReport) {
    let kpis = &report.kpis;
    println!("=== {} ===", report.headline);
    println!("Average Score:   {:.2}", kpis.average_score);
    println!("Variability:     {:.2}", kpis.variability);
    println!("High Performers: {:.2}%", kpis.high_performers_pct);
    println!("Average:         {:.2}%", kpis.average_performers_pct);
    println!("Low Performers:  {:.2}%", kpis.low_performers_pct);
    for marker in &report.reference_markers {
        println!(
            "  {:?} line at {:.2} (percentile {:.1}%)",
            marker.line.kind,
            marker.line.score,
            marker.percentile * 100.0
        );
    }
    for insight in &report.insights {
        println!("  ! {} -> {}", insight.message, insight.action);
    }
    println!();
}

fn print_segmentation(run: &SegmentationRun) {
    println!(
        "Segmented {} customers in {} iterations",
        run.clustering.points.len(),
        run.clustering.iterations
    );
    for segment in &run.segments {
        println!(
            "  [{}] {:<20} {:>4} customers  income={:>9.0} age={:>5.1} tx={:>5.1}",
            segment.label,
            segment.name,
            segment.size,
            segment.centroid.income,
            segment.centroid.age,
            segment.centroid.transactions
        );
    }
    if !run.clustering.empty_cluster_events.is_empty() {
        println!(
            "  {} empty-cluster events",
            run.clustering.empty_cluster_events.len()
        );
    }
}

fn print_pipeline_frame(frame: &PipelineFrame) {
    let titles: Vec<&str> = frame.active.iter().map(|s| s.title).collect();
    let status = if frame.finished { " (done)" } else { "" };
    println!("t={:>6}ms [{}]{}", frame.time_ms, titles.join(" -> "), status);
}

fn print_correlation(report: &CorrelationReport) {
    println!("=== {} ===", report.name);
    for result in &report.results {
        let p_value = result
            .p_value
            .map(|p| format!("{:.4}", p))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "  {:<10} {:>7.4}  p={:<8} {}",
            result.method.to_string(),
            result.coefficient,
            p_value,
            result.strength
        );
    }
}
