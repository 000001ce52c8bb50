use crate::application::simulation::customer_data::generate_customers;
use crate::config::SegmentationEnvConfig;
use crate::domain::clustering::segments::segment_for_label;
use crate::domain::clustering::{Centroid, ClusteringResult, FeaturePoint, KMeans};
use crate::domain::projection::{Projection, RotationAngles, RotationRates, RotationState, Vec3};
use anyhow::{Context, Result};
use rand::Rng;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentSummary {
    pub label: usize,
    pub name: &'static str,
    pub color: &'static str,
    pub size: usize,
    pub centroid: Centroid,
}

/// One clustering of a freshly generated customer base.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentationRun {
    pub clustering: ClusteringResult,
    pub segments: Vec<SegmentSummary>,
}

/// A rendered customer marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub z_depth: f64,
    pub radius: f64,
    pub opacity: f64,
    pub label: usize,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneFrame {
    pub time_ms: u64,
    pub rotation: RotationAngles,
    pub points: Vec<ScatterPoint>,
}

/// Generates, clusters and projects customer data for the 3D scatter view.
pub struct SegmentationService {
    config: SegmentationEnvConfig,
    projection: Projection,
    rates: RotationRates,
}

impl SegmentationService {
    pub fn new(config: SegmentationEnvConfig) -> Self {
        let projection = Projection::with_perspective(config.perspective);
        Self {
            config,
            projection,
            rates: RotationRates::default(),
        }
    }

    pub fn with_rates(mut self, rates: RotationRates) -> Self {
        self.rates = rates;
        self
    }

    /// Generates a new customer base and clusters it.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SegmentationRun> {
        let customers = generate_customers(rng, self.config.customers, self.config.segments);
        self.cluster(&customers)
    }

    pub fn cluster(&self, customers: &[FeaturePoint]) -> Result<SegmentationRun> {
        let clustering = KMeans::new(self.config.segments, self.config.iterations)
            .fit(customers)
            .context("Customer segmentation failed")?;

        let segments = clustering
            .cluster_sizes()
            .into_iter()
            .zip(&clustering.centroids)
            .enumerate()
            .map(|(label, (size, centroid))| {
                let segment = segment_for_label(label);
                SegmentSummary {
                    label,
                    name: segment.label,
                    color: segment.color,
                    size,
                    centroid: *centroid,
                }
            })
            .collect();

        info!(
            "Segmentation: {} customers into {} segments ({} empty-cluster events)",
            customers.len(),
            self.config.segments,
            clustering.empty_cluster_events.len()
        );

        Ok(SegmentationRun {
            clustering,
            segments,
        })
    }

    pub fn frame(&self, run: &SegmentationRun, rotation: RotationAngles, time_ms: u64) -> SceneFrame {
        let scene: Vec<Vec3> = run
            .clustering
            .points
            .iter()
            .map(|p| Vec3::from_features(&p.features))
            .collect();

        let points = self
            .projection
            .project_all(&scene, rotation)
            .into_iter()
            .zip(&run.clustering.points)
            .map(|(projected, customer)| {
                let cue = projected.depth_cue();
                ScatterPoint {
                    x: projected.x,
                    y: projected.y,
                    z_depth: projected.z_depth,
                    radius: cue.radius,
                    opacity: cue.opacity,
                    label: customer.label,
                    color: segment_for_label(customer.label).color,
                }
            })
            .collect();

        SceneFrame {
            time_ms,
            rotation,
            points,
        }
    }

    /// Frames of the spinning view sampled every `frame_ms` up to `duration_ms`.
    pub fn animate(&self, run: &SegmentationRun, duration_ms: u64, frame_ms: u64) -> Vec<SceneFrame> {
        let frame_ms = frame_ms.max(1);
        let mut state = RotationState::new(self.rates);
        let mut frames = vec![self.frame(run, state.angles, 0)];

        let mut time_ms = 0;
        while time_ms + frame_ms <= duration_ms {
            time_ms += frame_ms;
            state = state.advance(frame_ms as f64);
            frames.push(self.frame(run, state.angles, time_ms));
        }
        frames
    }
}
