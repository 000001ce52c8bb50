//! Fixed-iteration k-means over customer features.
//!
//! Seeding takes the first `k` points verbatim, so results depend on input
//! order. Every run performs exactly `iterations` assignment/update rounds;
//! convergence is not detected.

use super::feature_point::{Centroid, FeaturePoint, FeatureScale};
use crate::domain::errors::AnalyticsError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// What happens to a centroid that ends a round with no assigned points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmptyClusterPolicy {
    /// Keep the centroid from the previous round.
    #[default]
    RetainPrevious,
    /// Move the centroid onto the point farthest from its own centroid.
    ReseedFarthest,
}

/// A centroid that lost all of its points during an update step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyClusterEvent {
    pub iteration: usize,
    pub cluster: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringResult {
    /// Input points, in input order, carrying their final labels.
    pub points: Vec<FeaturePoint>,
    pub centroids: Vec<Centroid>,
    pub empty_cluster_events: Vec<EmptyClusterEvent>,
    pub iterations: usize,
}

impl ClusteringResult {
    pub fn labels(&self) -> Vec<usize> {
        self.points.iter().map(|p| p.label).collect()
    }

    /// Number of points per cluster, indexed by label.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        cluster_sizes(&self.points, self.centroids.len())
    }
}

fn cluster_sizes(points: &[FeaturePoint], k: usize) -> Vec<usize> {
    let mut sizes = vec![0; k];
    for point in points {
        if let Some(size) = sizes.get_mut(point.label) {
            *size += 1;
        }
    }
    sizes
}

fn member_mean(points: &[FeaturePoint], cluster: usize) -> Option<Centroid> {
    Centroid::mean(
        points
            .iter()
            .filter(|p| p.label == cluster)
            .map(|p| &p.features),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KMeans {
    pub k: usize,
    pub iterations: usize,
    pub scale: FeatureScale,
    pub empty_cluster_policy: EmptyClusterPolicy,
}

impl KMeans {
    pub fn new(k: usize, iterations: usize) -> Self {
        Self {
            k,
            iterations,
            scale: FeatureScale::default(),
            empty_cluster_policy: EmptyClusterPolicy::default(),
        }
    }

    pub fn with_scale(mut self, scale: FeatureScale) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_empty_cluster_policy(mut self, policy: EmptyClusterPolicy) -> Self {
        self.empty_cluster_policy = policy;
        self
    }

    /// Index of the nearest centroid; ties keep the lowest index.
    fn nearest(&self, point: &FeaturePoint, centroids: &[Centroid]) -> usize {
        let mut best = 0;
        let mut min_dist = f64::INFINITY;
        for (index, centroid) in centroids.iter().enumerate() {
            let dist = point.features.scaled_distance(centroid, &self.scale);
            if dist < min_dist {
                min_dist = dist;
                best = index;
            }
        }
        best
    }

    /// Point farthest from its own centroid among clusters that can spare one.
    fn reseed_target(&self, points: &[FeaturePoint], centroids: &[Centroid]) -> Option<usize> {
        let sizes = cluster_sizes(points, centroids.len());
        points
            .iter()
            .enumerate()
            .filter(|(_, p)| sizes[p.label] > 1)
            .map(|(i, p)| (i, p.features.scaled_distance(&centroids[p.label], &self.scale)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// Clusters `points` into a new labelled collection; the input is untouched.
    ///
    /// # Errors
    /// `InvalidClusterCount` unless `1 <= k <= points.len()`.
    pub fn fit(&self, points: &[FeaturePoint]) -> Result<ClusteringResult, AnalyticsError> {
        if self.k == 0 || self.k > points.len() {
            return Err(AnalyticsError::InvalidClusterCount {
                k: self.k,
                points: points.len(),
            });
        }

        let mut centroids: Vec<Centroid> = points[..self.k].iter().map(|p| p.features).collect();
        let mut labelled = points.to_vec();
        let mut empty_cluster_events = Vec::new();

        for iteration in 0..self.iterations {
            for point in labelled.iter_mut() {
                point.label = self.nearest(point, &centroids);
            }

            for (cluster, centroid) in centroids.iter_mut().enumerate() {
                match member_mean(&labelled, cluster) {
                    Some(mean) => *centroid = mean,
                    None => {
                        warn!(
                            "KMeans: cluster {} empty at iteration {} ({:?})",
                            cluster, iteration, self.empty_cluster_policy
                        );
                        empty_cluster_events.push(EmptyClusterEvent { iteration, cluster });
                    }
                }
            }

            if self.empty_cluster_policy == EmptyClusterPolicy::ReseedFarthest {
                for event in empty_cluster_events
                    .iter()
                    .filter(|e| e.iteration == iteration)
                {
                    // The donor keeps at least one member, so only its mean moves.
                    if let Some(target) = self.reseed_target(&labelled, &centroids) {
                        let donor = labelled[target].label;
                        labelled[target].label = event.cluster;
                        centroids[event.cluster] = labelled[target].features;
                        if let Some(mean) = member_mean(&labelled, donor) {
                            centroids[donor] = mean;
                        }
                    }
                }
            }
        }

        debug!(
            "KMeans: {} points, k={}, {} iterations, {} empty-cluster events",
            points.len(),
            self.k,
            self.iterations,
            empty_cluster_events.len()
        );

        Ok(ClusteringResult {
            points: labelled,
            centroids,
            empty_cluster_events,
            iterations: self.iterations,
        })
    }
}

/// Clusters with the default feature scale and empty-cluster policy.
pub fn k_means(
    points: &[FeaturePoint],
    k: usize,
    iterations: usize,
) -> Result<ClusteringResult, AnalyticsError> {
    KMeans::new(k, iterations).fit(points)
}
