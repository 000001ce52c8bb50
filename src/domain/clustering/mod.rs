// Feature vectors, scaling and labelled points
pub mod feature_point;

// Fixed-iteration k-means
pub mod kmeans;

// Display names for cluster labels
pub mod segments;

pub use feature_point::{Centroid, FeaturePoint, FeatureScale, Features};
pub use kmeans::{ClusteringResult, EmptyClusterEvent, EmptyClusterPolicy, KMeans, k_means};
