// Gaussian statistics, performer bands, KPIs and correlation
pub mod statistics;

// k-means segmentation
pub mod clustering;

// 3D rotation and perspective projection
pub mod projection;

// Time-stepped playback state
pub mod playback;

// Domain-specific error types
pub mod errors;
