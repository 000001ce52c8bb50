// Rotation and perspective projection
pub mod transform;

// Time-stepped rotation for the spinning view
pub mod rotation;

pub use rotation::{RotationRates, RotationState};
pub use transform::{DepthCue, ProjectedPoint, Projection, RotationAngles, Vec3, project};
