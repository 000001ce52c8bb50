//! 3D to 2D projection for the segmentation scatter plot.
//!
//! Points are rotated about X, then Y, then Z and projected with a simple
//! perspective divide `scale = K / (K + z)`.

use crate::domain::clustering::Features;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PERSPECTIVE: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Scene coordinates of a customer: income in thousands around 100k,
    /// age and transactions doubled around 40 and 50.
    pub fn from_features(features: &Features) -> Self {
        Self {
            x: (features.income - 100_000.0) / 1000.0,
            y: (features.age - 40.0) * 2.0,
            z: (features.transactions - 50.0) * 2.0,
        }
    }
}

/// Orientation in degrees about each axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RotationAngles {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationAngles {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Screen position plus the unscaled rotated depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    pub z_depth: f64,
}

impl ProjectedPoint {
    pub fn depth_cue(&self) -> DepthCue {
        DepthCue::from_depth(self.z_depth)
    }
}

/// Marker size and opacity derived from depth; nearer points are larger and more opaque.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthCue {
    pub radius: f64,
    pub opacity: f64,
}

impl DepthCue {
    pub fn from_depth(z: f64) -> Self {
        Self {
            radius: 2.0 + (z + 100.0) / 40.0,
            opacity: ((z + 100.0) / 200.0).clamp(0.0, 1.0),
        }
    }
}

/// Perspective projection with a fixed camera constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub perspective: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            perspective: DEFAULT_PERSPECTIVE,
        }
    }
}

impl Projection {
    pub fn with_perspective(perspective: f64) -> Self {
        Self { perspective }
    }

    pub fn rotate(point: Vec3, rotation: RotationAngles) -> Vec3 {
        let (sin_x, cos_x) = rotation.x.to_radians().sin_cos();
        let (sin_y, cos_y) = rotation.y.to_radians().sin_cos();
        let (sin_z, cos_z) = rotation.z.to_radians().sin_cos();

        // X axis
        let x1 = point.x;
        let y1 = point.y * cos_x - point.z * sin_x;
        let z1 = point.y * sin_x + point.z * cos_x;

        // Y axis
        let x2 = x1 * cos_y + z1 * sin_y;
        let y2 = y1;
        let z2 = -x1 * sin_y + z1 * cos_y;

        // Z axis
        Vec3 {
            x: x2 * cos_z - y2 * sin_z,
            y: x2 * sin_z + y2 * cos_z,
            z: z2,
        }
    }

    /// Points at depth `-perspective` sit on the camera plane and project to
    /// infinity; callers keep scene depths within (-K, inf).
    pub fn project(&self, point: Vec3, rotation: RotationAngles) -> ProjectedPoint {
        let rotated = Self::rotate(point, rotation);
        let scale = self.perspective / (self.perspective + rotated.z);
        ProjectedPoint {
            x: rotated.x * scale,
            y: rotated.y * scale,
            z_depth: rotated.z,
        }
    }

    /// Projects every point in parallel, preserving order.
    pub fn project_all(&self, points: &[Vec3], rotation: RotationAngles) -> Vec<ProjectedPoint> {
        points
            .par_iter()
            .map(|&p| self.project(p, rotation))
            .collect()
    }
}

/// Projects with the default perspective constant.
pub fn project(point: Vec3, rotation: RotationAngles) -> ProjectedPoint {
    Projection::default().project(point, rotation)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_zero_rotation_is_pure_perspective() {
        let p = project(Vec3::new(10.0, -20.0, 50.0), RotationAngles::default());
        let scale = 200.0 / 250.0;
        assert!((p.x - 10.0 * scale).abs() < EPS);
        assert!((p.y + 20.0 * scale).abs() < EPS);
        assert!((p.z_depth - 50.0).abs() < EPS);
    }

    #[test]
    fn test_quarter_turn_about_y() {
        // (x, 0, 0) rotated 90 degrees about Y goes to depth -x.
        let p = Projection::rotate(Vec3::new(10.0, 0.0, 0.0), RotationAngles::new(0.0, 90.0, 0.0));
        assert!(p.x.abs() < EPS);
        assert!((p.z + 10.0).abs() < EPS);
    }

    #[test]
    fn test_rotation_preserves_length() {
        let v = Vec3::new(3.0, -4.0, 12.0);
        let r = Projection::rotate(v, RotationAngles::new(33.0, 127.0, 271.0));
        let len = |v: Vec3| (v.x * v.x + v.y * v.y + v.z * v.z).sqrt();
        assert!((len(r) - 13.0).abs() < EPS);
    }

    #[test]
    fn test_custom_perspective() {
        let projection = Projection::with_perspective(100.0);
        let p = projection.project(Vec3::new(10.0, 10.0, 100.0), RotationAngles::default());
        assert!((p.x - 5.0).abs() < EPS);
        assert!((p.y - 5.0).abs() < EPS);
    }

    #[test]
    fn test_project_all_preserves_order() {
        let points: Vec<Vec3> = (0..50).map(|i| Vec3::new(i as f64, 0.0, 0.0)).collect();
        let rotation = RotationAngles::new(10.0, 20.0, 30.0);
        let projected = Projection::default().project_all(&points, rotation);
        assert_eq!(projected.len(), 50);
        for (p, original) in projected.iter().zip(&points) {
            assert_eq!(*p, project(*original, rotation));
        }
    }

    #[test]
    fn test_scene_mapping_and_depth_cue() {
        let v = Vec3::from_features(&Features::new(120_000.0, 45.0, 40.0));
        assert_eq!(v, Vec3::new(20.0, 10.0, -20.0));

        let cue = DepthCue::from_depth(0.0);
        assert!((cue.radius - 4.5).abs() < EPS);
        assert!((cue.opacity - 0.5).abs() < EPS);
        assert_eq!(DepthCue::from_depth(500.0).opacity, 1.0);
        assert_eq!(DepthCue::from_depth(-500.0).opacity, 0.0);
    }
}
