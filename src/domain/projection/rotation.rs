use super::transform::RotationAngles;
use serde::{Deserialize, Serialize};

/// Angular speed about each axis, in degrees per millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationRates {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for RotationRates {
    fn default() -> Self {
        Self {
            x: 0.02,
            y: 0.015,
            z: 0.01,
        }
    }
}

/// Spinning orientation of the scatter plot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RotationState {
    pub angles: RotationAngles,
    pub rates: RotationRates,
}

impl RotationState {
    pub fn new(rates: RotationRates) -> Self {
        Self {
            angles: RotationAngles::default(),
            rates,
        }
    }

    /// State after `delta_ms` milliseconds. Angles stay in [0, 360); negative
    /// or non-finite deltas leave the state unchanged.
    pub fn advance(&self, delta_ms: f64) -> Self {
        let dt = if delta_ms.is_finite() {
            delta_ms.max(0.0)
        } else {
            0.0
        };
        let wrap = |angle: f64| angle.rem_euclid(360.0);

        Self {
            angles: RotationAngles {
                x: wrap(self.angles.x + self.rates.x * dt),
                y: wrap(self.angles.y + self.rates.y * dt),
                z: wrap(self.angles.z + self.rates.z * dt),
            },
            rates: self.rates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_default_rates() {
        let state = RotationState::default().advance(1000.0);
        assert!((state.angles.x - 20.0).abs() < 1e-9);
        assert!((state.angles.y - 15.0).abs() < 1e-9);
        assert!((state.angles.z - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_advance_wraps() {
        let state = RotationState::default().advance(20_000.0);
        // 400 degrees about X
        assert!((state.angles.x - 40.0).abs() < 1e-9);
        assert!((state.angles.y - 300.0).abs() < 1e-9);
        assert!(state.angles.x < 360.0 && state.angles.y < 360.0 && state.angles.z < 360.0);
    }

    #[test]
    fn test_negative_delta_is_noop() {
        let state = RotationState::default().advance(500.0);
        assert_eq!(state.advance(-100.0), state);
        assert_eq!(state.advance(f64::NAN), state);
    }
}
