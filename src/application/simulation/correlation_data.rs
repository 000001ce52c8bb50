use super::{normal_distribution, standard_normal};
use crate::domain::errors::AnalyticsError;
use rand::Rng;
use rand_distr::Distribution;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relationship {
    Linear,
    Monotonic,
    NonLinear,
}

impl Relationship {
    pub fn label(&self) -> &'static str {
        match self {
            Relationship::Linear => "Linear",
            Relationship::Monotonic => "Monotonic",
            Relationship::NonLinear => "Non-linear",
        }
    }
}

/// Paired observations with a known generating relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationSample {
    pub relationship: Relationship,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Three sample pairs of `n` observations:
/// - Linear: x ~ N(0, 1), y = 0.8x + N(0, 0.2)
/// - Monotonic: x ~ U(-3, 3), y = x^2 + N(0, 1)
/// - Non-linear: x evenly spaced over [-3, 3], y = sin(x) + N(0, 0.2)
pub fn generate_samples<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
) -> Result<Vec<CorrelationSample>, AnalyticsError> {
    let noise = normal_distribution(0.0, 0.2)?;

    let x1: Vec<f64> = (0..n).map(|_| standard_normal(rng)).collect();
    let y1: Vec<f64> = x1.iter().map(|x| 0.8 * x + noise.sample(rng)).collect();

    let x2: Vec<f64> = (0..n).map(|_| rng.random_range(-3.0..3.0)).collect();
    let y2: Vec<f64> = x2.iter().map(|x| x * x + standard_normal(rng)).collect();

    let x3 = linspace(-3.0, 3.0, n);
    let y3: Vec<f64> = x3.iter().map(|x| x.sin() + noise.sample(rng)).collect();

    Ok(vec![
        CorrelationSample {
            relationship: Relationship::Linear,
            x: x1,
            y: y1,
        },
        CorrelationSample {
            relationship: Relationship::Monotonic,
            x: x2,
            y: y2,
        },
        CorrelationSample {
            relationship: Relationship::NonLinear,
            x: x3,
            y: y3,
        },
    ])
}

/// `n` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::simulation::seeded_rng;

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(-3.0, 3.0, 4), vec![-3.0, -1.0, 1.0, 3.0]);
        assert_eq!(linspace(0.0, 1.0, 1), vec![0.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_sample_shapes() {
        let mut rng = seeded_rng(Some(42));
        let samples = generate_samples(&mut rng, 50).unwrap();
        assert_eq!(samples.len(), 3);
        for s in &samples {
            assert_eq!(s.x.len(), 50);
            assert_eq!(s.y.len(), 50);
        }
        assert_eq!(samples[2].x[0], -3.0);
        assert!(samples[1].x.iter().all(|x| (-3.0..3.0).contains(x)));
    }
}
