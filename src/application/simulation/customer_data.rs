use crate::domain::clustering::{FeaturePoint, Features};
use rand::Rng;

/// Synthetic banking customers grouped around `segments` random centres.
///
/// Each segment gets `ceil(customers / segments)` members jittered around its
/// centre (income +/-20k, age +/-10, transactions +/-15). The generating
/// segment is kept as each point's initial label.
pub fn generate_customers<R: Rng + ?Sized>(
    rng: &mut R,
    customers: usize,
    segments: usize,
) -> Vec<FeaturePoint> {
    if segments == 0 {
        return Vec::new();
    }
    let per_segment = customers.div_ceil(segments);
    let mut points = Vec::with_capacity(per_segment * segments);

    for segment in 0..segments {
        let center = Features::new(
            rng.random_range(20_000.0..170_000.0),
            rng.random_range(20.0..70.0),
            rng.random_range(10.0..90.0),
        );

        for _ in 0..per_segment {
            let features = Features::new(
                center.income + (rng.random::<f64>() - 0.5) * 40_000.0,
                center.age + (rng.random::<f64>() - 0.5) * 20.0,
                center.transactions + (rng.random::<f64>() - 0.5) * 30.0,
            );
            points.push(FeaturePoint::new(features, segment));
        }
    }

    points
}
