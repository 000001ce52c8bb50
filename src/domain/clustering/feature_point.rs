use serde::{Deserialize, Serialize};

/// Customer features used for segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Features {
    pub income: f64,
    pub age: f64,
    pub transactions: f64,
}

impl Features {
    pub fn new(income: f64, age: f64, transactions: f64) -> Self {
        Self {
            income,
            age,
            transactions,
        }
    }

    /// Euclidean distance after dividing each feature by its scale.
    pub fn scaled_distance(&self, other: &Features, scale: &FeatureScale) -> f64 {
        let d_income = (self.income - other.income) / scale.income;
        let d_age = (self.age - other.age) / scale.age;
        let d_transactions = (self.transactions - other.transactions) / scale.transactions;
        (d_income * d_income + d_age * d_age + d_transactions * d_transactions).sqrt()
    }

    /// Per-feature arithmetic mean. `None` for an empty iterator.
    pub fn mean<'a, I>(features: I) -> Option<Features>
    where
        I: IntoIterator<Item = &'a Features>,
    {
        let mut sum = Features::default();
        let mut count = 0usize;
        for f in features {
            sum.income += f.income;
            sum.age += f.age;
            sum.transactions += f.transactions;
            count += 1;
        }
        if count == 0 {
            return None;
        }
        let n = count as f64;
        Some(Features::new(sum.income / n, sum.age / n, sum.transactions / n))
    }
}

/// Cluster centre in feature space.
pub type Centroid = Features;

/// Per-feature divisors bringing the features onto comparable ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureScale {
    pub income: f64,
    pub age: f64,
    pub transactions: f64,
}

impl Default for FeatureScale {
    fn default() -> Self {
        Self {
            income: 100_000.0,
            age: 50.0,
            transactions: 50.0,
        }
    }
}

/// A point with its current cluster label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeaturePoint {
    pub features: Features,
    pub label: usize,
}

impl FeaturePoint {
    pub fn new(features: Features, label: usize) -> Self {
        Self { features, label }
    }

    /// Same features under a different label.
    pub fn relabeled(&self, label: usize) -> Self {
        Self {
            features: self.features,
            label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_distance() {
        let a = Features::new(100_000.0, 40.0, 50.0);
        let b = Features::new(200_000.0, 40.0, 50.0);
        let d = a.scaled_distance(&b, &FeatureScale::default());
        assert!((d - 1.0).abs() < 1e-12);

        let c = Features::new(100_000.0, 90.0, 100.0);
        let d = a.scaled_distance(&c, &FeatureScale::default());
        assert!((d - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_mean() {
        let features = [
            Features::new(10.0, 20.0, 30.0),
            Features::new(30.0, 40.0, 50.0),
        ];
        assert_eq!(
            Features::mean(&features),
            Some(Features::new(20.0, 30.0, 40.0))
        );
        assert_eq!(Features::mean(&[]), None);
    }
}
