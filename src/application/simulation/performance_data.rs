use crate::domain::statistics::DistributionParams;
use crate::domain::statistics::kpi::{Department, Quarter};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Score distribution and individual scores of one department in one quarter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentDataset {
    pub department: Department,
    pub quarter: Quarter,
    pub params: DistributionParams,
    pub scores: Vec<f64>,
}

impl DepartmentDataset {
    /// mean in [70, 90), std_dev in [5, 10), scores uniform in [50, 90).
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        department: Department,
        quarter: Quarter,
        employees: usize,
    ) -> Self {
        let params = DistributionParams {
            mean: rng.random_range(70.0..90.0),
            std_dev: rng.random_range(5.0..10.0),
        };
        let scores = (0..employees)
            .map(|_| rng.random_range(50.0..90.0))
            .collect();

        Self {
            department,
            quarter,
            params,
            scores,
        }
    }
}

/// Datasets for every department and quarter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceDataset {
    datasets: Vec<DepartmentDataset>,
}

impl PerformanceDataset {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, employees: usize) -> Self {
        let mut datasets = Vec::with_capacity(Department::ALL.len() * Quarter::COUNT);
        for department in Department::ALL {
            for q in 0..Quarter::COUNT {
                datasets.push(DepartmentDataset::generate(
                    rng,
                    department,
                    Quarter::from_index(q),
                    employees,
                ));
            }
        }
        Self { datasets }
    }

    pub fn get(&self, department: Department, quarter: Quarter) -> Option<&DepartmentDataset> {
        self.datasets
            .iter()
            .find(|d| d.department == department && d.quarter == quarter)
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::simulation::seeded_rng;

    #[test]
    fn test_dataset_shape() {
        let mut rng = seeded_rng(Some(1));
        let dataset = PerformanceDataset::generate(&mut rng, 100);
        assert_eq!(dataset.len(), 16);

        for department in Department::ALL {
            for q in 0..4 {
                let d = dataset.get(department, Quarter::from_index(q)).unwrap();
                assert_eq!(d.scores.len(), 100);
                assert!((70.0..90.0).contains(&d.params.mean));
                assert!((5.0..10.0).contains(&d.params.std_dev));
                assert!(d.scores.iter().all(|s| (50.0..90.0).contains(s)));
            }
        }
    }

    #[test]
    fn test_same_seed_same_data() {
        let a = PerformanceDataset::generate(&mut seeded_rng(Some(9)), 20);
        let b = PerformanceDataset::generate(&mut seeded_rng(Some(9)), 20);
        assert_eq!(a, b);
    }
}
