use ndarray::{Array1, Array2, Axis};

use crate::domain::observation::{Observation, FEATURE_COUNT};

/// Observations encoded for the models: one row of five features per day
/// and the library headcount as target.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageDataset {
    pub records: Array2<f64>,
    pub targets: Array1<f64>,
}

impl UsageDataset {
    pub fn from_observations(observations: &[Observation]) -> Self {
        let mut records = Array2::zeros((observations.len(), FEATURE_COUNT));
        for (mut row, obs) in records.axis_iter_mut(Axis(0)).zip(observations) {
            for (cell, value) in row.iter_mut().zip(obs.features().to_row()) {
                *cell = value;
            }
        }

        let targets = observations
            .iter()
            .map(|o| f64::from(o.library_student_count))
            .collect();

        Self { records, targets }
    }

    /// Rows at `indices`, in that order.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            records: self.records.select(Axis(0), indices),
            targets: self.targets.select(Axis(0), indices),
        }
    }

    pub fn sample_count(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
