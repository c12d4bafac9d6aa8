// ============================================================
// Layer 5 — Random Forest Regressor
// ============================================================
// Bagged CART trees: every tree is grown on a bootstrap sample
// (n rows drawn with replacement) and all features are
// considered at every split. The forest predicts the mean of
// its trees.
//
// Bootstrap draws come from one StdRng seeded per fit, so the
// same data, params and seed always give the same forest.

use ndarray::ArrayView1;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::data::dataset::UsageDataset;
use crate::ml::model::Regressor;
use crate::ml::tree::{RegressionTree, TreeParams};

/// Random forest grid point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_estimators:      usize,
    pub max_depth:         Option<usize>,
    pub min_samples_split: usize,
}

impl ForestParams {
    fn tree_params(&self) -> TreeParams {
        TreeParams {
            max_depth:         self.max_depth,
            min_samples_split: self.min_samples_split,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<RegressionTree>,
}

impl RandomForest {
    pub fn fit(data: &UsageDataset, params: ForestParams, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let n       = data.sample_count();

        let trees = (0..params.n_estimators)
            .map(|_| {
                let bootstrap: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                RegressionTree::fit_rows(
                    data.records.view(),
                    data.targets.view(),
                    bootstrap,
                    params.tree_params(),
                )
            })
            .collect();

        Self { trees }
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

impl Regressor for RandomForest {
    fn predict_row(&self, row: ArrayView1<f64>) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let total: f64 = self.trees.iter().map(|t| t.predict_row(row)).sum();
        total / self.trees.len() as f64
    }
}
