// ============================================================
// Layer 5 — Candidate Model Families
// ============================================================
// Each family is a strategy with the same three capabilities:
//
//   name()  → display name used in the report
//   grid()  → every hyperparameter combination to try
//   fit()   → train one combination on a dataset
//
// The training loop only talks to this interface, so adding or
// removing a family means editing ALL and nothing else.
//
// Grid order: keys sorted by name, last key varying fastest.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::data::dataset::UsageDataset;
use crate::ml::forest::{ForestParams, RandomForest};
use crate::ml::linear::LinearModel;
use crate::ml::model::{FittedModel, Hyperparams};
use crate::ml::tree::{RegressionTree, TreeParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelFamily {
    LinearRegression,
    DecisionTree,
    RandomForest,
}

impl ModelFamily {
    /// Every candidate, in evaluation (and tie-break) order.
    pub const ALL: [ModelFamily; 3] = [
        ModelFamily::LinearRegression,
        ModelFamily::DecisionTree,
        ModelFamily::RandomForest,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ModelFamily::LinearRegression => "Linear Regression",
            ModelFamily::DecisionTree     => "Decision Tree",
            ModelFamily::RandomForest     => "Random Forest",
        }
    }

    pub fn grid(&self) -> Vec<Hyperparams> {
        match self {
            ModelFamily::LinearRegression => vec![Hyperparams::Linear],

            ModelFamily::DecisionTree => {
                let mut grid = Vec::new();
                for max_depth in [None, Some(10), Some(20)] {
                    for min_samples_split in [2, 5] {
                        grid.push(Hyperparams::Tree(TreeParams { max_depth, min_samples_split }));
                    }
                }
                grid
            }

            ModelFamily::RandomForest => {
                let mut grid = Vec::new();
                for max_depth in [Some(10), Some(20)] {
                    for min_samples_split in [2, 5] {
                        for n_estimators in [50, 100] {
                            grid.push(Hyperparams::Forest(ForestParams {
                                n_estimators,
                                max_depth,
                                min_samples_split,
                            }));
                        }
                    }
                }
                grid
            }
        }
    }

    /// Fit one grid point. `seed` drives any sampling the family does.
    pub fn fit(&self, params: &Hyperparams, data: &UsageDataset, seed: u64) -> Result<FittedModel> {
        let model = match (self, params) {
            (ModelFamily::LinearRegression, Hyperparams::Linear) => {
                FittedModel::Linear(LinearModel::fit(data)?)
            }
            (ModelFamily::DecisionTree, Hyperparams::Tree(p)) => {
                FittedModel::Tree(RegressionTree::fit(data, *p))
            }
            (ModelFamily::RandomForest, Hyperparams::Forest(p)) => {
                FittedModel::Forest(RandomForest::fit(data, *p, seed))
            }
            (family, params) => bail!("{:?} does not belong to {}", params, family.name()),
        };
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_sizes() {
        assert_eq!(ModelFamily::LinearRegression.grid().len(), 1);
        assert_eq!(ModelFamily::DecisionTree.grid().len(), 6);
        assert_eq!(ModelFamily::RandomForest.grid().len(), 8);
    }

    #[test]
    fn test_tree_grid_starts_unbounded() {
        let first = ModelFamily::DecisionTree.grid()[0];
        assert_eq!(
            first,
            Hyperparams::Tree(TreeParams { max_depth: None, min_samples_split: 2 })
        );
    }

    #[test]
    fn test_mismatched_params_are_rejected() {
        let data = UsageDataset {
            records: ndarray::Array2::zeros((0, 5)),
            targets: ndarray::Array1::zeros(0),
        };
        assert!(ModelFamily::DecisionTree.fit(&Hyperparams::Linear, &data, 0).is_err());
    }

    #[test]
    fn test_names_are_distinct() {
        let names: std::collections::BTreeSet<_> = ModelFamily::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(names.len(), ModelFamily::ALL.len());
    }
}
