// ============================================================
// Layer 5 — Fitted Models
// ============================================================
// The Regressor trait is the one seam between the training
// loop / predictor and the concrete model types.
//
// A PersistedModel carries everything needed to rebuild the
// winner losslessly: its family, the chosen hyperparameters
// and the fitted parameters themselves (coefficients or tree
// node arrays). It is written with bincode by the checkpoint
// manager.

use std::collections::BTreeMap;

use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::ml::family::ModelFamily;
use crate::ml::forest::{ForestParams, RandomForest};
use crate::ml::linear::LinearModel;
use crate::ml::tree::{RegressionTree, TreeParams};

// ─── Regressor ────────────────────────────────────────────────────────────────
/// A fitted model mapping one encoded feature row to a continuous value.
pub trait Regressor {
    fn predict_row(&self, row: ArrayView1<f64>) -> f64;

    /// Predict every row of `records`, in order.
    fn predict(&self, records: ArrayView2<f64>) -> Array1<f64> {
        records.outer_iter().map(|row| self.predict_row(row)).collect()
    }
}

// ─── Hyperparams ──────────────────────────────────────────────────────────────
/// One point of a family's hyperparameter grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hyperparams {
    /// Plain least squares has nothing to tune
    Linear,
    Tree(TreeParams),
    Forest(ForestParams),
}

impl Hyperparams {
    /// Flat name → value map for the report; `null` marks an unbounded depth.
    pub fn to_report_map(&self) -> BTreeMap<String, serde_json::Value> {
        let mut map = BTreeMap::new();
        match self {
            Hyperparams::Linear => {}
            Hyperparams::Tree(p) => {
                map.insert("max_depth".to_string(), json!(p.max_depth));
                map.insert("min_samples_split".to_string(), json!(p.min_samples_split));
            }
            Hyperparams::Forest(p) => {
                map.insert("max_depth".to_string(), json!(p.max_depth));
                map.insert("min_samples_split".to_string(), json!(p.min_samples_split));
                map.insert("n_estimators".to_string(), json!(p.n_estimators));
            }
        }
        map
    }
}

// ─── FittedModel ──────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FittedModel {
    Linear(LinearModel),
    Tree(RegressionTree),
    Forest(RandomForest),
}

impl Regressor for FittedModel {
    fn predict_row(&self, row: ArrayView1<f64>) -> f64 {
        match self {
            FittedModel::Linear(m) => m.predict_row(row),
            FittedModel::Tree(m)   => m.predict_row(row),
            FittedModel::Forest(m) => m.predict_row(row),
        }
    }
}

// ─── PersistedModel ───────────────────────────────────────────────────────────
/// The training run's winner as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedModel {
    pub family: ModelFamily,
    pub params: Hyperparams,
    pub model:  FittedModel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_map_for_each_variant() {
        assert!(Hyperparams::Linear.to_report_map().is_empty());

        let tree = Hyperparams::Tree(TreeParams { max_depth: None, min_samples_split: 5 });
        let map  = tree.to_report_map();
        assert!(map["max_depth"].is_null());
        assert_eq!(map["min_samples_split"], 5);

        let forest = Hyperparams::Forest(ForestParams {
            n_estimators:      100,
            max_depth:         Some(20),
            min_samples_split: 2,
        });
        let map = forest.to_report_map();
        assert_eq!(map["n_estimators"], 100);
        assert_eq!(map["max_depth"], 20);
    }

    #[test]
    fn test_linear_variant_dispatch() {
        let model = FittedModel::Linear(LinearModel {
            intercept:    1.0,
            coefficients: vec![0.0, 0.0, 0.0, 0.0, 0.5],
        });
        let row = ndarray::array![0.0, 0.0, 0.0, 1.0, 100.0];
        assert_eq!(model.predict_row(row.view()), 51.0);
    }
}
