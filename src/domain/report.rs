// ============================================================
// Layer 3 — Training Report and Prediction Outcome
// ============================================================
// ModelReport is written at the end of every training run and
// replaces the previous one. Field names on disk keep the
// "MAE" / "R2_Score" / "Best_Params" spelling of the report file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Held-out scores and winning grid point of one model family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMetrics {
    /// Mean absolute error on the held-out subset, 2 decimals
    #[serde(rename = "MAE")]
    pub mae: f64,

    /// Coefficient of determination on the held-out subset, 3 decimals
    #[serde(rename = "R2_Score")]
    pub r2_score: f64,

    /// Hyperparameters chosen by the grid search.
    /// `null` means "unbounded" (e.g. max_depth).
    #[serde(rename = "Best_Params")]
    pub best_params: BTreeMap<String, serde_json::Value>,
}

impl FamilyMetrics {
    pub fn new(mae: f64, r2_score: f64, best_params: BTreeMap<String, serde_json::Value>) -> Self {
        Self {
            mae:      round_to(mae, 2),
            r2_score: round_to(r2_score, 3),
            best_params,
        }
    }
}

/// Summary of one training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelReport {
    /// Display name of the winning family
    pub best_model: String,

    /// Family name → metrics, one entry per candidate family
    pub metrics: BTreeMap<String, FamilyMetrics>,

    /// Local time of the run, "%Y-%m-%d %H:%M:%S"
    pub last_trained: String,
}

/// Outcome of a prediction request.
///
/// `ModelNotTrained` is distinct from a numeric zero: callers must
/// branch on it before treating the result as a headcount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prediction {
    Count(i64),
    ModelNotTrained,
}

impl Prediction {
    pub fn count(self) -> Option<i64> {
        match self {
            Prediction::Count(n)        => Some(n),
            Prediction::ModelNotTrained => None,
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
