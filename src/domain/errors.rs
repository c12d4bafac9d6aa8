// ============================================================
// Layer 3 — Pipeline Errors
// ============================================================
// Typed failures of the training run. Everything else travels
// as anyhow::Error with a context message.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrainingError {
    /// The dataset was empty — generate data first
    #[error("no observations available to train on")]
    NoData,

    /// Not enough rows to build the requested folds/splits
    #[error("{rows} observations are too few for {folds}-fold cross-validation")]
    TooFewRows { rows: usize, folds: usize },

    /// One candidate family failed; the whole run is aborted
    #[error("training '{family}' failed: {reason}")]
    Candidate { family: String, reason: String },
}
