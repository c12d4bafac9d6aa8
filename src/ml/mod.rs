// ============================================================
// Layer 5 — ML / Model Layer
// ============================================================
// All model code lives here; ndarray and linfa are not used
// outside this layer (and the data encoding feeding it).
//
//   metrics.rs    — MAE and R²
//   linear.rs     — least squares via linfa-linear
//   tree.rs       — CART regression tree
//   forest.rs     — bagged regression trees
//   model.rs      — Regressor trait, Hyperparams, FittedModel,
//                   PersistedModel
//   family.rs     — the three candidate families and their grids
//   trainer.rs    — grid search + CV, refit, held-out scoring,
//                   winner selection
//   inferencer.rs — turns a persisted model into headcounts
//
// Reference: linfa documentation
//            Breiman et al. (1984) Classification and Regression Trees
//            Breiman (2001) Random Forests

/// Regression scores
pub mod metrics;

/// Ordinary least squares
pub mod linear;

/// Single regression tree
pub mod tree;

/// Random forest regressor
pub mod forest;

/// Fitted model types and the Regressor seam
pub mod model;

/// Candidate families and hyperparameter grids
pub mod family;

/// Cross-validated grid search and model selection
pub mod trainer;

/// Prediction from a persisted model
pub mod inferencer;
