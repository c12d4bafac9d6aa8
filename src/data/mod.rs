// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between "a start date" and "model-ready arrays":
//
//   DataGenerator     → synthetic Observations, one per day
//       │
//       ▼
//   SqliteStore       → whole-table save / load
//       │
//       ▼
//   UsageDataset      → ndarray records + targets
//       │
//       ▼
//   splitter          → seeded train/test split, K-fold indices
//
// UsageSummary is a side branch used by the `show` command.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Synthetic library usage generator
pub mod generator;

/// SQLite implementation of ObservationStore
pub mod store;

/// Observation → ndarray encoding
pub mod dataset;

/// Seeded train/test split and K-fold partitioning
pub mod splitter;

/// Per-weekday and exam-week averages
pub mod summary;
