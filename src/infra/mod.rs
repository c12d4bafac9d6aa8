// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// File-level persistence shared by the use cases:
//
//   paths.rs      — StorageLocation: where the database, model
//                   and report live under one root directory
//
//   checkpoint.rs — Saving and loading the winning model
//                   (bincode, atomic replace)
//
//   metrics.rs    — The JSON training report of the last run
//
// The SQLite observation table lives in the data layer
// (data/store.rs) behind the ObservationStore trait.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Storage root and derived file paths
pub mod paths;

/// Winning model persistence
pub mod checkpoint;

/// Training report persistence
pub mod metrics;
