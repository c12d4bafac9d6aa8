// ============================================================
// Layer 6 — Storage Location
// ============================================================
// Every persisted artifact lives under one root directory:
//
//   <root>/data/library_data.db       ← observation table
//   <root>/models/best_model.bin      ← winning model (bincode)
//   <root>/models/model_metrics.json  ← last training report
//
// The root is passed explicitly (CLI --root, tempdirs in tests)
// instead of living in process-wide constants.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLocation {
    root: PathBuf,
}

impl StorageLocation {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn database_path(&self) -> PathBuf {
        self.root.join("data").join("library_data.db")
    }

    pub fn models_dir(&self) -> PathBuf {
        self.root.join("models")
    }

    pub fn model_path(&self) -> PathBuf {
        self.models_dir().join("best_model.bin")
    }

    pub fn report_path(&self) -> PathBuf {
        self.models_dir().join("model_metrics.json")
    }
}
