// ============================================================
// Layer 6 — Model Report Store
// ============================================================
// Writes the ModelReport of the latest training run as pretty
// JSON and reads it back for the `logs` command.
//
// Each run overwrites the file — only the latest report is kept.
//
// Example output:
//   {
//     "best_model": "Random Forest",
//     "metrics": {
//       "Decision Tree": { "MAE": 9.41, "R2_Score": 0.952, "Best_Params": {...} },
//       ...
//     },
//     "last_trained": "2024-06-01 14:03:22"
//   }
//
// A missing file is "no logs yet"; an unreadable one is logged
// and treated the same way.

use anyhow::{Context, Result};
use std::{fs, io::Write, path::PathBuf};
use tempfile::NamedTempFile;

use crate::domain::report::ModelReport;

pub struct ReportStore {
    path: PathBuf,
}

impl ReportStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Replace the stored report.
    pub fn save(&self, report: &ModelReport) -> Result<()> {
        let staged = self.stage(report)?;
        self.commit(staged)
    }

    /// Write the report to a temp file in the target directory; the
    /// stored report is untouched until [`commit`](Self::commit).
    pub fn stage(&self, report: &ModelReport) -> Result<NamedTempFile> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create directory '{}'", dir.display()))?;

        let json = serde_json::to_string_pretty(report)?;

        let mut tmp = NamedTempFile::new_in(&dir)
            .with_context(|| format!("Cannot create temp file in '{}'", dir.display()))?;
        tmp.write_all(json.as_bytes())?;
        Ok(tmp)
    }

    pub fn commit(&self, staged: NamedTempFile) -> Result<()> {
        staged
            .persist(&self.path)
            .with_context(|| format!("Cannot write report to '{}'", self.path.display()))?;
        tracing::debug!("Saved model report to '{}'", self.path.display());
        Ok(())
    }

    /// The last report, or None when there is none (or it cannot be parsed).
    pub fn load(&self) -> Option<ModelReport> {
        let json = fs::read_to_string(&self.path).ok()?;

        match serde_json::from_str(&json) {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::warn!(
                    "Ignoring malformed report '{}': {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::FamilyMetrics;
    use std::collections::BTreeMap;

    fn report(best: &str) -> ModelReport {
        let mut metrics = BTreeMap::new();
        metrics.insert(best.to_string(), FamilyMetrics::new(7.5, 0.91, BTreeMap::new()));
        ModelReport {
            best_model:   best.to_string(),
            metrics,
            last_trained: "2024-06-01 12:00:00".to_string(),
        }
    }

    #[test]
    fn test_missing_report_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ReportStore::new(dir.path().join("model_metrics.json")).load().is_none());
    }

    #[test]
    fn test_save_overwrites_and_loads() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path().join("models").join("model_metrics.json"));

        store.save(&report("Decision Tree")).unwrap();
        store.save(&report("Linear Regression")).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, report("Linear Regression"));
        assert_eq!(loaded.metrics.len(), 1);
    }

    #[test]
    fn test_malformed_report_is_none() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("model_metrics.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(ReportStore::new(path).load().is_none());
    }
}
