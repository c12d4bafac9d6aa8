// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates one training run in order:
//
//   Step 1: Load observations          (Layer 4 - data)
//   Step 2: Refuse when there are none (Layer 3 - domain)
//   Step 3: Encode features / targets  (Layer 4 - data)
//   Step 4: Search, refit, select      (Layer 5 - ml)
//   Step 5: Build the report           (Layer 3 - domain)
//   Step 6: Persist model + report     (Layer 6 - infra)
//
// Nothing is written unless every family trained successfully.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::data::{dataset::UsageDataset, store::SqliteStore};
use crate::domain::errors::TrainingError;
use crate::domain::report::{FamilyMetrics, ModelReport};
use crate::domain::traits::ObservationStore;
use crate::infra::{checkpoint::CheckpointManager, metrics::ReportStore, paths::StorageLocation};
use crate::ml::model::PersistedModel;
use crate::ml::trainer::{run_training, TrainingOutcome};

// ─── Training Configuration ──────────────────────────────────────────────────
// Everything that shapes a run besides the data itself.
// Fixed seeds make two runs on identical data identical.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Share of rows held out for the final scoring
    pub test_fraction: f64,

    /// Folds used to score each grid point
    pub cv_folds: usize,

    /// Seed of the train / held-out shuffle
    pub split_seed: u64,

    /// Seed of the random forest's bootstrap sampling
    pub forest_seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            cv_folds:      3,
            split_seed:    42,
            forest_seed:   42,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            bail!("test fraction must be in (0, 1), got {}", self.test_fraction);
        }
        if self.cv_folds < 2 {
            bail!("cross-validation needs at least 2 folds, got {}", self.cv_folds);
        }
        Ok(())
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config:   TrainConfig,
    location: StorageLocation,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig, location: StorageLocation) -> Self {
        Self { config, location }
    }

    /// Run the full pipeline and return the report that was written.
    pub fn execute(&self) -> Result<ModelReport> {
        self.config.validate()?;

        // ── Step 1-2: Load, refuse on empty ──────────────────────────────────
        let store        = SqliteStore::new(self.location.database_path());
        let observations = store.load()?;
        if observations.is_empty() {
            return Err(TrainingError::NoData.into());
        }
        tracing::info!("Loaded {} observations", observations.len());

        // ── Step 3-4: Encode and train ────────────────────────────────────────
        let dataset = UsageDataset::from_observations(&observations);
        let outcome = run_training(&dataset, &self.config)?;

        // ── Step 5: Report ────────────────────────────────────────────────────
        let report = build_report(&outcome);

        // ── Step 6: Persist ───────────────────────────────────────────────────
        let winner = outcome.winner();
        persist_run(
            &CheckpointManager::new(self.location.model_path()),
            &PersistedModel {
                family: winner.family,
                params: winner.params,
                model:  winner.model.clone(),
            },
            &ReportStore::new(self.location.report_path()),
            &report,
        )?;

        tracing::info!("Training complete. Best model: {}", report.best_model);
        Ok(report)
    }

    /// The report of the last run, if any.
    pub fn last_report(location: &StorageLocation) -> Option<ModelReport> {
        ReportStore::new(location.report_path()).load()
    }
}

/// Stage the model and the report first and rename them into place
/// only once both are written, so a failed write leaves the previous
/// run's pair intact.
fn persist_run(
    checkpoints: &CheckpointManager,
    model:       &PersistedModel,
    reports:     &ReportStore,
    report:      &ModelReport,
) -> Result<()> {
    let staged_model  = checkpoints.stage_model(model)?;
    let staged_report = reports.stage(report)?;

    checkpoints.commit(staged_model)?;
    reports.commit(staged_report)
}

fn build_report(outcome: &TrainingOutcome) -> ModelReport {
    let metrics: BTreeMap<String, FamilyMetrics> = outcome
        .candidates
        .iter()
        .map(|c| {
            (
                c.family.name().to_string(),
                FamilyMetrics::new(c.mae, c.r2, c.params.to_report_map()),
            )
        })
        .collect();

    ModelReport {
        best_model:   outcome.winner().family.name().to_string(),
        metrics,
        last_trained: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(TrainConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let cfg = TrainConfig { test_fraction: 1.0, ..TrainConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = TrainConfig { cv_folds: 1, ..TrainConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_failed_report_write_keeps_previous_model() {
        use crate::ml::family::ModelFamily;
        use crate::ml::linear::LinearModel;
        use crate::ml::model::{FittedModel, Hyperparams};

        let dir         = tempfile::tempdir().unwrap();
        let checkpoints = CheckpointManager::new(dir.path().join("best_model.bin"));

        let model = |intercept: f64| PersistedModel {
            family: ModelFamily::LinearRegression,
            params: Hyperparams::Linear,
            model:  FittedModel::Linear(LinearModel { intercept, coefficients: vec![0.0; 5] }),
        };
        checkpoints.save_model(&model(1.0)).unwrap();

        // The report's parent is a plain file, so its directory cannot be created
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let reports = ReportStore::new(blocker.join("model_metrics.json"));

        let report = ModelReport {
            best_model:   ModelFamily::LinearRegression.name().to_string(),
            metrics:      BTreeMap::new(),
            last_trained: "2024-06-01 12:00:00".to_string(),
        };

        assert!(persist_run(&checkpoints, &model(2.0), &reports, &report).is_err());
        assert_eq!(checkpoints.load_model().unwrap(), Some(model(1.0)));
    }

    #[test]
    fn test_training_without_data_is_refused_and_writes_nothing() {
        let dir      = tempfile::tempdir().unwrap();
        let location = StorageLocation::new(dir.path());

        let err = TrainUseCase::new(TrainConfig::default(), location.clone())
            .execute()
            .unwrap_err();

        assert!(matches!(err.downcast_ref::<TrainingError>(), Some(TrainingError::NoData)));
        assert!(!location.model_path().exists());
        assert!(TrainUseCase::last_report(&location).is_none());
    }
}
