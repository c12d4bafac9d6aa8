// ============================================================
// Layer 2 — PredictUseCase
// ============================================================
// Loads the persisted winner on every call and predicts one
// day's library headcount. No model on disk → ModelNotTrained,
// never a number.

use anyhow::Result;

use crate::domain::observation::FeatureVector;
use crate::domain::report::Prediction;
use crate::infra::{checkpoint::CheckpointManager, paths::StorageLocation};
use crate::ml::inferencer::Inferencer;

/// Headcounts above this are flagged as high traffic.
pub const HIGH_TRAFFIC_THRESHOLD: i64 = 100;

pub struct PredictUseCase {
    location: StorageLocation,
}

impl PredictUseCase {
    pub fn new(location: StorageLocation) -> Self {
        Self { location }
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction> {
        let ckpt = CheckpointManager::new(self.location.model_path());

        let Some(inferencer) = Inferencer::from_checkpoint(&ckpt)? else {
            tracing::warn!("No trained model at '{}'", self.location.model_path().display());
            return Ok(Prediction::ModelNotTrained);
        };

        let count = inferencer.predict(features);
        tracing::info!("{} predicts {} students", inferencer.family_name(), count);
        Ok(Prediction::Count(count))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::generate_use_case::GenerateUseCase;
    use crate::application::train_use_case::{TrainConfig, TrainUseCase};
    use crate::data::generator::GenerateConfig;
    use crate::data::store::SqliteStore;
    use crate::domain::traits::ObservationStore;
    use chrono::NaiveDate;

    fn exam_monday() -> FeatureVector {
        FeatureVector {
            day_of_week:           0,
            is_holiday:            false,
            is_exam_week:          true,
            is_librarian_present:  true,
            total_campus_students: 340,
        }
    }

    #[test]
    fn test_prediction_before_training_is_not_trained() {
        let dir = tempfile::tempdir().unwrap();
        let uc  = PredictUseCase::new(StorageLocation::new(dir.path()));
        assert_eq!(uc.predict(&exam_monday()).unwrap(), Prediction::ModelNotTrained);
    }

    #[test]
    fn test_end_to_end_generate_train_predict() {
        let dir      = tempfile::tempdir().unwrap();
        let location = StorageLocation::new(dir.path());

        // Generate two years and store them
        let config = GenerateConfig {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            days:       730,
            seed:       Some(2024),
        };
        GenerateUseCase::new(config, location.clone()).execute().unwrap();

        let stored = SqliteStore::new(location.database_path()).load().unwrap();
        assert_eq!(stored.len(), 730);

        // Train and check the report
        let report = TrainUseCase::new(TrainConfig::default(), location.clone())
            .execute()
            .unwrap();
        assert_eq!(report.metrics.len(), 3);
        assert!(report.metrics.contains_key(&report.best_model));
        for m in report.metrics.values() {
            assert!(m.mae.is_finite());
            assert!(m.r2_score.is_finite());
        }
        assert_eq!(TrainUseCase::last_report(&location), Some(report));

        // Predict twice — a fitted model is deterministic at inference
        let uc     = PredictUseCase::new(location);
        let first  = uc.predict(&exam_monday()).unwrap();
        let second = uc.predict(&exam_monday()).unwrap();
        assert_eq!(first, second);

        let count = first.count().expect("model was trained");
        assert!(count >= 0);
        assert!(count.clamp(0, 350) > 100, "exam-week Monday should be busy, got {count}");
    }
}
