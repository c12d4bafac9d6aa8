// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Wraps a PersistedModel loaded from the checkpoint directory
// and turns one FeatureVector into a headcount.
//
// The raw regression output is truncated toward zero and NOT
// clamped: a prediction outside [0, 350] is returned as is.

use anyhow::Result;
use ndarray::Array1;

use crate::domain::observation::FeatureVector;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::{PersistedModel, Regressor};

pub struct Inferencer {
    model: PersistedModel,
}

impl Inferencer {
    pub fn new(model: PersistedModel) -> Self {
        Self { model }
    }

    /// Load the persisted winner; None when no model has been trained.
    pub fn from_checkpoint(ckpt_manager: &CheckpointManager) -> Result<Option<Self>> {
        let Some(model) = ckpt_manager.load_model()? else {
            return Ok(None);
        };
        tracing::debug!("Model loaded from checkpoint: {}", model.family.name());
        Ok(Some(Self::new(model)))
    }

    /// Raw regression output for one feature vector.
    pub fn predict_raw(&self, features: &FeatureVector) -> f64 {
        let row = Array1::from_vec(features.to_row().to_vec());
        self.model.model.predict_row(row.view())
    }

    /// Headcount: raw output truncated toward zero.
    pub fn predict(&self, features: &FeatureVector) -> i64 {
        let raw = self.predict_raw(features);
        tracing::debug!("{:?} → raw prediction {:.3}", features, raw);
        raw.trunc() as i64
    }

    pub fn family_name(&self) -> &'static str {
        self.model.family.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::family::ModelFamily;
    use crate::ml::linear::LinearModel;
    use crate::ml::model::{FittedModel, Hyperparams};

    fn linear(intercept: f64, campus_coef: f64) -> Inferencer {
        Inferencer::new(PersistedModel {
            family: ModelFamily::LinearRegression,
            params: Hyperparams::Linear,
            model:  FittedModel::Linear(LinearModel {
                intercept,
                coefficients: vec![0.0, 0.0, 0.0, 0.0, campus_coef],
            }),
        })
    }

    fn features(total_campus_students: u32) -> FeatureVector {
        FeatureVector {
            day_of_week:           0,
            is_holiday:            false,
            is_exam_week:          true,
            is_librarian_present:  true,
            total_campus_students,
        }
    }

    #[test]
    fn test_truncates_toward_zero() {
        assert_eq!(linear(0.0, 0.8).predict(&features(340)), 272);
        assert_eq!(linear(0.9, 0.0).predict(&features(0)), 0);
        assert_eq!(linear(-3.7, 0.0).predict(&features(0)), -3);
    }

    #[test]
    fn test_output_is_not_clamped() {
        assert_eq!(linear(500.0, 0.0).predict(&features(10)), 500);
    }
}
