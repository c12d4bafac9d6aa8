// ============================================================
// Layer 5 — Training & Selection Loop
// ============================================================
// For a dataset of observations:
//
//   1. Seeded 80/20 train / held-out split
//   2. For every model family:
//        grid search, each point scored by mean R² over
//        K contiguous folds of the training subset
//        (first point wins ties)
//   3. Refit the best point on the whole training subset,
//      score it on the held-out subset (MAE, R²)
//   4. Winner = highest held-out R²; strict `>` against the
//      running best, so the earlier family wins ties
//
// Any family failing aborts the whole run — no partial results.

use anyhow::{anyhow, Result};
use std::time::Instant;

use crate::application::train_use_case::TrainConfig;
use crate::data::dataset::UsageDataset;
use crate::data::splitter::{kfold, split_train_test};
use crate::domain::errors::TrainingError;
use crate::ml::family::ModelFamily;
use crate::ml::metrics::{mean_absolute_error, r2_score};
use crate::ml::model::{FittedModel, Hyperparams, Regressor};

/// One family's best configuration, refitted and scored on held-out data.
#[derive(Debug, Clone)]
pub struct CandidateResult {
    pub family: ModelFamily,
    pub params: Hyperparams,

    /// Mean cross-validated R² of `params` on the training subset
    pub cv_r2: f64,

    /// Held-out scores of the refitted model
    pub mae: f64,
    pub r2:  f64,

    pub model: FittedModel,
}

#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    /// One entry per family, in ModelFamily::ALL order
    pub candidates: Vec<CandidateResult>,

    /// Index of the winner in `candidates`
    pub best: usize,
}

impl TrainingOutcome {
    pub fn winner(&self) -> &CandidateResult {
        &self.candidates[self.best]
    }
}

/// Train every family on `dataset` and pick the best one.
pub fn run_training(dataset: &UsageDataset, cfg: &TrainConfig) -> Result<TrainingOutcome> {
    if dataset.is_empty() {
        return Err(TrainingError::NoData.into());
    }

    // ── Step 1: Train / held-out split ───────────────────────────────────────
    let all_rows: Vec<usize> = (0..dataset.sample_count()).collect();
    let (train_rows, test_rows) = split_train_test(all_rows, cfg.test_fraction, cfg.split_seed);

    let train = dataset.select(&train_rows);
    let test  = dataset.select(&test_rows);

    let folds = kfold(train.sample_count(), cfg.cv_folds);
    if folds.is_empty() || test.is_empty() {
        return Err(TrainingError::TooFewRows {
            rows:  dataset.sample_count(),
            folds: cfg.cv_folds,
        }
        .into());
    }

    // Materialise the fold subsets once; every grid point reuses them
    let fold_data: Vec<(UsageDataset, UsageDataset)> = folds
        .iter()
        .map(|f| (train.select(&f.train), train.select(&f.validation)))
        .collect();

    tracing::info!(
        "Training on {} rows, holding out {} ({} folds)",
        train.sample_count(),
        test.sample_count(),
        fold_data.len()
    );

    // ── Steps 2-4: Search, refit, score, select ──────────────────────────────
    let mut candidates = Vec::with_capacity(ModelFamily::ALL.len());
    let mut best       = None;
    let mut best_r2    = f64::NEG_INFINITY;

    for family in ModelFamily::ALL {
        let started = Instant::now();

        let result = evaluate_family(family, &train, &test, &fold_data, cfg.forest_seed)
            .map_err(|e| TrainingError::Candidate {
                family: family.name().to_string(),
                reason: format!("{e:#}"),
            })?;

        tracing::info!(
            "{:<17} | cv_r2={:.4} | mae={:.2} | r2={:.3} | {:?} | {:.1?}",
            family.name(),
            result.cv_r2,
            result.mae,
            result.r2,
            result.params,
            started.elapsed(),
        );

        if result.r2 > best_r2 {
            best_r2 = result.r2;
            best    = Some(candidates.len());
        }
        candidates.push(result);
    }

    let best = best.ok_or_else(|| anyhow!("no candidate produced a finite held-out score"))?;
    tracing::info!("Best model: {}", candidates[best].family.name());

    Ok(TrainingOutcome { candidates, best })
}

fn evaluate_family(
    family:    ModelFamily,
    train:     &UsageDataset,
    test:      &UsageDataset,
    fold_data: &[(UsageDataset, UsageDataset)],
    seed:      u64,
) -> Result<CandidateResult> {
    let (params, cv_r2) = grid_search(family, fold_data, seed)?;

    let model = family.fit(&params, train, seed)?;
    let pred  = model.predict(test.records.view());

    Ok(CandidateResult {
        family,
        params,
        cv_r2,
        mae: mean_absolute_error(test.targets.view(), pred.view()),
        r2:  r2_score(test.targets.view(), pred.view()),
        model,
    })
}

/// Exhaustive search over `family.grid()`, returning the point with
/// the highest mean fold R² (first one on ties) and that score.
pub fn grid_search(
    family:    ModelFamily,
    fold_data: &[(UsageDataset, UsageDataset)],
    seed:      u64,
) -> Result<(Hyperparams, f64)> {
    let mut best: Option<(Hyperparams, f64)> = None;

    for params in family.grid() {
        let mut total = 0.0;
        for (fit_on, score_on) in fold_data {
            let model = family.fit(&params, fit_on, seed)?;
            let pred  = model.predict(score_on.records.view());
            total += r2_score(score_on.targets.view(), pred.view());
        }
        let mean = total / fold_data.len().max(1) as f64;

        tracing::debug!("{} {:?} → mean cv r2 {:.4}", family.name(), params, mean);

        if best.map_or(true, |(_, score)| mean > score) {
            best = Some((params, mean));
        }
    }

    best.ok_or_else(|| anyhow!("{} has an empty hyperparameter grid", family.name()))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generator::DataGenerator;
    use chrono::NaiveDate;

    fn dataset(days: usize, seed: u64) -> UsageDataset {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let obs   = DataGenerator::new(Some(seed)).generate(start, days);
        UsageDataset::from_observations(&obs)
    }

    #[test]
    fn test_empty_dataset_is_refused() {
        let empty = UsageDataset::from_observations(&[]);
        let err   = run_training(&empty, &TrainConfig::default()).unwrap_err();
        assert!(matches!(err.downcast_ref::<TrainingError>(), Some(TrainingError::NoData)));
    }

    #[test]
    fn test_too_few_rows_is_refused() {
        let tiny = dataset(3, 1);
        let err  = run_training(&tiny, &TrainConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TrainingError>(),
            Some(TrainingError::TooFewRows { .. })
        ));
    }

    #[test]
    fn test_grid_search_prefers_first_on_ties() {
        // A constant target gives every tree point the same score
        let mut data = dataset(200, 3);
        data.targets.fill(10.0);
        let folds: Vec<_> = kfold(data.sample_count(), 3)
            .iter()
            .map(|f| (data.select(&f.train), data.select(&f.validation)))
            .collect();

        let (params, score) = grid_search(ModelFamily::DecisionTree, &folds, 0).unwrap();
        assert_eq!(params, ModelFamily::DecisionTree.grid()[0]);
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_training_selects_and_is_deterministic() {
        let data = dataset(400, 42);
        let cfg  = TrainConfig::default();

        let a = run_training(&data, &cfg).unwrap();
        let b = run_training(&data, &cfg).unwrap();

        assert_eq!(a.candidates.len(), 3);
        assert_eq!(a.winner().family, b.winner().family);
        for (x, y) in a.candidates.iter().zip(&b.candidates) {
            assert_eq!(x.params, y.params);
            assert_eq!(x.mae, y.mae);
            assert_eq!(x.r2, y.r2);
        }

        let max_r2 = a.candidates.iter().map(|c| c.r2).fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(a.winner().r2, max_r2);
        assert!(a.winner().r2 > 0.5);
    }

    #[test]
    fn test_training_without_exam_weeks_succeeds() {
        // January to April: the exam-week column is all zeros
        let data = dataset(120, 5);
        assert!(data.records.column(2).iter().all(|&x| x == 0.0));

        let outcome = run_training(&data, &TrainConfig::default()).unwrap();
        assert_eq!(outcome.candidates.len(), 3);
        assert_eq!(outcome.candidates[0].family, ModelFamily::LinearRegression);
        for c in &outcome.candidates {
            assert!(c.mae.is_finite() && c.r2.is_finite());
        }
    }
}
