// ============================================================
// Layer 5 — Linear Regression
// ============================================================
// Ordinary least squares with intercept, fitted by linfa-linear.
// Only the intercept and coefficients are kept so the fitted
// model serialises without any linfa types.
//
// The normal equations are singular whenever a column carries
// no information of its own: constant columns (no exam week in a
// Jan–Apr dataset, no holiday in a short fold) or columns that
// are linear combinations of the others. Such columns get a zero
// coefficient:
//
//   1. constant columns are dropped up front
//   2. if the remaining design is still singular, columns are
//      added one at a time and kept only while the fit succeeds

use anyhow::{anyhow, Result};
use linfa::{traits::Fit, Dataset};
use linfa_linear::LinearRegression;
use ndarray::{ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use crate::data::dataset::UsageDataset;
use crate::ml::model::Regressor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept:    f64,
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    pub fn fit(data: &UsageDataset) -> Result<Self> {
        let width = data.records.ncols();
        let informative: Vec<usize> = (0..width)
            .filter(|&j| !is_constant(data.records.column(j)))
            .collect();

        let (kept, (intercept, fitted)) = match solve(data, &informative) {
            Ok(fit) => (informative, fit),
            Err(e) => {
                tracing::debug!("design matrix is singular ({e:#}), selecting columns");
                forward_select(data, &informative)?
            }
        };

        let mut coefficients = vec![0.0; width];
        for (&j, c) in kept.iter().zip(fitted) {
            coefficients[j] = c;
        }

        Ok(Self { intercept, coefficients })
    }
}

fn is_constant(column: ArrayView1<f64>) -> bool {
    let mut values = column.iter();
    match values.next() {
        Some(&first) => values.all(|&x| x == first),
        None => true,
    }
}

/// OLS on the given columns only; no columns means the intercept
/// is the target mean.
fn solve(data: &UsageDataset, columns: &[usize]) -> Result<(f64, Vec<f64>)> {
    if columns.is_empty() {
        return Ok((data.targets.mean().unwrap_or(0.0), Vec::new()));
    }

    let dataset = Dataset::new(data.records.select(Axis(1), columns), data.targets.clone());
    let fitted  = LinearRegression::new()
        .fit(&dataset)
        .map_err(|e| anyhow!("least squares fit failed: {e}"))?;

    Ok((fitted.intercept(), fitted.params().to_vec()))
}

/// Grow the column set left to right, skipping every column that
/// makes the design singular.
fn forward_select(data: &UsageDataset, candidates: &[usize]) -> Result<(Vec<usize>, (f64, Vec<f64>))> {
    let mut kept: Vec<usize> = Vec::with_capacity(candidates.len());

    for &j in candidates {
        kept.push(j);
        if solve(data, &kept).is_err() {
            tracing::debug!("dropping linearly dependent column {j}");
            kept.pop();
        }
    }

    let fit = solve(data, &kept)?;
    Ok((kept, fit))
}

impl Regressor for LinearModel {
    fn predict_row(&self, row: ArrayView1<f64>) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row.iter())
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}
