// ============================================================
// Layer 5 — Regression Metrics
// ============================================================
// MAE = mean(|y_true - y_pred|)
// R²  = 1 - SS_res / SS_tot
//
// A constant target (SS_tot = 0) scores 1.0 when predicted
// perfectly and 0.0 otherwise.

use ndarray::ArrayView1;

/// Mean absolute error. Lower is better; 0.0 for empty input.
pub fn mean_absolute_error(y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> f64 {
    assert_eq!(y_true.len(), y_pred.len(), "Arrays must have the same length");
    if y_true.is_empty() {
        return 0.0;
    }

    let sum_abs: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (t - p).abs())
        .sum();

    sum_abs / y_true.len() as f64
}

/// Coefficient of determination. 1.0 is a perfect fit, can be negative.
pub fn r2_score(y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> f64 {
    assert_eq!(y_true.len(), y_pred.len(), "Arrays must have the same length");
    if y_true.is_empty() {
        return 0.0;
    }

    let mean = y_true.sum() / y_true.len() as f64;

    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (t - p).powi(2))
        .sum();
    let ss_tot: f64 = y_true.iter().map(|&t| (t - mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}
