// ============================================================
// Layer 4 — Train/Test Splitter and K-Fold Partitioning
// ============================================================
// Two partitioning steps feed the training pipeline:
//
//   split_train_test() — seeded shuffle, then the last
//                        ceil(n * test_fraction) items become the
//                        held-out set. Same seed + same input →
//                        same partition on every run.
//
//   kfold()            — contiguous, unshuffled K-fold over
//                        0..n for cross-validation. The first
//                        n % k folds get one extra item.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom driven
// by a StdRng seeded from a u64.
//
// Reference: Rust Book §8 (Vectors)
//            rand crate documentation

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle `samples` with a seeded RNG and split into (train, test).
///
/// # Arguments
/// * `samples`       - All available samples (consumed by this function)
/// * `test_fraction` - Proportion held out, e.g. 0.2 = 20%
/// * `seed`          - Shuffle seed
///
/// # Example
/// ```ignore
/// let (train, test) = split_train_test((0..100).collect(), 0.2, 42);
/// // train has 80 items, test has 20
/// ```
pub fn split_train_test<T>(mut samples: Vec<T>, test_fraction: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    let total   = samples.len();
    let n_test  = ((total as f64) * test_fraction).ceil() as usize;
    let n_test  = n_test.min(total);
    let n_train = total - n_test;

    // split_off(n) removes elements [n..] and returns them
    let test = samples.split_off(n_train);

    tracing::debug!(
        "Dataset split: {} training, {} held out (seed {})",
        samples.len(),
        test.len(),
        seed,
    );

    (samples, test)
}

/// One cross-validation round: indices to fit on and indices to score on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    pub train:      Vec<usize>,
    pub validation: Vec<usize>,
}

/// Contiguous K-fold partition of `0..n`.
///
/// Returns an empty Vec when `k < 2` or `n < k`.
pub fn kfold(n: usize, k: usize) -> Vec<Fold> {
    if k < 2 || n < k {
        return Vec::new();
    }

    let base  = n / k;
    let extra = n % k;

    let mut folds = Vec::with_capacity(k);
    let mut start = 0;

    for i in 0..k {
        let size = base + usize::from(i < extra);
        let end  = start + size;

        let validation: Vec<usize> = (start..end).collect();
        let train: Vec<usize>      = (0..start).chain(end..n).collect();

        folds.push(Fold { train, validation });
        start = end;
    }

    folds
}
