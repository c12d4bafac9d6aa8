// ============================================================
// Layer 5 — CART Regression Tree
// ============================================================
// Binary regression tree grown greedily on squared error:
//
//   at each node
//     stop if  n < min_samples_split
//          or  depth == max_depth
//          or  node is pure (SSE ≈ 0)
//     else for every feature
//          sort rows by that feature
//          scan thresholds between distinct neighbouring values
//          keep the split with the lowest left SSE + right SSE
//   leaf value = mean target of the rows reaching it
//
// Nodes live in a flat Vec (index 0 is the root), so a fitted
// tree is plain data: serialisable, cloneable, and rebuilt
// exactly by the predictor.

use ndarray::{ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::data::dataset::UsageDataset;
use crate::ml::model::Regressor;

const IMPURITY_EPS: f64 = 1e-9;

/// Decision tree grid point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeParams {
    /// None grows until leaves are pure or too small to split
    pub max_depth: Option<usize>,

    /// Minimum rows a node needs before it may be split
    pub min_samples_split: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self { max_depth: None, min_samples_split: 2 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature:   usize,
        threshold: f64,
        left:      usize,
        right:     usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    pub fn fit(data: &UsageDataset, params: TreeParams) -> Self {
        let indices: Vec<usize> = (0..data.sample_count()).collect();
        Self::fit_rows(data.records.view(), data.targets.view(), indices, params)
    }

    /// Fit on the given row indices; duplicates are allowed
    /// (bootstrap samples).
    pub(crate) fn fit_rows<'a>(
        records: ArrayView2<'a, f64>,
        targets: ArrayView1<'a, f64>,
        indices: Vec<usize>,
        params:  TreeParams,
    ) -> Self {
        let mut builder = TreeBuilder { records, targets, params, nodes: Vec::new() };
        builder.grow(indices, 0);
        Self { nodes: builder.nodes }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Length of the longest root-to-leaf path, in edges.
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], id: usize) -> usize {
            match &nodes[id] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        if self.nodes.is_empty() { 0 } else { walk(&self.nodes, 0) }
    }
}

impl Regressor for RegressionTree {
    fn predict_row(&self, row: ArrayView1<f64>) -> f64 {
        let mut id = 0;
        loop {
            match self.nodes.get(id) {
                Some(Node::Leaf { value }) => return *value,
                Some(Node::Split { feature, threshold, left, right }) => {
                    id = if row[*feature] <= *threshold { *left } else { *right };
                }
                None => return 0.0,
            }
        }
    }
}

// ─── Tree Growing ─────────────────────────────────────────────────────────────
struct TreeBuilder<'a> {
    records: ArrayView2<'a, f64>,
    targets: ArrayView1<'a, f64>,
    params:  TreeParams,
    nodes:   Vec<Node>,
}

struct SplitChoice {
    feature:   usize,
    threshold: f64,
}

impl TreeBuilder<'_> {
    /// Grow the subtree for `indices` and return its node id.
    fn grow(&mut self, mut indices: Vec<usize>, depth: usize) -> usize {
        let id = self.nodes.len();

        let n = indices.len();
        let (sum, sum_sq) = indices.iter().fold((0.0, 0.0), |(s, q), &i| {
            let y = self.targets[i];
            (s + y, q + y * y)
        });
        let mean = if n > 0 { sum / n as f64 } else { 0.0 };
        self.nodes.push(Node::Leaf { value: mean });

        let sse           = if n > 0 { sum_sq - sum * sum / n as f64 } else { 0.0 };
        let depth_reached = self.params.max_depth.is_some_and(|max| depth >= max);
        if n < self.params.min_samples_split.max(2) || depth_reached || sse <= IMPURITY_EPS {
            return id;
        }

        let Some(split) = self.best_split(&mut indices, sum, sum_sq, sse) else {
            return id;
        };

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| self.records[[i, split.feature]] <= split.threshold);

        let left  = self.grow(left_rows, depth + 1);
        let right = self.grow(right_rows, depth + 1);

        self.nodes[id] = Node::Split {
            feature:   split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        id
    }

    /// Lowest-SSE split across all features, or None when no split
    /// reduces the node's SSE. Earlier features win exact ties.
    fn best_split(
        &self,
        indices:     &mut [usize],
        total_sum:   f64,
        total_sq:    f64,
        parent_sse:  f64,
    ) -> Option<SplitChoice> {
        let n = indices.len();
        let mut best: Option<SplitChoice> = None;
        let mut best_sse = parent_sse - IMPURITY_EPS;

        for feature in 0..self.records.ncols() {
            indices.sort_by(|&a, &b| {
                self.records[[a, feature]].total_cmp(&self.records[[b, feature]])
            });

            let mut left_sum = 0.0;
            let mut left_sq  = 0.0;

            for k in 1..n {
                let prev = indices[k - 1];
                let y    = self.targets[prev];
                left_sum += y;
                left_sq  += y * y;

                let lo = self.records[[prev, feature]];
                let hi = self.records[[indices[k], feature]];
                if lo >= hi {
                    continue;
                }

                let n_left    = k as f64;
                let n_right   = (n - k) as f64;
                let right_sum = total_sum - left_sum;
                let right_sq  = total_sq - left_sq;

                let sse = (left_sq - left_sum * left_sum / n_left)
                    + (right_sq - right_sum * right_sum / n_right);

                if sse < best_sse {
                    best_sse = sse;
                    let mut threshold = lo + (hi - lo) / 2.0;
                    if threshold >= hi {
                        threshold = lo;
                    }
                    best = Some(SplitChoice { feature, threshold });
                }
            }
        }

        best
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};

    /// y depends on a step in feature 4 and on feature 2.
    fn step_data() -> UsageDataset {
        let mut rows = Vec::new();
        let mut ys   = Vec::new();
        for i in 0..60 {
            let exam   = (i % 5 == 0) as u8 as f64;
            let campus = (200 + i * 2) as f64;
            rows.extend_from_slice(&[(i % 7) as f64, 0.0, exam, 1.0, campus]);
            ys.push(if campus > 260.0 { 100.0 } else { 50.0 } + exam * 30.0);
        }
        UsageDataset {
            records: Array2::from_shape_vec((60, 5), rows).unwrap(),
            targets: Array1::from_vec(ys),
        }
    }

    #[test]
    fn test_unbounded_tree_fits_training_data_exactly() {
        let data = step_data();
        let tree = RegressionTree::fit(&data, TreeParams::default());
        let pred = tree.predict(data.records.view());
        assert_eq!(pred, data.targets);
    }

    #[test]
    fn test_max_depth_is_respected() {
        let data = step_data();
        let tree = RegressionTree::fit(&data, TreeParams { max_depth: Some(1), min_samples_split: 2 });
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn test_min_samples_split_blocks_small_nodes() {
        let data = step_data();
        let tree = RegressionTree::fit(&data, TreeParams { max_depth: None, min_samples_split: 100 });
        assert_eq!(tree.node_count(), 1);

        let mean = data.targets.sum() / data.targets.len() as f64;
        let pred = tree.predict_row(data.records.row(0));
        assert!((pred - mean).abs() < 1e-9);
    }

    #[test]
    fn test_constant_target_is_single_leaf() {
        let mut data = step_data();
        data.targets.fill(42.0);
        let tree = RegressionTree::fit(&data, TreeParams::default());
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.predict_row(data.records.row(3)), 42.0);
    }

    #[test]
    fn test_fitting_is_deterministic() {
        let data = step_data();
        let a = RegressionTree::fit(&data, TreeParams { max_depth: Some(10), min_samples_split: 5 });
        let b = RegressionTree::fit(&data, TreeParams { max_depth: Some(10), min_samples_split: 5 });
        assert_eq!(a, b);
    }

    #[test]
    fn test_fit_rows_on_repeated_indices() {
        let data = step_data();
        let rows = vec![0, 0, 7, 7, 7, 59];
        let tree = RegressionTree::fit_rows(data.records.view(), data.targets.view(), rows, TreeParams::default());

        assert_eq!(tree.predict_row(data.records.row(0)), data.targets[0]);
        assert_eq!(tree.predict_row(data.records.row(59)), data.targets[59]);
    }
}
