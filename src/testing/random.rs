//! Seeded random trees and datasets for property tests.

use crate::trees::{NodeId, SourceTree, ThresholdSplit};
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Well-formed random tree along with its internal and leaf counts.
pub struct RandomTree {
    pub tree: SourceTree,
    pub n_internal: usize,
    pub n_leaves: usize,
}

pub fn random_tree(seed: u64, max_depth: usize, n_features: usize) -> RandomTree {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = RandomTree {
        tree: SourceTree::new(),
        n_internal: 0,
        n_leaves: 0,
    };
    let mut next_num = 0;
    let root = grow(&mut rng, &mut out, &mut next_num, 0, max_depth, n_features);
    out.tree.set_root(root);
    out
}

fn grow(
    rng: &mut StdRng,
    out: &mut RandomTree,
    next_num: &mut usize,
    depth: usize,
    max_depth: usize,
    n_features: usize,
) -> NodeId {
    let node_num = *next_num;
    *next_num += 1;
    let impurity = rng.random_range(0.0..0.5);

    if depth >= max_depth || n_features == 0 || rng.random_bool(0.3) {
        out.n_leaves += 1;
        return out.tree.push_leaf(node_num, impurity);
    }

    let split = ThresholdSplit::new(rng.random_range(0..n_features), rng.random_range(0.0..1.0));
    let left = grow(rng, out, next_num, depth + 1, max_depth, n_features);
    let right = grow(rng, out, next_num, depth + 1, max_depth, n_features);
    out.n_internal += 1;
    out.tree.push_split(node_num, impurity, split, left, right)
}

/// Uniform features in `[0, 1)` and integer labels in `0..n_classes`.
pub fn random_dataset(
    seed: u64,
    n_rows: usize,
    n_features: usize,
    n_classes: usize,
) -> (Array2<f64>, Array1<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let x = Array2::from_shape_fn((n_rows, n_features), |_| rng.random::<f64>());
    let y = Array1::from_shape_fn(n_rows, |_| rng.random_range(0..n_classes.max(1)) as f64);
    (x, y)
}
