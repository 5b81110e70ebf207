//! Small hand-built source trees.

use crate::trees::{SourceNode, SourceTree, ThresholdSplit};

pub fn single_leaf(impurity: f64) -> SourceTree {
    let mut tree = SourceTree::new();
    let root = tree.push_leaf(0, impurity);
    tree.with_root(root)
}

/// Depth-1 tree splitting on `feature <= threshold`.
pub fn stump(feature: usize, threshold: f64) -> SourceTree {
    let mut tree = SourceTree::new();
    let left = tree.push_leaf(1, 0.0);
    let right = tree.push_leaf(2, 0.0);
    let root = tree.push_split(0, 0.5, ThresholdSplit::new(feature, threshold), left, right);
    tree.with_root(root)
}

/// `f0 <= 0.5` at the root, `f1 <= 0.5` under its left branch.
///
/// Node numbers are assigned breadth-first (root 0, right leaf 1, inner 2,
/// inner's leaves 3 and 4) so they differ from pre-order positions.
pub fn left_deep() -> SourceTree {
    let mut tree = SourceTree::new();
    let a = tree.push_leaf(3, 0.0);
    let b = tree.push_leaf(4, 0.0);
    let inner = tree.push_split(2, 0.5, ThresholdSplit::new(1, 0.5), a, b);
    let c = tree.push_leaf(1, 0.0);
    let root = tree.push_split(0, 0.44, ThresholdSplit::new(0, 0.5), inner, c);
    tree.with_root(root)
}

/// Malformed: the root split has a left child and nothing on the right.
pub fn left_only() -> SourceTree {
    let mut tree = SourceTree::new();
    let left = tree.push_leaf(1, 0.0);
    let root = tree.push(SourceNode::split(
        0,
        0.5,
        ThresholdSplit::new(0, 0.5),
        Some(left),
        None,
    ));
    tree.with_root(root)
}
