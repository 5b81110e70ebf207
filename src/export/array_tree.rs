use crate::export::runtime::RuntimeError;
use crate::export::state::{TreeShape, TreeState};
use crate::flatten::{NodeRecord, TREE_LEAF, TREE_UNDEFINED};
use ndarray::{Array3, ArrayView1, ArrayView2};

/// A tree value that has been allocated but not populated yet.
#[derive(Debug, Clone)]
pub struct TreeAllocation {
    shape: TreeShape,
}

impl TreeAllocation {
    pub fn shape(&self) -> &TreeShape {
        &self.shape
    }

    /// Validates `state` against the allocated shape and `version`.
    pub fn populate(self, state: &TreeState, version: &str) -> Result<ArrayTree, RuntimeError> {
        let shape = self.shape;
        if state.format_version != version {
            return Err(RuntimeError::VersionMismatch {
                expected: version.to_string(),
                found: state.format_version.clone(),
            });
        }
        if shape.n_classes.len() != shape.n_outputs {
            return Err(RuntimeError::ClassVectorMismatch {
                n_outputs: shape.n_outputs,
                n_classes: shape.n_classes.len(),
            });
        }
        if state.nodes.len() != state.node_count {
            return Err(RuntimeError::NodeCountMismatch {
                declared: state.node_count,
                records: state.nodes.len(),
            });
        }

        let expected = [state.node_count, shape.n_outputs, shape.max_n_classes()];
        if state.values.shape() != expected {
            return Err(RuntimeError::ValueShapeMismatch {
                expected,
                found: state.values_shape(),
            });
        }

        let computed = check_structure(&state.nodes, shape.n_features)?;
        if computed != state.max_depth {
            return Err(RuntimeError::DepthMismatch {
                declared: state.max_depth,
                computed,
            });
        }

        let nodes = &state.nodes;
        Ok(ArrayTree {
            children_left: nodes.iter().map(|n| n.left_child).collect(),
            children_right: nodes.iter().map(|n| n.right_child).collect(),
            feature: nodes.iter().map(|n| n.feature).collect(),
            threshold: nodes.iter().map(|n| n.threshold).collect(),
            impurity: nodes.iter().map(|n| n.impurity).collect(),
            n_node_samples: nodes.iter().map(|n| n.n_node_samples).collect(),
            weighted_n_node_samples: nodes.iter().map(|n| n.weighted_n_node_samples).collect(),
            value: state.values.clone(),
            max_depth: state.max_depth,
            shape,
        })
    }
}

/// Checks child links and leaf sentinels; returns the depth they imply.
fn check_structure(nodes: &[NodeRecord], n_features: usize) -> Result<i64, RuntimeError> {
    let node_count = nodes.len();
    let mut depth: Vec<Option<i64>> = vec![None; node_count];
    let mut max_depth = -1;

    for (i, node) in nodes.iter().enumerate() {
        let d = match (i, depth[i]) {
            (0, _) => 0,
            (_, Some(d)) => d,
            (_, None) => return Err(RuntimeError::OrphanNode { node: i }),
        };
        max_depth = max_depth.max(d);

        let left_leaf = node.left_child == TREE_LEAF;
        let right_leaf = node.right_child == TREE_LEAF;
        if left_leaf != right_leaf || (left_leaf && node.feature != TREE_UNDEFINED) {
            return Err(RuntimeError::InconsistentLeaf { node: i });
        }
        if left_leaf {
            continue;
        }

        if node.feature < 0 || node.feature as usize >= n_features {
            return Err(RuntimeError::FeatureOutOfRange {
                node: i,
                feature: node.feature,
                n_features,
            });
        }
        for child in [node.left_child, node.right_child] {
            if child <= i as i64 || child as usize >= node_count {
                return Err(RuntimeError::ChildOutOfBounds { node: i, child });
            }
            let slot = &mut depth[child as usize];
            if slot.is_some() {
                return Err(RuntimeError::SharedChild {
                    node: child as usize,
                });
            }
            *slot = Some(d + 1);
        }
    }

    Ok(max_depth)
}

/// Populated array-based binary tree.
///
/// Each node is addressed by its position; leaves carry `-1` children and a
/// `-2` feature. `value[[node, output, class]]` holds the node's class counts.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayTree {
    shape: TreeShape,
    max_depth: i64,
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    impurity: Vec<f64>,
    n_node_samples: Vec<i64>,
    weighted_n_node_samples: Vec<f64>,
    value: Array3<f64>,
}

impl ArrayTree {
    pub fn allocate(shape: TreeShape) -> TreeAllocation {
        TreeAllocation { shape }
    }

    pub fn node_count(&self) -> usize {
        self.children_left.len()
    }

    pub fn max_depth(&self) -> i64 {
        self.max_depth
    }

    pub fn n_features(&self) -> usize {
        self.shape.n_features
    }

    pub fn n_classes(&self) -> &[usize] {
        &self.shape.n_classes
    }

    pub fn n_outputs(&self) -> usize {
        self.shape.n_outputs
    }

    pub fn children_left(&self) -> &[i64] {
        &self.children_left
    }

    pub fn children_right(&self) -> &[i64] {
        &self.children_right
    }

    pub fn feature(&self) -> &[i64] {
        &self.feature
    }

    pub fn threshold(&self) -> &[f64] {
        &self.threshold
    }

    pub fn impurity(&self) -> &[f64] {
        &self.impurity
    }

    pub fn n_node_samples(&self) -> &[i64] {
        &self.n_node_samples
    }

    pub fn weighted_n_node_samples(&self) -> &[f64] {
        &self.weighted_n_node_samples
    }

    pub fn value(&self) -> &Array3<f64> {
        &self.value
    }

    pub fn is_leaf(&self, node: usize) -> bool {
        self.children_left[node] == TREE_LEAF
    }

    /// Leaf reached by each row, routing left when `x[feature] <= threshold`.
    pub fn apply(&self, features: ArrayView2<'_, f64>) -> Result<Vec<usize>, RuntimeError> {
        if self.node_count() == 0 {
            return Err(RuntimeError::EmptyTree);
        }
        if features.ncols() != self.n_features() {
            return Err(RuntimeError::FeatureCountMismatch {
                expected: self.n_features(),
                found: features.ncols(),
            });
        }
        Ok(features.rows().into_iter().map(|row| self.leaf_for(row)).collect())
    }

    fn leaf_for(&self, row: ArrayView1<'_, f64>) -> usize {
        let mut node = 0;
        while !self.is_leaf(node) {
            let feature = self.feature[node] as usize;
            node = if row[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        node
    }
}
