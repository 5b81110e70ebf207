use crate::flatten::NodeRecord;
use ndarray::Array3;
use serde::Serialize;

/// Shape parameters a tree value is allocated with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeShape {
    pub n_features: usize,
    /// Class count per output.
    pub n_classes: Vec<usize>,
    pub n_outputs: usize,
}

impl TreeShape {
    pub fn single_output(n_features: usize, n_classes: usize) -> Self {
        Self {
            n_features,
            n_classes: vec![n_classes],
            n_outputs: 1,
        }
    }

    /// Widest class count, the last axis of the value tensor.
    pub fn max_n_classes(&self) -> usize {
        self.n_classes.iter().copied().max().unwrap_or(0)
    }
}

/// State bundle used to populate an allocated tree value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeState {
    pub max_depth: i64,
    pub node_count: usize,
    pub nodes: Vec<NodeRecord>,
    /// `(node_count, n_outputs, n_classes)`.
    pub values: Array3<f64>,
    pub format_version: String,
}

impl TreeState {
    pub fn values_shape(&self) -> Vec<usize> {
        self.values.shape().to_vec()
    }
}
