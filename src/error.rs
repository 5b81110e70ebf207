use crate::export::RuntimeError;
use crate::trees::Side;
use thiserror::Error;

/// Reason a source tree cannot be flattened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViolationKind {
    #[error("internal node has no {0} child")]
    MissingChild(Side),
    #[error("child id {child} is not a node of the tree")]
    DanglingChild { child: usize },
    #[error("node is reachable through more than one parent")]
    SharedNode,
    #[error("split feature {feature} is out of range for {n_features} feature columns")]
    FeatureOutOfRange { feature: usize, n_features: usize },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("can not load tree {index}: ensemble has {n_trees} trees")]
    TreeIndexOutOfRange { index: usize, n_trees: usize },

    #[error("malformed tree at node {node}: {reason}")]
    StructuralViolation { node: usize, reason: ViolationKind },

    #[error("feature matrix has {feature_rows} rows but label vector has {label_rows}")]
    ShapeMismatch {
        feature_rows: usize,
        label_rows: usize,
    },

    #[error("label at row {row} is NaN")]
    InvalidLabel { row: usize },

    #[error("declared class at position {position} is NaN")]
    InvalidClass { position: usize },

    #[error("label {label} is not one of the {n_classes} declared classes")]
    ClassCountMismatch { label: f64, n_classes: usize },

    #[error("node {node} has a histogram of length {found}, expected {expected}")]
    HistogramLength {
        node: usize,
        expected: usize,
        found: usize,
    },

    #[error("only single-output trees are supported, got n_outputs = {n_outputs}")]
    UnsupportedOutputs { n_outputs: usize },

    #[error(
        "{target} rejected the tree state (node_count = {node_count}, values shape = {values_shape:?}): {source}"
    )]
    SchemaRejected {
        target: &'static str,
        node_count: usize,
        values_shape: Vec<usize>,
        #[source]
        source: RuntimeError,
    },

    #[error("failed to shape value tensor: {0}")]
    ValueTensor(#[from] ndarray::ShapeError),
}

impl ExportError {
    pub(crate) fn violation(node: usize, reason: ViolationKind) -> Self {
        ExportError::StructuralViolation { node, reason }
    }
}
