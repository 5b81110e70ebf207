use crate::export::array_tree::ArrayTree;
use crate::export::model::DecisionTreeModel;
use crate::export::state::{TreeShape, TreeState};
use crate::trees::ModelKind;
use log::debug;
use thiserror::Error;

/// Format version written by, and required by, [`NativeRuntime`].
pub const NATIVE_FORMAT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("state was written for format {found}, runtime is {expected}")]
    VersionMismatch { expected: String, found: String },
    #[error("{n_outputs} outputs declared but {n_classes} class counts given")]
    ClassVectorMismatch { n_outputs: usize, n_classes: usize },
    #[error("node_count is {declared} but {records} node records were supplied")]
    NodeCountMismatch { declared: usize, records: usize },
    #[error("value tensor has shape {found:?}, expected {expected:?}")]
    ValueShapeMismatch {
        expected: [usize; 3],
        found: Vec<usize>,
    },
    #[error("node {node} mixes leaf sentinels with split fields")]
    InconsistentLeaf { node: usize },
    #[error("node {node} points at child {child} outside ({node}, node_count)")]
    ChildOutOfBounds { node: usize, child: i64 },
    #[error("node {node} is the child of more than one node")]
    SharedChild { node: usize },
    #[error("node {node} is not reachable from the root")]
    OrphanNode { node: usize },
    #[error("node {node} splits on feature {feature} but the tree has {n_features} features")]
    FeatureOutOfRange {
        node: usize,
        feature: i64,
        n_features: usize,
    },
    #[error("max_depth is {declared} but the node records give {computed}")]
    DepthMismatch { declared: i64, computed: i64 },
    #[error("model state disagrees with its tree on {field}")]
    ModelStateMismatch { field: &'static str },
    #[error("model has {n_labels} class labels but the tree has {n_classes} classes")]
    ClassLabelMismatch { n_labels: usize, n_classes: usize },
    #[error("input has {found} feature columns, tree expects {expected}")]
    FeatureCountMismatch { expected: usize, found: usize },
    #[error("tree has no nodes")]
    EmptyTree,
    #[error("{0} models do not provide class probabilities")]
    NotAClassifier(ModelKind),
}

/// Everything a model value is populated from.
#[derive(Debug)]
pub struct ModelSpec<'a> {
    pub kind: ModelKind,
    pub max_depth: i64,
    pub classes: &'a [f64],
    pub state: &'a TreeState,
    pub tree: ArrayTree,
}

/// Construction contract of an array-based tree runtime.
///
/// Both calls validate the bundle and never hand back a partially
/// initialised value.
pub trait TreeRuntime {
    fn version(&self) -> &str;
    fn build_tree(&self, shape: &TreeShape, state: &TreeState) -> Result<ArrayTree, RuntimeError>;
    fn build_model(&self, spec: ModelSpec<'_>) -> Result<DecisionTreeModel, RuntimeError>;
}

/// The crate's own array-tree runtime.
#[derive(Debug, Clone)]
pub struct NativeRuntime {
    version: String,
}

impl NativeRuntime {
    pub fn new() -> Self {
        Self::with_version(NATIVE_FORMAT_VERSION)
    }

    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }
}

impl Default for NativeRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeRuntime for NativeRuntime {
    fn version(&self) -> &str {
        &self.version
    }

    fn build_tree(&self, shape: &TreeShape, state: &TreeState) -> Result<ArrayTree, RuntimeError> {
        let tree = ArrayTree::allocate(shape.clone()).populate(state, &self.version)?;
        debug!(
            "accepted tree state: {} nodes, depth {}",
            tree.node_count(),
            tree.max_depth()
        );
        Ok(tree)
    }

    fn build_model(&self, spec: ModelSpec<'_>) -> Result<DecisionTreeModel, RuntimeError> {
        DecisionTreeModel::allocate(spec.kind, spec.max_depth).populate(
            spec.state,
            spec.tree,
            spec.classes,
            &self.version,
        )
    }
}
