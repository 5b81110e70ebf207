use crate::export::{
    ArrayTree, DecisionTreeModel, ModelSpec, NativeRuntime, RuntimeError, TreeRuntime, TreeShape,
    TreeState,
};

/// Runtime that accepts trees but refuses every model bundle.
pub struct RejectingRuntime {
    inner: NativeRuntime,
}

impl RejectingRuntime {
    pub fn at_model_stage() -> Self {
        Self {
            inner: NativeRuntime::new(),
        }
    }
}

impl TreeRuntime for RejectingRuntime {
    fn version(&self) -> &str {
        self.inner.version()
    }

    fn build_tree(&self, shape: &TreeShape, state: &TreeState) -> Result<ArrayTree, RuntimeError> {
        self.inner.build_tree(shape, state)
    }

    fn build_model(&self, _spec: ModelSpec<'_>) -> Result<DecisionTreeModel, RuntimeError> {
        Err(RuntimeError::ModelStateMismatch { field: "values" })
    }
}
