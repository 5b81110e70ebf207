use crate::export::{
    ArrayTree, DecisionTreeModel, ModelSpec, NativeRuntime, RuntimeError, TreeRuntime, TreeShape,
    TreeState,
};
use std::sync::{
    Mutex,
    atomic::{AtomicU64, Ordering},
};

/// [`NativeRuntime`] that counts construction calls and keeps the last bundle.
#[derive(Default)]
pub struct RecordingRuntime {
    inner: NativeRuntime,
    tree_builds: AtomicU64,
    model_builds: AtomicU64,
    last_state: Mutex<Option<TreeState>>,
}

impl RecordingRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree_builds(&self) -> u64 {
        self.tree_builds.load(Ordering::Relaxed)
    }

    pub fn model_builds(&self) -> u64 {
        self.model_builds.load(Ordering::Relaxed)
    }

    pub fn last_state(&self) -> Option<TreeState> {
        self.last_state.lock().ok().and_then(|s| s.clone())
    }
}

impl TreeRuntime for RecordingRuntime {
    fn version(&self) -> &str {
        self.inner.version()
    }

    fn build_tree(&self, shape: &TreeShape, state: &TreeState) -> Result<ArrayTree, RuntimeError> {
        self.tree_builds.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_state.lock() {
            *last = Some(state.clone());
        }
        self.inner.build_tree(shape, state)
    }

    fn build_model(&self, spec: ModelSpec<'_>) -> Result<DecisionTreeModel, RuntimeError> {
        self.model_builds.fetch_add(1, Ordering::Relaxed);
        self.inner.build_model(spec)
    }
}
