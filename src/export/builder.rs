use crate::core::ClassIndex;
use crate::error::ExportError;
use crate::export::array_tree::ArrayTree;
use crate::export::model::DecisionTreeModel;
use crate::export::runtime::{ModelSpec, RuntimeError, TreeRuntime};
use crate::export::state::{TreeShape, TreeState};
use crate::flatten::Flattened;
use crate::trees::ModelKind;
use ndarray::Array3;

/// Assembles flattened trees into runtime values.
pub struct ArrayTreeBuilder<'r, R: TreeRuntime + ?Sized> {
    runtime: &'r R,
    format_version: Option<String>,
}

impl<'r, R: TreeRuntime + ?Sized> ArrayTreeBuilder<'r, R> {
    pub fn new(runtime: &'r R) -> Self {
        Self {
            runtime,
            format_version: None,
        }
    }

    /// Overrides the version tag written into the state bundle.
    pub fn with_format_version(mut self, version: impl Into<String>) -> Self {
        self.format_version = Some(version.into());
        self
    }

    pub fn format_version(&self) -> &str {
        self.format_version
            .as_deref()
            .unwrap_or_else(|| self.runtime.version())
    }

    /// Packs records and histograms into the bundle layout.
    pub fn assemble(
        &self,
        flattened: Flattened,
        n_classes: usize,
        n_outputs: usize,
    ) -> Result<TreeState, ExportError> {
        if n_outputs != 1 {
            return Err(ExportError::UnsupportedOutputs { n_outputs });
        }

        let node_count = flattened.records.len();
        let mut flat = Vec::with_capacity(node_count * n_outputs * n_classes);
        for (node, histogram) in flattened.values.iter().enumerate() {
            if histogram.len() != n_classes {
                return Err(ExportError::HistogramLength {
                    node,
                    expected: n_classes,
                    found: histogram.len(),
                });
            }
            flat.extend_from_slice(histogram);
        }
        let values = Array3::from_shape_vec((node_count, n_outputs, n_classes), flat)?;

        Ok(TreeState {
            max_depth: flattened.max_depth,
            node_count,
            nodes: flattened.records,
            values,
            format_version: self.format_version().to_string(),
        })
    }

    pub fn build_tree(&self, shape: &TreeShape, state: &TreeState) -> Result<ArrayTree, ExportError> {
        self.runtime
            .build_tree(shape, state)
            .map_err(|source| rejected("ArrayTree", state, source))
    }

    /// Builds the tree for `flattened` and wraps it in a model of `kind`.
    pub fn build(
        &self,
        kind: ModelKind,
        flattened: Flattened,
        n_features: usize,
        classes: &ClassIndex,
        n_outputs: usize,
    ) -> Result<DecisionTreeModel, ExportError> {
        let n_classes = classes.n_classes();
        let state = self.assemble(flattened, n_classes, n_outputs)?;
        let shape = TreeShape {
            n_features,
            n_classes: vec![n_classes; n_outputs],
            n_outputs,
        };
        let tree = self.build_tree(&shape, &state)?;

        let target = match kind {
            ModelKind::Classification => "DecisionTreeClassifier",
            ModelKind::Regression => "DecisionTreeRegressor",
        };
        self.runtime
            .build_model(ModelSpec {
                kind,
                max_depth: state.max_depth,
                classes: classes.classes(),
                state: &state,
                tree,
            })
            .map_err(|source| rejected(target, &state, source))
    }
}

fn rejected(target: &'static str, state: &TreeState, source: RuntimeError) -> ExportError {
    ExportError::SchemaRejected {
        target,
        node_count: state.node_count,
        values_shape: state.values_shape(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::runtime::NativeRuntime;
    use crate::flatten::NodeRecord;
    use crate::testing::RejectingRuntime;

    fn stump() -> Flattened {
        let mut root = NodeRecord::split(0, 0.5, 0.5, 4);
        root.left_child = 1;
        root.right_child = 2;
        Flattened {
            records: vec![root, NodeRecord::leaf(0.0, 2), NodeRecord::leaf(0.0, 2)],
            values: vec![vec![2.0, 2.0], vec![2.0, 0.0], vec![0.0, 2.0]],
            max_depth: 1,
        }
    }

    fn classes() -> ClassIndex {
        ClassIndex::with_classes(vec![0.0, 1.0]).unwrap()
    }

    #[test]
    fn test_assemble_reshapes_histograms() {
        let runtime = NativeRuntime::new();
        let state = ArrayTreeBuilder::new(&runtime)
            .assemble(stump(), 2, 1)
            .unwrap();

        assert_eq!(state.values_shape(), vec![3, 1, 2]);
        assert_eq!(state.values[[2, 0, 1]], 2.0);
        assert_eq!(state.node_count, 3);
        assert_eq!(state.max_depth, 1);
        assert_eq!(state.format_version, runtime.version());
    }

    #[test]
    fn test_assemble_rejects_multi_output() {
        let runtime = NativeRuntime::new();
        let err = ArrayTreeBuilder::new(&runtime)
            .assemble(stump(), 2, 2)
            .unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedOutputs { n_outputs: 2 }));
    }

    #[test]
    fn test_assemble_rejects_ragged_histograms() {
        let runtime = NativeRuntime::new();
        let mut flat = stump();
        flat.values[1].push(1.0);

        let err = ArrayTreeBuilder::new(&runtime)
            .assemble(flat, 2, 1)
            .unwrap_err();
        assert!(matches!(
            err,
            ExportError::HistogramLength {
                node: 1,
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn test_build_selects_variant_from_kind() {
        let runtime = NativeRuntime::new();
        let builder = ArrayTreeBuilder::new(&runtime);

        let clf = builder
            .build(ModelKind::Classification, stump(), 1, &classes(), 1)
            .unwrap();
        let reg = builder
            .build(ModelKind::Regression, stump(), 1, &classes(), 1)
            .unwrap();

        assert_eq!(clf.kind(), ModelKind::Classification);
        assert_eq!(reg.kind(), ModelKind::Regression);
        assert_eq!(clf.tree(), reg.tree());
    }

    #[test]
    fn test_stale_version_override_is_rejected_with_context() {
        let runtime = NativeRuntime::with_version("1.0.0");
        let err = ArrayTreeBuilder::new(&runtime)
            .with_format_version("0.17")
            .build(ModelKind::Classification, stump(), 1, &classes(), 1)
            .unwrap_err();

        match err {
            ExportError::SchemaRejected {
                target,
                node_count,
                values_shape,
                source,
            } => {
                assert_eq!(target, "ArrayTree");
                assert_eq!(node_count, 3);
                assert_eq!(values_shape, vec![3, 1, 2]);
                assert!(matches!(source, RuntimeError::VersionMismatch { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_model_rejection_names_model_type() {
        let runtime = RejectingRuntime::at_model_stage();
        let err = ArrayTreeBuilder::new(&runtime)
            .build(ModelKind::Regression, stump(), 1, &classes(), 1)
            .unwrap_err();

        assert!(matches!(
            err,
            ExportError::SchemaRejected {
                target: "DecisionTreeRegressor",
                ..
            }
        ));
        assert!(err.to_string().contains("DecisionTreeRegressor"));
    }

    #[test]
    fn test_format_version_defaults_to_runtime() {
        let runtime = NativeRuntime::with_version("9.9");
        let builder = ArrayTreeBuilder::new(&runtime);
        assert_eq!(builder.format_version(), "9.9");
        assert_eq!(builder.with_format_version("1.2").format_version(), "1.2");
    }
}
