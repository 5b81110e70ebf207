use crate::config::ExportOptions;
use crate::core::Dataset;
use crate::error::ExportError;
use crate::export::{ArrayTreeBuilder, DecisionTreeModel, NativeRuntime, TreeRuntime};
use crate::flatten::Flattener;
use crate::trees::SourceModel;
use ndarray::{ArrayView1, ArrayView2};

/// Converts tree `tree_index` of `model` into a [`DecisionTreeModel`],
/// re-deriving node statistics from the training rows.
pub fn convert<'a, M: SourceModel + ?Sized>(
    model: &M,
    tree_index: usize,
    features: ArrayView2<'a, f64>,
    labels: ArrayView1<'a, f64>,
) -> Result<DecisionTreeModel, ExportError> {
    convert_with(
        model,
        tree_index,
        features,
        labels,
        &NativeRuntime::new(),
        &ExportOptions::default(),
    )
}

pub fn convert_with<'a, M, R>(
    model: &M,
    tree_index: usize,
    features: ArrayView2<'a, f64>,
    labels: ArrayView1<'a, f64>,
    runtime: &R,
    options: &ExportOptions,
) -> Result<DecisionTreeModel, ExportError>
where
    M: SourceModel + ?Sized,
    R: TreeRuntime + ?Sized,
{
    let tree = model
        .tree(tree_index)
        .ok_or_else(|| ExportError::TreeIndexOutOfRange {
            index: tree_index,
            n_trees: model.n_trees(),
        })?;

    let dataset = Dataset::new(features, labels)?;
    let classes = options.class_index(labels)?;

    let flattened = Flattener::new(tree, dataset, &classes)
        .warn_on_empty_nodes(options.warn_on_empty_nodes)
        .run()?;

    let mut builder = ArrayTreeBuilder::new(runtime);
    if let Some(version) = &options.format_version {
        builder = builder.with_format_version(version.clone());
    }
    builder.build(model.kind(), flattened, dataset.n_features(), &classes, 1)
}
