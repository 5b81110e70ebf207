use crate::core::{ClassIndex, Dataset};
use crate::error::{ExportError, ViolationKind};
use crate::flatten::record::NodeRecord;
use crate::trees::{Children, NodeId, Side, SourceNode, SourceTree, ThresholdSplit};
use log::{debug, warn};

/// Flat pre-order form of a source tree.
///
/// `records[i]` and `values[i]` describe the same node; child indices in the
/// records point into these same sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct Flattened {
    pub records: Vec<NodeRecord>,
    pub values: Vec<Vec<f64>>,
    /// Edges on the longest root-to-leaf path, `-1` for an empty tree.
    pub max_depth: i64,
}

impl Flattened {
    pub fn node_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Walks a [`SourceTree`] depth-first, re-deriving per-node statistics by
/// routing the dataset rows down the stored splits.
pub struct Flattener<'t, 'd> {
    tree: &'t SourceTree,
    dataset: Dataset<'d>,
    classes: &'t ClassIndex,
    warn_on_empty_nodes: bool,
    visited: Vec<bool>,
    records: Vec<NodeRecord>,
    values: Vec<Vec<f64>>,
    max_depth: i64,
}

impl<'t, 'd> Flattener<'t, 'd> {
    pub fn new(tree: &'t SourceTree, dataset: Dataset<'d>, classes: &'t ClassIndex) -> Self {
        Self {
            tree,
            dataset,
            classes,
            warn_on_empty_nodes: true,
            visited: vec![false; tree.len()],
            records: Vec::with_capacity(tree.len()),
            values: Vec::with_capacity(tree.len()),
            max_depth: -1,
        }
    }

    pub fn warn_on_empty_nodes(mut self, enabled: bool) -> Self {
        self.warn_on_empty_nodes = enabled;
        self
    }

    pub fn run(mut self) -> Result<Flattened, ExportError> {
        let tree = self.tree;
        if let Some(root) = tree.root() {
            let node = tree.node(root).ok_or_else(|| {
                ExportError::violation(root, ViolationKind::DanglingChild { child: root })
            })?;
            let rows = self.dataset.all_rows();
            self.visit(root, node, rows, 0)?;
        }

        debug!(
            "flattened tree: {} nodes, depth {}, {} classes",
            self.records.len(),
            self.max_depth,
            self.classes.n_classes()
        );

        Ok(Flattened {
            records: self.records,
            values: self.values,
            max_depth: self.max_depth,
        })
    }

    /// Emits `node` at the next free position and returns that position.
    fn visit(
        &mut self,
        id: NodeId,
        node: &'t SourceNode,
        rows: Vec<usize>,
        depth: i64,
    ) -> Result<usize, ExportError> {
        if std::mem::replace(&mut self.visited[id], true) {
            return Err(ExportError::violation(
                node.node_num(),
                ViolationKind::SharedNode,
            ));
        }

        let histogram = self.classes.histogram(self.dataset.labels(), &rows)?;
        let n_node_samples = histogram.iter().sum::<f64>() as i64;
        if n_node_samples == 0 && self.warn_on_empty_nodes {
            warn!(
                "node {} (position {}) is reached by no training rows",
                node.node_num(),
                self.records.len()
            );
        }

        let position = self.records.len();
        self.max_depth = self.max_depth.max(depth);

        match node.children() {
            Children::None => {
                self.records.push(NodeRecord::leaf(node.impurity(), n_node_samples));
                self.values.push(histogram);
            }
            Children::Only(side) => {
                return Err(ExportError::violation(
                    node.node_num(),
                    ViolationKind::MissingChild(side.opposite()),
                ));
            }
            Children::Both { split, left, right } => {
                self.check_feature(node, &split)?;
                self.records.push(NodeRecord::split(
                    split.feature(),
                    split.threshold(),
                    node.impurity(),
                    n_node_samples,
                ));
                self.values.push(histogram);

                let left_node = self.child(node, left)?;
                let right_node = self.child(node, right)?;
                let (left_rows, right_rows) = self.partition(&split, rows);

                let left_pos = self.visit(left, left_node, left_rows, depth + 1)?;
                let right_pos = self.visit(right, right_node, right_rows, depth + 1)?;

                let record = &mut self.records[position];
                record.left_child = left_pos as i64;
                record.right_child = right_pos as i64;
            }
        }

        Ok(position)
    }

    fn child(&self, parent: &SourceNode, id: NodeId) -> Result<&'t SourceNode, ExportError> {
        let tree = self.tree;
        tree.node(id).ok_or_else(|| {
            ExportError::violation(
                parent.node_num(),
                ViolationKind::DanglingChild { child: id },
            )
        })
    }

    fn check_feature(&self, node: &SourceNode, split: &ThresholdSplit) -> Result<(), ExportError> {
        let n_features = self.dataset.n_features();
        if split.feature() >= n_features {
            return Err(ExportError::violation(
                node.node_num(),
                ViolationKind::FeatureOutOfRange {
                    feature: split.feature(),
                    n_features,
                },
            ));
        }
        Ok(())
    }

    fn partition(&self, split: &ThresholdSplit, rows: Vec<usize>) -> (Vec<usize>, Vec<usize>) {
        let feature = split.feature();
        rows.into_iter().partition(|&row| {
            split.branch_for_value(self.dataset.value(row, feature)) == Side::Left
        })
    }
}

/// Flattens `tree` over `dataset` with histograms laid out by `classes`.
pub fn flatten(
    tree: &SourceTree,
    dataset: Dataset<'_>,
    classes: &ClassIndex,
) -> Result<Flattened, ExportError> {
    Flattener::new(tree, dataset, classes).run()
}
