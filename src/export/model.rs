use crate::export::array_tree::ArrayTree;
use crate::export::runtime::RuntimeError;
use crate::export::state::TreeState;
use crate::trees::ModelKind;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// A model value awaiting its state bundle.
#[derive(Debug, Clone, Copy)]
pub struct ModelAllocation {
    kind: ModelKind,
    max_depth: i64,
}

impl ModelAllocation {
    pub fn populate(
        self,
        state: &TreeState,
        tree: ArrayTree,
        classes: &[f64],
        version: &str,
    ) -> Result<DecisionTreeModel, RuntimeError> {
        if state.format_version != version {
            return Err(RuntimeError::VersionMismatch {
                expected: version.to_string(),
                found: state.format_version.clone(),
            });
        }
        if tree.node_count() != state.node_count {
            return Err(RuntimeError::ModelStateMismatch {
                field: "node_count",
            });
        }
        if tree.max_depth() != state.max_depth {
            return Err(RuntimeError::ModelStateMismatch { field: "max_depth" });
        }
        if tree.value() != &state.values {
            return Err(RuntimeError::ModelStateMismatch { field: "values" });
        }

        let n_classes = tree.n_classes().first().copied().unwrap_or(0);
        if classes.len() != n_classes {
            return Err(RuntimeError::ClassLabelMismatch {
                n_labels: classes.len(),
                n_classes,
            });
        }

        Ok(DecisionTreeModel {
            kind: self.kind,
            max_depth: self.max_depth,
            classes: classes.to_vec(),
            format_version: state.format_version.clone(),
            tree,
        })
    }
}

/// Predictive model around a single [`ArrayTree`].
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTreeModel {
    kind: ModelKind,
    max_depth: i64,
    classes: Vec<f64>,
    format_version: String,
    tree: ArrayTree,
}

impl DecisionTreeModel {
    pub fn allocate(kind: ModelKind, max_depth: i64) -> ModelAllocation {
        ModelAllocation { kind, max_depth }
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn is_classifier(&self) -> bool {
        self.kind == ModelKind::Classification
    }

    /// Depth limit the model was constructed with.
    pub fn max_depth(&self) -> i64 {
        self.max_depth
    }

    /// Label of each histogram slot. For regressors these are target values.
    pub fn classes(&self) -> &[f64] {
        &self.classes
    }

    pub fn n_features_in(&self) -> usize {
        self.tree.n_features()
    }

    pub fn format_version(&self) -> &str {
        &self.format_version
    }

    pub fn tree(&self) -> &ArrayTree {
        &self.tree
    }

    /// Class fractions of the leaf each row lands in.
    pub fn predict_proba(&self, features: ArrayView2<'_, f64>) -> Result<Array2<f64>, RuntimeError> {
        if !self.is_classifier() {
            return Err(RuntimeError::NotAClassifier(self.kind));
        }
        let leaves = self.tree.apply(features)?;
        let mut proba = Array2::zeros((leaves.len(), self.classes.len()));
        for (mut out, &leaf) in proba.axis_iter_mut(Axis(0)).zip(&leaves) {
            let counts = self.leaf_counts(leaf);
            let total = counts.sum();
            if total > 0.0 {
                out.assign(&(&counts / total));
            }
        }
        Ok(proba)
    }

    /// Majority class for classifiers, count-weighted mean target for
    /// regressors. Empty regression leaves predict NaN.
    pub fn predict(&self, features: ArrayView2<'_, f64>) -> Result<Array1<f64>, RuntimeError> {
        let leaves = self.tree.apply(features)?;
        let predictions = leaves
            .iter()
            .map(|&leaf| {
                let counts = self.leaf_counts(leaf);
                match self.kind {
                    ModelKind::Classification => self.majority(counts),
                    ModelKind::Regression => self.weighted_mean(counts),
                }
            })
            .collect();
        Ok(predictions)
    }

    fn leaf_counts(&self, leaf: usize) -> ArrayView1<'_, f64> {
        self.tree.value().index_axis(Axis(0), leaf).index_axis_move(Axis(0), 0)
    }

    // Ties go to the lowest slot.
    fn majority(&self, counts: ArrayView1<'_, f64>) -> f64 {
        let mut best = 0;
        for (slot, &c) in counts.iter().enumerate() {
            if c > counts[best] {
                best = slot;
            }
        }
        self.classes.get(best).copied().unwrap_or(f64::NAN)
    }

    fn weighted_mean(&self, counts: ArrayView1<'_, f64>) -> f64 {
        let total = counts.sum();
        if total == 0.0 {
            return f64::NAN;
        }
        counts
            .iter()
            .zip(&self.classes)
            .map(|(c, v)| c * v)
            .sum::<f64>()
            / total
    }
}
