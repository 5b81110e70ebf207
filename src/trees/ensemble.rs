use crate::trees::node::SourceTree;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ModelKind {
    Classification,
    Regression,
}

/// A trained model that owns one or more source trees.
pub trait SourceModel {
    fn kind(&self) -> ModelKind;
    fn n_trees(&self) -> usize;
    fn tree(&self, index: usize) -> Option<&SourceTree>;
}

/// Sum-of-trees model as handed over by the fitting algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct Ensemble {
    kind: ModelKind,
    trees: Vec<SourceTree>,
}

impl Ensemble {
    pub fn new(kind: ModelKind, trees: Vec<SourceTree>) -> Self {
        Self { kind, trees }
    }

    pub fn classifier(trees: Vec<SourceTree>) -> Self {
        Self::new(ModelKind::Classification, trees)
    }

    pub fn regressor(trees: Vec<SourceTree>) -> Self {
        Self::new(ModelKind::Regression, trees)
    }

    pub fn trees(&self) -> &[SourceTree] {
        &self.trees
    }
}

impl SourceModel for Ensemble {
    fn kind(&self) -> ModelKind {
        self.kind
    }

    fn n_trees(&self) -> usize {
        self.trees.len()
    }

    fn tree(&self, index: usize) -> Option<&SourceTree> {
        self.trees.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_tree_lookup_by_index() {
        let ensemble = Ensemble::classifier(vec![SourceTree::new(), SourceTree::new()]);

        assert_eq!(ensemble.n_trees(), 2);
        assert!(ensemble.tree(1).is_some());
        assert!(ensemble.tree(2).is_none());
    }

    #[test]
    fn test_kind_follows_constructor() {
        assert_eq!(Ensemble::regressor(vec![]).kind(), ModelKind::Regression);
        assert_eq!(Ensemble::classifier(vec![]).kind(), ModelKind::Classification);
    }

    #[test]
    fn test_model_kind_strum_roundtrip() {
        assert_eq!(ModelKind::Regression.to_string(), "regression");
        assert_eq!(
            ModelKind::from_str("classification").unwrap(),
            ModelKind::Classification
        );
        assert!(ModelKind::from_str("ranking").is_err());
    }

    #[test]
    fn test_model_kind_serializes_kebab_case() {
        let j = serde_json::to_string(&ModelKind::Classification).unwrap();
        assert_eq!(j, "\"classification\"");
        let back: ModelKind = serde_json::from_str("\"regression\"").unwrap();
        assert_eq!(back, ModelKind::Regression);
    }
}
