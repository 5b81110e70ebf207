use crate::trees::split_test::{Side, ThresholdSplit};

/// Position of a node inside a [`SourceTree`] arena.
pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Leaf,
    Split {
        split: ThresholdSplit,
        left: Option<NodeId>,
        right: Option<NodeId>,
    },
}

/// What a node's child slots hold, as seen by a traversal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Children {
    None,
    Both {
        split: ThresholdSplit,
        left: NodeId,
        right: NodeId,
    },
    Only(Side),
}

/// A node as produced by the tree-fitting algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceNode {
    node_num: usize,
    impurity: f64,
    kind: NodeKind,
}

impl SourceNode {
    pub fn leaf(node_num: usize, impurity: f64) -> Self {
        Self {
            node_num,
            impurity,
            kind: NodeKind::Leaf,
        }
    }

    pub fn split(
        node_num: usize,
        impurity: f64,
        split: ThresholdSplit,
        left: Option<NodeId>,
        right: Option<NodeId>,
    ) -> Self {
        Self {
            node_num,
            impurity,
            kind: NodeKind::Split { split, left, right },
        }
    }

    /// Number assigned by the producing algorithm. Not used for ordering.
    pub fn node_num(&self) -> usize {
        self.node_num
    }

    pub fn impurity(&self) -> f64 {
        self.impurity
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.children(), Children::None)
    }

    pub fn children(&self) -> Children {
        match self.kind {
            NodeKind::Leaf => Children::None,
            NodeKind::Split {
                split,
                left: Some(left),
                right: Some(right),
            } => Children::Both { split, left, right },
            NodeKind::Split {
                left: Some(_),
                right: None,
                ..
            } => Children::Only(Side::Left),
            NodeKind::Split {
                left: None,
                right: Some(_),
                ..
            } => Children::Only(Side::Right),
            NodeKind::Split {
                left: None,
                right: None,
                ..
            } => Children::None,
        }
    }
}

/// Arena of source nodes with an optional root.
///
/// Children are referenced by [`NodeId`]; a well-formed tree uses every id at
/// most once as a child and never refers to the root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceTree {
    nodes: Vec<SourceNode>,
    root: Option<NodeId>,
}

impl SourceTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: SourceNode) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(node);
        id
    }

    pub fn push_leaf(&mut self, node_num: usize, impurity: f64) -> NodeId {
        self.push(SourceNode::leaf(node_num, impurity))
    }

    pub fn push_split(
        &mut self,
        node_num: usize,
        impurity: f64,
        split: ThresholdSplit,
        left: NodeId,
        right: NodeId,
    ) -> NodeId {
        self.push(SourceNode::split(
            node_num,
            impurity,
            split,
            Some(left),
            Some(right),
        ))
    }

    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    pub fn with_root(mut self, id: NodeId) -> Self {
        self.set_root(id);
        self
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&SourceNode> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_has_no_children() {
        let node = SourceNode::leaf(3, 0.5);
        assert!(node.is_leaf());
        assert_eq!(node.children(), Children::None);
        assert_eq!(node.node_num(), 3);
        assert_eq!(node.impurity(), 0.5);
    }

    #[test]
    fn test_split_with_both_children() {
        let split = ThresholdSplit::new(2, 1.5);
        let node = SourceNode::split(0, 0.3, split, Some(1), Some(2));

        assert!(!node.is_leaf());
        assert_eq!(
            node.children(),
            Children::Both {
                split,
                left: 1,
                right: 2
            }
        );
    }

    #[test]
    fn test_split_without_children_counts_as_leaf() {
        let node = SourceNode::split(0, 0.0, ThresholdSplit::new(0, 0.0), None, None);
        assert!(node.is_leaf());
    }

    #[test]
    fn test_split_with_one_child_reports_present_side() {
        let split = ThresholdSplit::new(0, 0.0);
        let left_only = SourceNode::split(0, 0.0, split, Some(1), None);
        let right_only = SourceNode::split(0, 0.0, split, None, Some(1));

        assert_eq!(left_only.children(), Children::Only(Side::Left));
        assert_eq!(right_only.children(), Children::Only(Side::Right));
        assert!(!left_only.is_leaf());
    }

    #[test]
    fn test_arena_assigns_sequential_ids() {
        let mut tree = SourceTree::new();
        let l = tree.push_leaf(1, 0.0);
        let r = tree.push_leaf(2, 0.0);
        let root = tree.push_split(0, 0.5, ThresholdSplit::new(0, 0.5), l, r);
        tree.set_root(root);

        assert_eq!((l, r, root), (0, 1, 2));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.root(), Some(2));
        assert_eq!(tree.node(root).map(SourceNode::node_num), Some(0));
        assert!(tree.node(7).is_none());
    }

    #[test]
    fn test_new_tree_is_empty_without_root() {
        let tree = SourceTree::new();
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
    }
}
