use crate::export::array_tree::ArrayTree;
use std::fmt::Write;

/// Renders `tree` as indented split rules, one line per edge.
///
/// ```text
/// |--- feature_0 <= 0.50
/// |   |--- value: [2, 0]
/// |--- feature_0 >  0.50
/// |   |--- value: [0, 2]
/// ```
pub fn export_text(tree: &ArrayTree, feature_names: Option<&[String]>) -> String {
    let mut out = String::new();
    if tree.node_count() > 0 {
        render(tree, feature_names, 0, 0, &mut out);
    }
    out
}

fn render(tree: &ArrayTree, names: Option<&[String]>, node: usize, depth: usize, out: &mut String) {
    let indent = "|   ".repeat(depth);
    if tree.is_leaf(node) {
        let counts: Vec<String> = tree
            .value()
            .slice(ndarray::s![node, 0, ..])
            .iter()
            .map(|c| format!("{c}"))
            .collect();
        let _ = writeln!(out, "{indent}|--- value: [{}]", counts.join(", "));
        return;
    }

    let feature = tree.feature()[node] as usize;
    let name = names
        .and_then(|n| n.get(feature).cloned())
        .unwrap_or_else(|| format!("feature_{feature}"));
    let threshold = tree.threshold()[node];

    let _ = writeln!(out, "{indent}|--- {name} <= {threshold:.2}");
    render(tree, names, tree.children_left()[node] as usize, depth + 1, out);
    let _ = writeln!(out, "{indent}|--- {name} >  {threshold:.2}");
    render(tree, names, tree.children_right()[node] as usize, depth + 1, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::state::{TreeShape, TreeState};
    use crate::flatten::NodeRecord;
    use ndarray::Array3;

    fn stump() -> ArrayTree {
        let mut root = NodeRecord::split(0, 0.5, 0.5, 4);
        root.left_child = 1;
        root.right_child = 2;
        let state = TreeState {
            max_depth: 1,
            node_count: 3,
            nodes: vec![root, NodeRecord::leaf(0.0, 2), NodeRecord::leaf(0.0, 2)],
            values: Array3::from_shape_vec((3, 1, 2), vec![2.0, 2.0, 2.0, 0.0, 0.0, 2.0])
                .unwrap(),
            format_version: "t".to_string(),
        };
        ArrayTree::allocate(TreeShape::single_output(1, 2))
            .populate(&state, "t")
            .unwrap()
    }

    #[test]
    fn test_export_text_stump() {
        let text = export_text(&stump(), None);
        let expected = "\
|--- feature_0 <= 0.50
|   |--- value: [2, 0]
|--- feature_0 >  0.50
|   |--- value: [0, 2]
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_export_text_uses_feature_names() {
        let names = vec!["petal_width".to_string()];
        let text = export_text(&stump(), Some(names.as_slice()));
        assert!(text.starts_with("|--- petal_width <= 0.50\n"));
    }

    #[test]
    fn test_export_text_empty_tree() {
        let state = TreeState {
            max_depth: -1,
            node_count: 0,
            nodes: vec![],
            values: Array3::zeros((0, 1, 2)),
            format_version: "t".to_string(),
        };
        let tree = ArrayTree::allocate(TreeShape::single_output(1, 2))
            .populate(&state, "t")
            .unwrap();
        assert_eq!(export_text(&tree, None), "");
    }
}
