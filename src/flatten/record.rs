use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, IntoStaticStr};

/// Child index stored for leaves.
pub const TREE_LEAF: i64 = -1;
/// Feature index stored for leaves.
pub const TREE_UNDEFINED: i64 = -2;
/// Threshold stored for leaves.
pub const THRESHOLD_UNDEFINED: f64 = -2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
pub enum Dtype {
    #[strum(serialize = "i8")]
    Int64,
    #[strum(serialize = "f8")]
    Float64,
}

/// One node of the flat tree, in the record layout array-tree runtimes load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NodeRecord {
    pub left_child: i64,
    pub right_child: i64,
    pub feature: i64,
    pub threshold: f64,
    pub impurity: f64,
    pub n_node_samples: i64,
    pub weighted_n_node_samples: f64,
}

impl NodeRecord {
    /// Field names and dtypes in layout order.
    pub const FIELDS: [(&'static str, Dtype); 7] = [
        ("left_child", Dtype::Int64),
        ("right_child", Dtype::Int64),
        ("feature", Dtype::Int64),
        ("threshold", Dtype::Float64),
        ("impurity", Dtype::Float64),
        ("n_node_samples", Dtype::Int64),
        ("weighted_n_node_samples", Dtype::Float64),
    ];

    pub fn leaf(impurity: f64, n_node_samples: i64) -> Self {
        Self {
            left_child: TREE_LEAF,
            right_child: TREE_LEAF,
            feature: TREE_UNDEFINED,
            threshold: THRESHOLD_UNDEFINED,
            impurity,
            n_node_samples,
            // weighted count equals the raw count until sample weights exist
            weighted_n_node_samples: n_node_samples as f64,
        }
    }

    /// Split record whose children are filled in once they have positions.
    pub fn split(feature: usize, threshold: f64, impurity: f64, n_node_samples: i64) -> Self {
        Self {
            feature: feature as i64,
            threshold,
            ..Self::leaf(impurity, n_node_samples)
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left_child == TREE_LEAF
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::schema_for;
    use serde_json::Value;

    #[test]
    fn test_leaf_uses_sentinels() {
        let rec = NodeRecord::leaf(0.48, 5);

        assert_eq!(rec.left_child, -1);
        assert_eq!(rec.right_child, -1);
        assert_eq!(rec.feature, -2);
        assert_eq!(rec.threshold, -2.0);
        assert_eq!(rec.n_node_samples, 5);
        assert_eq!(rec.weighted_n_node_samples, 5.0);
        assert!(rec.is_leaf());
    }

    #[test]
    fn test_split_keeps_partition_parameters() {
        let rec = NodeRecord::split(3, 0.75, 0.5, 10);

        assert_eq!(rec.feature, 3);
        assert_eq!(rec.threshold, 0.75);
        assert_eq!(rec.impurity, 0.5);
        assert_eq!(rec.weighted_n_node_samples, 10.0);
    }

    #[test]
    fn test_fields_match_serialized_order() {
        let value = serde_json::to_value(NodeRecord::leaf(0.0, 1)).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        let names: Vec<&str> = NodeRecord::FIELDS.iter().map(|(n, _)| *n).collect();

        assert_eq!(keys, names);
    }

    #[test]
    fn test_dtype_codes() {
        let codes: Vec<String> = NodeRecord::FIELDS
            .iter()
            .map(|(_, d)| d.to_string())
            .collect();
        assert_eq!(codes, ["i8", "i8", "i8", "f8", "f8", "i8", "f8"]);
    }

    #[test]
    fn test_json_schema_lists_every_field() {
        let schema = serde_json::to_value(schema_for!(NodeRecord)).unwrap();
        let props = schema
            .get("properties")
            .and_then(Value::as_object)
            .unwrap();

        for (name, _) in NodeRecord::FIELDS {
            assert!(props.contains_key(name), "missing {name}");
        }
        assert_eq!(props["left_child"]["type"], "integer");
        assert_eq!(props["threshold"]["type"], "number");
    }
}
