use crate::core::ClassIndex;
use crate::error::ExportError;
use ndarray::ArrayView1;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_warn_on_empty_nodes() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ExportOptions {
    #[serde(default)]
    #[schemars(
        title = "Format Version",
        description = "Version tag written into the tree state. (None = runtime's installed version)"
    )]
    pub format_version: Option<String>,

    #[serde(default)]
    #[schemars(
        title = "Classes",
        description = "Explicit class labels. (None = distinct labels of the training vector)"
    )]
    pub classes: Option<Vec<f64>>,

    #[serde(default = "default_warn_on_empty_nodes")]
    #[schemars(
        title = "Warn On Empty Nodes",
        description = "Log a warning for nodes no training row reaches",
        default = "default_warn_on_empty_nodes"
    )]
    pub warn_on_empty_nodes: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format_version: None,
            classes: None,
            warn_on_empty_nodes: default_warn_on_empty_nodes(),
        }
    }
}

impl ExportOptions {
    pub fn with_classes(mut self, classes: Vec<f64>) -> Self {
        self.classes = Some(classes);
        self
    }

    pub fn with_format_version(mut self, version: impl Into<String>) -> Self {
        self.format_version = Some(version.into());
        self
    }

    /// Class index for `labels`, checked against the explicit list if one is set.
    pub fn class_index(&self, labels: ArrayView1<'_, f64>) -> Result<ClassIndex, ExportError> {
        match &self.classes {
            Some(classes) => {
                let index = ClassIndex::with_classes(classes.clone())?;
                index.check_labels(labels)?;
                Ok(index)
            }
            None => ClassIndex::from_labels(labels),
        }
    }
}
