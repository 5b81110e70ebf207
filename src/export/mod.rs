mod array_tree;
mod builder;
mod model;
mod runtime;
mod state;
mod text;

pub use array_tree::{ArrayTree, TreeAllocation};
pub use builder::ArrayTreeBuilder;
pub use model::{DecisionTreeModel, ModelAllocation};
pub use runtime::{ModelSpec, NATIVE_FORMAT_VERSION, NativeRuntime, RuntimeError, TreeRuntime};
pub use state::{TreeShape, TreeState};
pub use text::export_text;
