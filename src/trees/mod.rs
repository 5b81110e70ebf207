mod ensemble;
mod node;

pub use ensemble::{Ensemble, ModelKind, SourceModel};
pub use node::{Children, NodeId, NodeKind, SourceNode, SourceTree};
pub use split_test::{Side, ThresholdSplit};
