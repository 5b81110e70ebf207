mod flattener;
mod record;

pub use flattener::{Flattened, Flattener, flatten};
pub use record::{Dtype, NodeRecord, THRESHOLD_UNDEFINED, TREE_LEAF, TREE_UNDEFINED};
