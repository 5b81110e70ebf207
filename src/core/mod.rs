mod class_index;
mod dataset;

pub use class_index::ClassIndex;
pub use dataset::Dataset;
