//! Flattens recursively-linked decision trees into the array-of-records
//! layout of array-based binary tree runtimes.
//!
//! [`convert`] picks a tree out of a trained [`trees::SourceModel`], routes the
//! training rows down its splits to recover per-node class histograms and
//! sample counts ([`flatten`]), then assembles and validates the node record
//! array and value tensor ([`export`]).

pub mod config;
pub mod convert;
pub mod core;
pub mod error;
pub mod export;
pub mod flatten;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod trees;

pub use config::ExportOptions;
pub use convert::{convert, convert_with};
pub use error::{ExportError, ViolationKind};
