//! Tree builder module.

/// Stack-based tree construction.
pub mod tree_builder;

pub use tree_builder::{BuildIssue, IssueKind, TreeBuilder};
