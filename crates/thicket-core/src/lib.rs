//! Parse entry point for the Thicket markup toolkit.
//!
//! # Scope
//!
//! This crate provides:
//! - **Parsing** - declaration guard, tokenizer and tree builder run in order
//!   to turn markup text into an owned [`DomTree`]
//! - **Parse cache** - [`ParseCache`], an explicitly constructed memo of
//!   parsed trees keyed by a hash of the source text
//!
//! The member crates are re-exported so callers can depend on this crate
//! alone.

/// Node model.
pub use thicket_dom as dom;
/// Tokenizer and tree builder.
pub use thicket_html as html;
/// Path queries.
pub use thicket_query as query;

mod cache;

pub use cache::{CacheConfig, ParseCache};
pub use thicket_dom::DomTree;
pub use thicket_html::{BuildIssue, MalformedInput};

use thicket_html::{TreeBuilder, tokenize, validate_declaration};

/// Parse markup text into a tree.
///
/// # Errors
///
/// Returns [`MalformedInput`] if the leading XML declaration is invalid or a
/// construct is left unterminated. No tree is built in that case.
pub fn parse(input: &str) -> Result<DomTree, MalformedInput> {
    parse_with_issues(input).map(|(tree, _)| tree)
}

/// Parse markup text, also returning what the tree builder repaired or
/// dropped along the way.
///
/// # Errors
///
/// As for [`parse`].
pub fn parse_with_issues(input: &str) -> Result<(DomTree, Vec<BuildIssue>), MalformedInput> {
    validate_declaration(input)?;
    let tokens = tokenize(input)?;
    Ok(TreeBuilder::new(tokens).run_with_issues())
}
