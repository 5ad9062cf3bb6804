use thicket_dom::{DomTree, NodeRef};

use crate::pattern::Query;

/// Run `pattern` against `node`.
///
/// The receiver itself is a candidate for searching forms (`//name`, `@attr`,
/// `.class`, `#id`), so querying an element for its own name finds it.
#[must_use]
pub fn query<'a>(node: NodeRef<'a>, pattern: &str) -> Vec<NodeRef<'a>> {
    Query::parse(pattern).evaluate(node)
}

/// The first match, if any.
#[must_use]
pub fn first<'a>(node: NodeRef<'a>, pattern: &str) -> Option<NodeRef<'a>> {
    query(node, pattern).into_iter().next()
}

/// The concatenated text of the first match.
#[must_use]
pub fn text_of_first(node: NodeRef<'_>, pattern: &str) -> Option<String> {
    first(node, pattern).map(NodeRef::text)
}

/// The value of `attr` on the first match. `None` if nothing matches or the
/// first match lacks the attribute.
#[must_use]
pub fn attribute_of_first<'a>(node: NodeRef<'a>, pattern: &str, attr: &str) -> Option<&'a str> {
    first(node, pattern).and_then(|found| found.attr(attr))
}

/// True if the pattern matches anything.
#[must_use]
pub fn exists(node: NodeRef<'_>, pattern: &str) -> bool {
    !query(node, pattern).is_empty()
}

/// Number of matches.
#[must_use]
pub fn count(node: NodeRef<'_>, pattern: &str) -> usize {
    query(node, pattern).len()
}

/// Query methods on anything that can stand for a subtree.
///
/// Implemented for [`NodeRef`] and for `&DomTree` (which queries from the
/// root), so `tree.text_of_first("//title")` reads naturally.
pub trait Queryable<'a>: Sized {
    /// The node queries start from.
    fn query_root(self) -> NodeRef<'a>;

    /// See [`query`](fn@crate::query).
    #[must_use]
    fn query(self, pattern: &str) -> Vec<NodeRef<'a>> {
        query(self.query_root(), pattern)
    }

    /// See [`first`](fn@crate::first).
    #[must_use]
    fn first(self, pattern: &str) -> Option<NodeRef<'a>> {
        first(self.query_root(), pattern)
    }

    /// See [`text_of_first`](fn@crate::text_of_first).
    #[must_use]
    fn text_of_first(self, pattern: &str) -> Option<String> {
        text_of_first(self.query_root(), pattern)
    }

    /// See [`attribute_of_first`](fn@crate::attribute_of_first).
    #[must_use]
    fn attribute_of_first(self, pattern: &str, attr: &str) -> Option<&'a str> {
        attribute_of_first(self.query_root(), pattern, attr)
    }

    /// See [`exists`](fn@crate::exists).
    #[must_use]
    fn exists(self, pattern: &str) -> bool {
        exists(self.query_root(), pattern)
    }

    /// See [`count`](fn@crate::count).
    #[must_use]
    fn count(self, pattern: &str) -> usize {
        count(self.query_root(), pattern)
    }
}

impl<'a> Queryable<'a> for NodeRef<'a> {
    fn query_root(self) -> NodeRef<'a> {
        self
    }
}

impl<'a> Queryable<'a> for &'a DomTree {
    fn query_root(self) -> NodeRef<'a> {
        self.root_ref()
    }
}
