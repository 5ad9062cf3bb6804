//! Query evaluation.

use thicket_dom::{ElementData, NodeRef};

use crate::pattern::{Predicate, Query};

impl Query {
    /// Evaluate against `node`, returning matches in document order.
    ///
    /// Results borrow the tree `node` belongs to; nothing is copied.
    #[must_use]
    pub fn evaluate<'a>(&self, node: NodeRef<'a>) -> Vec<NodeRef<'a>> {
        match self {
            Self::Descendants(name) => search(node, |element| name_matches(element, name)),
            Self::Path(segments) => follow_path(node, segments),
            Self::HasAttribute(attr) => search(node, |element| element.attributes.contains(attr)),
            Self::Class(class) => search(node, |element| element.has_class(class)),
            Self::Id(id) => elements(node)
                .find(|&(_, element)| element.id() == Some(id.as_str()))
                .map(|(found, _)| found)
                .into_iter()
                .collect(),
            Self::Filtered { base, predicate } => predicate.apply(base.evaluate(node)),
        }
    }
}

impl Predicate {
    /// Narrow an ordered result list.
    #[must_use]
    pub fn apply<'a>(&self, nodes: Vec<NodeRef<'a>>) -> Vec<NodeRef<'a>> {
        match self {
            Self::Position(position) => position
                .checked_sub(1)
                .and_then(|index| nodes.get(index).copied())
                .into_iter()
                .collect(),
            Self::AttributeEquals { name, value } => nodes
                .into_iter()
                .filter(|node| node.attr(name) == Some(value.as_str()))
                .collect(),
            Self::HasAttribute(name) => nodes
                .into_iter()
                .filter(|node| node.has_attr(name))
                .collect(),
            Self::Unrecognized(_) => nodes,
        }
    }
}

/// Elements of the subtree rooted at `node`, `node` included, in pre-order.
fn elements(node: NodeRef<'_>) -> impl Iterator<Item = (NodeRef<'_>, &ElementData)> {
    node.descendants()
        .filter_map(|candidate| candidate.as_element().map(|element| (candidate, element)))
}

fn search(node: NodeRef<'_>, predicate: impl Fn(&ElementData) -> bool) -> Vec<NodeRef<'_>> {
    elements(node)
        .filter(|&(_, element)| predicate(element))
        .map(|(found, _)| found)
        .collect()
}

/// Follow exact child-name steps. A step with no matching children empties
/// the frontier, so the rest of the path yields nothing.
fn follow_path<'a>(node: NodeRef<'a>, segments: &[String]) -> Vec<NodeRef<'a>> {
    segments.iter().fold(vec![node], |frontier, segment| {
        frontier
            .into_iter()
            .flat_map(NodeRef::children)
            .filter(|child| child.as_element().is_some_and(|e| name_matches(e, segment)))
            .collect()
    })
}

/// The local name matches exactly; a name written with a prefix
/// (`svg:rect`) matches the qualified name instead.
fn name_matches(element: &ElementData, name: &str) -> bool {
    if name.contains(':') {
        element.qualified_name() == name
    } else {
        element.name == name
    }
}
