//! Plain-data projection.
//!
//! A recursive, order-preserving dump of every node's kind, name, namespace,
//! attributes, content and depth. Two trees with equal projections are
//! structurally identical, which makes this the natural form for caching,
//! JSON output and comparisons in tests.

use serde::{Deserialize, Serialize};

use crate::{NodeKind, NodeRef, NodeType};

/// Owned, serializable snapshot of one node and its subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeProjection {
    /// Node kind.
    pub kind: NodeKind,
    /// Tag name, elements only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Namespace prefix, elements only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Attributes as `(name, value)` pairs in source order, elements only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<(String, String)>,
    /// Content of text, comment and doctype nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Depth recorded at construction.
    pub depth: usize,
    /// Projections of the children, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeProjection>,
}

impl NodeRef<'_> {
    /// Project this node and its subtree into plain data.
    #[must_use]
    pub fn project(self) -> NodeProjection {
        let (name, namespace, attributes) = match self.node_type() {
            NodeType::Element(element) => (
                Some(element.name.clone()),
                element.namespace.clone(),
                element
                    .attributes
                    .iter()
                    .map(|attr| (attr.name.clone(), attr.value.clone()))
                    .collect(),
            ),
            _ => (None, None, Vec::new()),
        };

        NodeProjection {
            kind: self.kind(),
            name,
            namespace,
            attributes,
            content: self.content().map(str::to_string),
            depth: self.depth(),
            children: self.children().map(NodeRef::project).collect(),
        }
    }
}
