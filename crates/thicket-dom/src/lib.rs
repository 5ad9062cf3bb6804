//! Document tree for Thicket.
//!
//! This crate provides an arena-based tree of parsed markup. Every node lives
//! in one `Vec` owned by [`DomTree`]; relationships are [`NodeId`] indices,
//! so a tree is plain data: `Clone`, comparable, `Send` and `Sync`, with no
//! handle to anything outside itself.
//!
//! # Design
//!
//! - [`NodeType`] is a sum type with one variant per node kind, each carrying
//!   only the fields that kind has.
//! - Depth is recorded once, when the tree builder appends the node, and is
//!   never recomputed.
//! - Nodes are only added through a [`TreeSink`]. A finished [`DomTree`]
//!   has no mutating methods; queries hand out [`NodeRef`] handles, which
//!   borrow the tree and cannot outlive it.

mod attributes;
mod node_ref;
/// Debug pretty-printing of a tree.
pub mod print;
/// Plain-data projection of a tree, the substrate for external formats.
pub mod projection;
/// Re-serialization of a tree to markup text.
pub mod serialize;
mod sink;

pub use attributes::{Attribute, Attributes};
pub use node_ref::{Children, Descendants, NodeRef};
pub use print::{format_tree, print_tree};
pub use projection::NodeProjection;
pub use serialize::to_markup;
pub use sink::TreeSink;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Elements that never have a closing tag and never hold children.
///
/// Matched against the lowercase tag name, both when reading (a start tag with
/// one of these names is self-closing even without a trailing `/`) and when
/// writing markup back out.
pub const SELF_CLOSING_ELEMENTS: &[&str] = &[
    "img", "br", "hr", "input", "meta", "link", "area", "base", "col", "embed", "source", "track",
    "wbr",
];

/// Returns true if `name` (any case) is in [`SELF_CLOSING_ELEMENTS`].
#[must_use]
pub fn is_self_closing(name: &str) -> bool {
    SELF_CLOSING_ELEMENTS
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(name))
}

/// A type-safe index into the tree.
///
/// `NodeId` provides O(1) access to any node without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// Field-less discriminant of [`NodeType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// The unique entry point of a tree.
    Root,
    /// A tag with a name, attributes and children.
    Element,
    /// A run of character data.
    Text,
    /// A `<!-- ... -->` comment.
    Comment,
    /// A `<!DOCTYPE ...>` declaration.
    Doctype,
}

/// Element-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Local tag name as written, without the namespace prefix. Never empty.
    pub name: String,
    /// Namespace prefix (`svg` in `<svg:rect>`), if the tag had one.
    pub namespace: Option<String>,
    /// Attributes in source order.
    pub attributes: Attributes,
}

impl ElementData {
    /// Create element data with no namespace and no attributes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            attributes: Attributes::new(),
        }
    }

    /// Returns the element's `id` attribute value if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attributes.get("id")
    }

    /// Returns the class tokens of the `class` attribute.
    ///
    /// The value is split on single spaces and each token trimmed; empty
    /// tokens are dropped.
    #[must_use]
    pub fn classes(&self) -> Vec<&str> {
        self.attributes.get("class").map_or_else(Vec::new, |list| {
            list.split(' ')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .collect()
        })
    }

    /// Returns true if `class` is one of the element's class tokens.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().contains(&class)
    }

    /// The name as written in markup: `prefix:name`, or just `name`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match self.namespace.as_deref() {
            Some(prefix) if !prefix.is_empty() => format!("{prefix}:{}", self.name),
            _ => self.name.clone(),
        }
    }
}

/// The kind of a node together with the data that kind carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// The tree's root. Has no name, attributes or content.
    Root,
    /// An element.
    Element(ElementData),
    /// Non-empty, whitespace-trimmed character data.
    Text(String),
    /// Trimmed comment body.
    Comment(String),
    /// Declaration body following the `DOCTYPE` keyword, trimmed.
    Doctype(String),
}

impl NodeType {
    /// The field-less kind of this node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Root => NodeKind::Root,
            Self::Element(_) => NodeKind::Element,
            Self::Text(_) => NodeKind::Text,
            Self::Comment(_) => NodeKind::Comment,
            Self::Doctype(_) => NodeKind::Doctype,
        }
    }

    /// Text, comment and doctype nodes never have children.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Text(_) | Self::Comment(_) | Self::Doctype(_))
    }
}

/// One slot in the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// What this node is.
    pub node_type: NodeType,
    /// The owning node, `None` only for the root.
    pub parent: Option<NodeId>,
    /// Owned children in document order.
    pub children: Vec<NodeId>,
    /// Nesting level recorded at construction. The root and its direct
    /// children are both at depth 0.
    pub depth: usize,
}

/// Arena-based document tree with O(1) node access.
///
/// All nodes are stored in a contiguous vector and refer to each other by
/// index. The root node is always at index 0 ([`NodeId::ROOT`]). Trees are
/// grown with a [`TreeSink`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new tree with just the root node.
    #[must_use]
    pub fn new() -> Self {
        let root = Node {
            node_type: NodeType::Root,
            parent: None,
            children: Vec::new(),
            depth: 0,
        };
        Self { nodes: vec![root] }
    }

    /// Get the root node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a handle to the root node.
    #[must_use]
    pub const fn root_ref(&self) -> NodeRef<'_> {
        NodeRef::new(self, NodeId::ROOT)
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a handle to a node, if `id` belongs to this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then(|| NodeRef::new(self, id))
    }

    /// Get the number of nodes in the tree, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the tree holds nothing but the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Pre-order iterator over `id` and everything below it.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants::new(self, id)
    }

    /// Re-serialize the whole tree to markup.
    #[must_use]
    pub fn to_markup(&self) -> String {
        to_markup(self.root_ref())
    }

    /// Plain-data projection of the whole tree.
    #[must_use]
    pub fn project(&self) -> NodeProjection {
        self.root_ref().project()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}
