//! Borrowed node handles.

use core::{fmt, ptr};

use crate::{Attributes, DomTree, ElementData, Node, NodeId, NodeKind, NodeType};

/// A non-owning reference to one node of a [`DomTree`].
///
/// This is what queries return. It is `Copy`, valid exactly as long as the
/// borrow of the tree, and always points at an existing node.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a DomTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    /// `id` must index a node of `tree`; callers check this.
    pub(crate) const fn new(tree: &'a DomTree, id: NodeId) -> Self {
        Self { tree, id }
    }

    /// The arena index of this node.
    #[must_use]
    pub const fn id(self) -> NodeId {
        self.id
    }

    /// The tree this node belongs to.
    #[must_use]
    pub const fn tree(self) -> &'a DomTree {
        self.tree
    }

    /// The underlying arena slot.
    #[must_use]
    pub fn node(self) -> &'a Node {
        &self.tree.nodes[self.id.0]
    }

    /// The node's kind and data.
    #[must_use]
    pub fn node_type(self) -> &'a NodeType {
        &self.node().node_type
    }

    /// The field-less kind of this node.
    #[must_use]
    pub fn kind(self) -> NodeKind {
        self.node_type().kind()
    }

    /// True for element nodes.
    #[must_use]
    pub fn is_element(self) -> bool {
        matches!(self.node_type(), NodeType::Element(_))
    }

    /// Element data, if this is an element.
    #[must_use]
    pub fn as_element(self) -> Option<&'a ElementData> {
        match self.node_type() {
            NodeType::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Tag name of an element.
    #[must_use]
    pub fn name(self) -> Option<&'a str> {
        self.as_element().map(|e| e.name.as_str())
    }

    /// Namespace prefix of an element.
    #[must_use]
    pub fn namespace(self) -> Option<&'a str> {
        self.as_element().and_then(|e| e.namespace.as_deref())
    }

    /// Attributes of an element.
    #[must_use]
    pub fn attributes(self) -> Option<&'a Attributes> {
        self.as_element().map(|e| &e.attributes)
    }

    /// Value of one attribute of an element.
    #[must_use]
    pub fn attr(self, name: &str) -> Option<&'a str> {
        self.attributes().and_then(|attrs| attrs.get(name))
    }

    /// True if this is an element carrying attribute `name`.
    #[must_use]
    pub fn has_attr(self, name: &str) -> bool {
        self.attributes().is_some_and(|attrs| attrs.contains(name))
    }

    /// The string a text, comment or doctype node holds.
    #[must_use]
    pub fn content(self) -> Option<&'a str> {
        match self.node_type() {
            NodeType::Text(s) | NodeType::Comment(s) | NodeType::Doctype(s) => Some(s),
            NodeType::Root | NodeType::Element(_) => None,
        }
    }

    /// Depth recorded when the node was built.
    #[must_use]
    pub fn depth(self) -> usize {
        self.node().depth
    }

    /// The owning node, `None` for the root.
    #[must_use]
    pub fn parent(self) -> Option<Self> {
        self.node().parent.map(|id| Self::new(self.tree, id))
    }

    /// Children in document order.
    #[must_use]
    pub fn children(self) -> Children<'a> {
        Children {
            tree: self.tree,
            ids: self.node().children.iter(),
        }
    }

    /// Pre-order iterator over this node and everything below it.
    #[must_use]
    pub fn descendants(self) -> Descendants<'a> {
        Descendants::new(self.tree, self.id)
    }

    /// Concatenated text of the node.
    ///
    /// A text node yields its own content, comments and doctypes yield
    /// nothing, and every other node yields its children's text in order.
    #[must_use]
    pub fn text(self) -> String {
        self.descendants()
            .filter_map(|node| match node.node_type() {
                NodeType::Text(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("node_type", self.node_type())
            .finish()
    }
}

/// Iterator over a node's children.
#[derive(Debug, Clone)]
pub struct Children<'a> {
    tree: &'a DomTree,
    ids: core::slice::Iter<'a, NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|&id| NodeRef::new(self.tree, id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl ExactSizeIterator for Children<'_> {}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ids.next_back().map(|&id| NodeRef::new(self.tree, id))
    }
}

/// Pre-order (node first, then children left to right) iterator.
///
/// Uses an explicit stack, so arbitrarily deep trees do not recurse.
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(tree: &'a DomTree, start: NodeId) -> Self {
        let stack = if start.0 < tree.len() {
            vec![start]
        } else {
            Vec::new()
        };
        Self { tree, stack }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(NodeRef::new(self.tree, id))
    }
}
