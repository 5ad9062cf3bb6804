//! Append-only tree construction.

use crate::{DomTree, Node, NodeId, NodeType};

/// Owns a [`DomTree`] while it is being built.
///
/// Appending through a sink is the only way to add nodes. Once
/// [`finish`](Self::finish) hands the tree over, nothing can change it.
#[derive(Debug, Clone, Default)]
pub struct TreeSink {
    tree: DomTree,
}

impl TreeSink {
    /// Start from a tree holding only the root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node and append it as the last child of `parent`.
    ///
    /// Returns `None` and leaves the tree untouched if `parent` is not a node
    /// of this tree or is a text, comment or doctype node.
    pub fn append(&mut self, parent: NodeId, node_type: NodeType, depth: usize) -> Option<NodeId> {
        let id = NodeId(self.tree.nodes.len());
        let owner = self.tree.nodes.get_mut(parent.0)?;
        if owner.node_type.is_leaf() {
            return None;
        }
        owner.children.push(id);
        self.tree.nodes.push(Node {
            node_type,
            parent: Some(parent),
            children: Vec::new(),
            depth,
        });
        Some(id)
    }

    /// The tree built so far.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Hand over the finished tree.
    #[must_use]
    pub fn finish(self) -> DomTree {
        self.tree
    }
}
