//! Arena-based search tree.
//!
//! Uses a flat `Vec<Node<T>>` with index-based references for efficiency,
//! cache-friendliness, and serializability. Append-only: subtrees are pruned
//! by no longer referencing them.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::node::{Node, NodeId};

/// Arena-based search tree.
///
/// A node's id is its position in the arena, assigned at insertion and
/// never reused. The root always has id 0.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchTree<T> {
    nodes: Vec<Node<T>>,
}

impl<T> SearchTree<T> {
    /// Create a new tree holding only a root.
    pub fn new(root_data: T) -> Self {
        Self::with_capacity(root_data, 1024)
    }

    /// Create a tree with custom initial capacity.
    pub fn with_capacity(root_data: T, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(Node::new(NodeId::ROOT, NodeId::NONE, 0, root_data));
        Self { nodes }
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &Node<T> {
        self.get(NodeId::ROOT)
    }

    /// Get a node by ID. Panics on ids this tree never issued.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.index()]
    }

    /// Get a node by ID, `None` for unknown ids.
    #[must_use]
    pub fn try_get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id.index()]
    }

    /// Append a child of `parent`, returning its ID.
    pub fn insert(&mut self, data: T, parent: NodeId) -> NodeId {
        debug_assert!(self.nodes.len() < NodeId::NONE.index(), "node ids exhausted");
        let id = NodeId::new(self.nodes.len() as u32);
        let parent_node = &mut self.nodes[parent.index()];
        parent_node.push_child(id);
        let depth = parent_node.depth() + 1;

        self.nodes.push(Node::new(id, parent, depth, data));
        trace!(%id, %parent, depth, "inserted node");
        id
    }

    /// Children of a node in insertion order. Empty for `NodeId::NONE`
    /// and for ids this tree never issued.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node<T>> + '_ {
        self.try_get(id)
            .into_iter()
            .flat_map(|node| node.children_ids().iter())
            .map(move |&child| self.get(child))
    }

    /// Parent of a node, `None` for the root.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<&Node<T>> {
        self.get(id).parent_id().map(|parent| self.get(parent))
    }

    /// Other children of this node's parent. Empty for the root.
    pub fn siblings(&self, id: NodeId) -> impl Iterator<Item = &Node<T>> + '_ {
        self.parent(id)
            .into_iter()
            .flat_map(|parent| parent.children_ids().iter())
            .filter(move |&&sibling| sibling != id)
            .map(move |&sibling| self.get(sibling))
    }

    #[must_use]
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.get(id).is_leaf()
    }

    #[must_use]
    pub fn is_root(&self, id: NodeId) -> bool {
        self.get(id).is_root()
    }

    /// Ids from `id` up to and including the root.
    #[must_use]
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = self.get(id);
        while let Some(parent) = current.parent_id() {
            path.push(parent);
            current = self.get(parent);
        }
        path
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Clear the tree and reset with a new root.
    pub fn reset(&mut self, root_data: T) {
        self.nodes.clear();
        self.nodes.push(Node::new(NodeId::ROOT, NodeId::NONE, 0, root_data));
    }

    /// Iterate over all nodes in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Node<T>> {
        self.nodes.iter()
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            node_count: self.nodes.len(),
            max_depth: self.nodes.iter().map(Node::depth).max().unwrap_or(0),
            leaf_count: self.nodes.iter().filter(|n| n.is_leaf()).count(),
        }
    }
}

/// Statistics about the search tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Maximum depth reached.
    pub max_depth: u32,

    /// Nodes without children.
    pub leaf_count: usize,
}

impl TreeStats {
    /// Average children per internal node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        let internal = self.node_count - self.leaf_count;
        if internal == 0 {
            0.0
        } else {
            (self.node_count - 1) as f64 / internal as f64
        }
    }
}
