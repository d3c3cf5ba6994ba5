//! Search tree node structures.
//!
//! Nodes refer to each other by `NodeId` index into the owning tree's arena,
//! never by reference.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Index into the `SearchTree` node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The root of every tree.
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel value representing no node (the root's parent).
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Arena slot.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// Visit/value statistics maintained by the search algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeStats {
    /// Number of rollouts through this node.
    pub visits: u32,

    /// Sum of rollout values.
    pub total_value: f64,
}

impl NodeStats {
    /// Record one rollout result.
    pub fn record(&mut self, value: f64) {
        self.visits += 1;
        self.total_value += value;
    }

    /// Mean rollout value, 0 when unvisited.
    #[must_use]
    pub fn mean_value(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_value / self.visits as f64
        }
    }
}

/// A node in the search tree.
///
/// Structure (id, parent, children, depth) is owned by the tree and only
/// readable here; `data` and `stats` belong to the caller.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node<T> {
    id: NodeId,
    parent: NodeId,
    children: SmallVec<[NodeId; 8]>,
    depth: u32,

    /// Opaque payload (a move, a game state summary, ...).
    pub data: T,

    /// Rollout statistics.
    pub stats: NodeStats,
}

impl<T> Node<T> {
    pub(crate) fn new(id: NodeId, parent: NodeId, depth: u32, data: T) -> Self {
        Self {
            id,
            parent,
            children: SmallVec::new(),
            depth,
            data,
            stats: NodeStats::default(),
        }
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Parent id, `None` for the root.
    #[must_use]
    pub fn parent_id(&self) -> Option<NodeId> {
        (!self.parent.is_none()).then_some(self.parent)
    }

    /// Child ids in insertion order.
    #[must_use]
    pub fn children_ids(&self) -> &[NodeId] {
        &self.children
    }

    /// Depth in tree (root = 0).
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Only the node with id 0 is a root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.id == NodeId::ROOT
    }
}
