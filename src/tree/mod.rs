//! Arena-indexed search tree for Monte Carlo search.
//!
//! The tree only stores structure and per-node statistics. Selection,
//! rollouts and backpropagation belong to the search algorithm that owns it.
//!
//! ## Usage
//!
//! ```rust
//! use hanabi_mcts::tree::SearchTree;
//!
//! let mut tree = SearchTree::new("start");
//! let root = tree.root();
//! let play = tree.insert("play 1", root);
//! let hint = tree.insert("hint red", root);
//!
//! tree.get_mut(play).stats.record(1.0);
//!
//! assert_eq!(tree.get(root).children_ids(), &[play, hint]);
//! assert_eq!(tree.siblings(play).count(), 1);
//! assert!(tree.is_root(root));
//! ```

pub mod node;
#[allow(clippy::module_inception)]
pub mod tree;

pub use node::{Node, NodeId, NodeStats};
pub use tree::{SearchTree, TreeStats};
