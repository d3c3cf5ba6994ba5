//! # hanabi-mcts
//!
//! Information-management core for a Hanabi-playing Monte Carlo agent.
//!
//! ## Design Principles
//!
//! 1. **Knowledge-Consistent Sampling**: Hidden identities are drawn so that
//!    no revealed rank or color is ever contradicted, with every remaining
//!    physical card equally likely.
//!
//! 2. **Cheap Branching**: Supplies and discard piles are plain values.
//!    Cloning one yields an independent hypothetical world.
//!
//! 3. **Index, Don't Point**: The search tree is an append-only arena whose
//!    nodes refer to each other by id.
//!
//! ## Modules
//!
//! - `core`: Errors, RNG, configuration
//! - `cards`: Colors, ranks, partially known cards, count tables
//! - `supply`: Card supply with reservations, discard pile
//! - `tree`: Arena search tree
//! - `determinize`: Hand determinization driver

pub mod core;
pub mod cards;
pub mod supply;
pub mod tree;
pub mod determinize;

// Re-export commonly used types
pub use crate::core::{
    DeterminizeConfig, Error, GameRng, GameRngState, Result, SupplyConfig,
};

pub use crate::cards::{Card, Color, CountTable, Knowledge, Rank, CARD_QUANTITIES};

pub use crate::supply::{Deck, Trash};

pub use crate::tree::{Node, NodeId, NodeStats, SearchTree, TreeStats};

pub use crate::determinize::{Determinizer, SampledWorld};
