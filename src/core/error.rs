//! Error taxonomy shared by the card supply, discard pile and determinizer.
//!
//! Nothing is recovered internally. Every variant is returned to the caller,
//! which decides whether to abandon the rollout, the search, or treat the
//! failure as a bug.

use thiserror::Error;

use crate::cards::{Color, CountTable, Rank};

/// Errors raised by the determinization core.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested cell, row, column or table has no remaining copies.
    #[error("no card left matching rank {rank:?} and color {color:?}")]
    Depleted {
        rank: Option<Rank>,
        color: Option<Color>,
    },

    /// The reservation protocol was called out of order.
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// Row/column masking did not reach a fixed point.
    #[error("reservation masking did not converge after {passes} passes\n{table}")]
    Convergence { passes: usize, table: CountTable },

    /// An external card representation had an unexpected shape.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// A reveal tried to overwrite an attribute with a different value.
    #[error("cannot reveal {attribute} {revealed}: card already holds {existing}")]
    RevealConflict {
        attribute: &'static str,
        existing: String,
        revealed: String,
    },

    /// A concrete (rank, color) was required but the card has none.
    #[error("card identity is undetermined")]
    Undetermined,

    /// Returning a card would exceed the initial quantity of its cell.
    #[error("cell ({rank}, {color}) is already at its initial quantity")]
    Overflow { rank: Rank, color: Color },

    /// Rank outside `1..=5`.
    #[error("invalid rank {0}, expected 1..=5")]
    InvalidRank(u8),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
