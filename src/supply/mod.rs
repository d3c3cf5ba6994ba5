//! Card supply and discard pile.
//!
//! - `Deck`: undrawn cards, reservations and constrained redraws
//! - `Trash`: discard log and the reachable-rank bound

pub mod deck;
mod mask;
pub mod trash;

pub use deck::Deck;
pub use trash::Trash;
