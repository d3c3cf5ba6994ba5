//! Card model: colors, ranks, partially known cards and count tables.
//!
//! ## Key Types
//!
//! - `Color`, `Rank`: the two card attributes
//! - `Card`: rank and color, each with an independent knowledge flag
//! - `CountTable`: remaining copies per (rank, color)

pub mod card;
pub mod color;
pub mod external;
pub mod rank;
pub mod table;

pub use card::{Card, Knowledge};
pub use color::Color;
pub use external::parse_external;
pub use rank::Rank;
pub use table::CountTable;

/// Number of distinct ranks.
pub const RANK_COUNT: usize = 5;

/// Number of colors.
pub const COLOR_COUNT: usize = 5;

/// Copies of each rank per color in a full game set, indexed by `rank - 1`.
pub const CARD_QUANTITIES: [u8; RANK_COUNT] = [3, 2, 2, 2, 1];
