//! Card ranks.

use serde::{Deserialize, Serialize};

use crate::core::Error;

/// Card rank in `1..=5`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rank(u8);

impl Rank {
    /// Lowest rank.
    pub const MIN: Rank = Rank(1);

    /// Highest rank.
    pub const MAX: Rank = Rank(5);

    /// All ranks in table row order.
    pub const ALL: [Rank; 5] = [Rank(1), Rank(2), Rank(3), Rank(4), Rank(5)];

    /// Create a rank, rejecting values outside `1..=5`.
    pub fn new(value: u8) -> Result<Self, Error> {
        if (Self::MIN.0..=Self::MAX.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidRank(value))
        }
    }

    /// Face value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Row index in a count table (`rank - 1`).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Rank for a count table row.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl TryFrom<u8> for Rank {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> Self {
        rank.0
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
