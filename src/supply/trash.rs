//! Discard pile and the reachable-rank bound it implies.
//!
//! Once every copy of a card has been discarded, no higher rank of that
//! color can ever be played, so `maxima[color]` drops to `rank - 1`. The
//! bound only ever tightens.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{Card, Color, CountTable, Rank, COLOR_COUNT};
use crate::core::{Error, Result, SupplyConfig};

/// Ordered discard log with per-color reachable maxima.
///
/// The log is a persistent vector, so cloning a trash for a branch world
/// shares structure with the original.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trash {
    cards: Vector<Card>,
    table: CountTable,
    maxima: [u8; COLOR_COUNT],
}

impl Trash {
    /// Empty trash for the standard quantities.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&SupplyConfig::default())
    }

    /// Empty trash for custom quantities.
    #[must_use]
    pub fn with_config(config: &SupplyConfig) -> Self {
        Self {
            cards: Vector::new(),
            table: CountTable::full(&config.quantities),
            maxima: [Rank::MAX.value(); COLOR_COUNT],
        }
    }

    /// Discard a card. It must have a concrete identity.
    pub fn append(&mut self, card: Card) -> Result<()> {
        let (rank, color) = card.require_identity()?;
        if !self.table.decrement(rank, color) {
            return Err(Error::Depleted {
                rank: Some(rank),
                color: Some(color),
            });
        }

        if self.table.get(rank, color) == 0 {
            let bound = rank.value() - 1;
            let maximum = &mut self.maxima[color.index()];
            if bound < *maximum {
                debug!(%color, from = *maximum, to = bound, "tightened reachable rank");
                *maximum = bound;
            }
        }

        self.cards.push_back(card);
        Ok(())
    }

    /// Discarded cards, oldest first.
    pub fn cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Copies not yet discarded, per cell.
    #[must_use]
    pub fn table(&self) -> &CountTable {
        &self.table
    }

    /// Highest reachable rank per color (0 means nothing playable).
    #[must_use]
    pub fn maxima(&self) -> &[u8; COLOR_COUNT] {
        &self.maxima
    }

    #[must_use]
    pub fn maximum(&self, color: Color) -> u8 {
        self.maxima[color.index()]
    }

    /// Best score still achievable given the discards.
    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.maxima.iter().map(|&m| u32::from(m)).sum()
    }
}

impl Default for Trash {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Trash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cards: Vec<String> = self.cards.iter().map(|c| c.to_string()).collect();
        write!(f, "[{}]", cards.join(", "))
    }
}
