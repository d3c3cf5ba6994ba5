//! Supply and determinization configuration.

use serde::{Deserialize, Serialize};

use crate::cards::{CARD_QUANTITIES, RANK_COUNT};

/// Card supply parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyConfig {
    /// Copies of each rank per color, indexed by `rank - 1`.
    pub quantities: [u8; RANK_COUNT],

    /// Upper bound on row/column masking passes during a constrained redraw.
    /// Exceeding it is reported as a convergence failure.
    pub max_mask_passes: usize,
}

impl Default for SupplyConfig {
    fn default() -> Self {
        Self {
            quantities: CARD_QUANTITIES,
            max_mask_passes: 100,
        }
    }
}

impl SupplyConfig {
    /// Use custom per-rank quantities.
    pub fn with_quantities(mut self, quantities: [u8; RANK_COUNT]) -> Self {
        self.quantities = quantities;
        self
    }

    /// Use a custom masking pass limit.
    pub fn with_max_mask_passes(mut self, passes: usize) -> Self {
        self.max_mask_passes = passes;
        self
    }

    /// Number of cards in a fresh supply.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.quantities.iter().map(|&q| q as usize).sum::<usize>() * crate::cards::COLOR_COUNT
    }
}

/// Determinizer parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeterminizeConfig {
    /// Random seed. Same seed produces the same sequence of sampled worlds.
    pub seed: u64,

    /// Parameters for the supplies this determinizer creates.
    pub supply: SupplyConfig,
}

impl Default for DeterminizeConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            supply: SupplyConfig::default(),
        }
    }
}

impl DeterminizeConfig {
    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config with custom supply parameters.
    pub fn with_supply(mut self, supply: SupplyConfig) -> Self {
        self.supply = supply;
        self
    }
}
