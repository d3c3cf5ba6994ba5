//! Deterministic random number generation with forking for rollouts.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Forkable**: Independent streams for parallel hypothetical worlds
//! - **Serializable**: O(1) state capture and restore
//! - **Card counting**: Integer-weighted selection over remaining copies
//!
//! ```
//! use hanabi_mcts::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let mut rollout = rng.fork();
//!
//! // A cell holding 3 copies is three times as likely as one holding 1.
//! let index = rollout.choose_by_count(&[3, 0, 1]).unwrap();
//! assert!(index == 0 || index == 2);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG with forking for rollouts.
///
/// Uses ChaCha8 for speed while keeping a high-quality stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Pick an index with probability proportional to its count.
    ///
    /// Every individual copy is equally likely, so a slot holding 3 copies
    /// is chosen three times as often as a slot holding 1.
    ///
    /// Returns `None` if all counts are zero.
    pub fn choose_by_count(&mut self, counts: &[u8]) -> Option<usize> {
        let total: u32 = counts.iter().map(|&c| u32::from(c)).sum();
        if total == 0 {
            return None;
        }

        let mut pick = self.inner.gen_range(0..total);
        for (i, &count) in counts.iter().enumerate() {
            let count = u32::from(count);
            if pick < count {
                return Some(i);
            }
            pick -= count;
        }

        None
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Serializable RNG state for checkpointing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    /// Fork counter for deterministic branching
    pub fork_counter: u64,
}
