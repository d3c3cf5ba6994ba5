//! Determinization driver.
//!
//! Turns a hand with mixed knowledge into one concrete, consistent world by
//! drawing replacement identities from the card supply under the active
//! reservations. Each redraw respects what the holder knows: rank-only cards
//! keep their rank, color-only cards keep their color, and fully unknown
//! cards never take a copy a partially known card still needs.

use tracing::debug;

use crate::cards::Card;
use crate::core::{DeterminizeConfig, GameRng, GameRngState, Result};
use crate::supply::{Deck, Trash};

/// One sampled hypothetical world, independently owned.
#[derive(Clone, Debug)]
pub struct SampledWorld {
    /// The hand with every hidden attribute assigned.
    pub hand: Vec<Card>,

    /// Supply after the hand's identities were drawn.
    pub deck: Deck,

    /// Discard pile, copied from the source world.
    pub trash: Trash,
}

impl SampledWorld {
    /// Best score still achievable in this world.
    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.trash.max_score()
    }
}

/// Samples hidden card identities consistent with a player's knowledge.
#[derive(Clone, Debug)]
pub struct Determinizer {
    config: DeterminizeConfig,
    rng: GameRng,
}

impl Determinizer {
    /// Create a determinizer seeded from `config.seed`.
    pub fn new(config: DeterminizeConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self { config, rng }
    }

    /// Resume from a checkpoint taken with [`Determinizer::rng_state`].
    ///
    /// `config.seed` is ignored; the stream continues where the checkpoint
    /// left off.
    pub fn from_rng_state(config: DeterminizeConfig, state: &GameRngState) -> Self {
        Self {
            config,
            rng: GameRng::from_state(state),
        }
    }

    #[must_use]
    pub fn config(&self) -> &DeterminizeConfig {
        &self.config
    }

    /// Independent determinizer for a parallel rollout.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        Self {
            config: self.config.clone(),
            rng: self.rng.fork(),
        }
    }

    /// RNG checkpoint.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Full supply built from this determinizer's configuration.
    #[must_use]
    pub fn new_deck(&self) -> Deck {
        Deck::with_config(&self.config.supply)
    }

    /// Empty trash built from this determinizer's configuration.
    #[must_use]
    pub fn new_trash(&self) -> Trash {
        Trash::with_config(&self.config.supply)
    }

    /// Assign identities to a hand whose hidden cards are still in `deck`.
    ///
    /// Fully determined cards are left alone and must already have been
    /// removed from the supply. On error the hand and deck are partially
    /// updated and should be discarded.
    pub fn determinize(&mut self, hand: &mut [Card], deck: &mut Deck) -> Result<()> {
        deck.reserve(hand)?;
        self.resample(hand, deck)
    }

    /// Replace a hand's hypothetical identities with a fresh assignment.
    ///
    /// Hidden identities from a previous determinization go back into the
    /// supply first; revealed attributes are preserved. Cards that never
    /// received an identity are treated as still in the supply.
    pub fn redeterminize(&mut self, hand: &mut [Card], deck: &mut Deck) -> Result<()> {
        deck.add_many(hand, true)?;
        self.resample(hand, deck)
    }

    /// Sample a complete world without touching the inputs.
    pub fn sample_world(&mut self, hand: &[Card], deck: &Deck, trash: &Trash) -> Result<SampledWorld> {
        let mut world = SampledWorld {
            hand: hand.to_vec(),
            deck: deck.clone(),
            trash: trash.clone(),
        };
        self.redeterminize(&mut world.hand, &mut world.deck)?;
        Ok(world)
    }

    fn resample(&mut self, hand: &mut [Card], deck: &mut Deck) -> Result<()> {
        let mut drawn = 0;
        for card in hand.iter_mut().filter(|card| !card.is_fully_determined()) {
            let identity = deck.redraw(card.known_rank(), card.known_color(), &mut self.rng)?;
            let (rank, color) = identity.require_identity()?;
            card.resample(rank, color);
            drawn += 1;
        }

        debug!(hand_size = hand.len(), drawn, remaining = deck.len(), "determinized hand");
        Ok(())
    }
}
