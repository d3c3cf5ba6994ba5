//! The card supply: undrawn cards as a rank-by-color multiset.
//!
//! ## Reservations
//!
//! When a hand is redeterminized, cards known only by rank (or only by
//! color) must end up with an identity that agrees with that knowledge. The
//! supply records those cards in `reserved_by_rank` / `reserved_by_color`
//! so that redraws for *other* cards never consume the last copy a reserved
//! card needs. Reservations describe one hand at a time: they must be zero
//! before a new batch is reserved, and each constrained redraw consumes one.
//!
//! ```
//! use hanabi_mcts::cards::{Card, Rank};
//! use hanabi_mcts::core::GameRng;
//! use hanabi_mcts::supply::Deck;
//!
//! let mut deck = Deck::new();
//! let mut rng = GameRng::new(1);
//! let three = Rank::new(3).unwrap();
//!
//! deck.reserve(&[Card::rank_only(three), Card::unknown()]).unwrap();
//! let _other = deck.redraw(None, None, &mut rng).unwrap();
//! let card = deck.redraw(Some(three), None, &mut rng).unwrap();
//! assert_eq!(card.rank(), Some(three));
//! assert!(!deck.has_reservations());
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::mask::mask_reserved;
use crate::cards::{Card, Color, CountTable, Rank, COLOR_COUNT, RANK_COUNT};
use crate::core::{Error, GameRng, Result, SupplyConfig};

/// Undrawn cards plus the active reservation batch.
///
/// `Clone` is a full, independent copy: branch worlds mutate their own tables
/// and reservations without touching the original.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    table: CountTable,
    quantities: [u8; RANK_COUNT],
    reserved_by_rank: [u8; RANK_COUNT],
    reserved_by_color: [u8; COLOR_COUNT],
    max_mask_passes: usize,
}

impl Deck {
    /// Full supply with the standard quantities.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&SupplyConfig::default())
    }

    /// Full supply with custom parameters.
    #[must_use]
    pub fn with_config(config: &SupplyConfig) -> Self {
        Self {
            table: CountTable::full(&config.quantities),
            quantities: config.quantities,
            reserved_by_rank: [0; RANK_COUNT],
            reserved_by_color: [0; COLOR_COUNT],
            max_mask_passes: config.max_mask_passes,
        }
    }

    /// Number of cards still available.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.total()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Remaining copies of one card.
    #[must_use]
    pub fn count(&self, rank: Rank, color: Color) -> u8 {
        self.table.get(rank, color)
    }

    #[must_use]
    pub fn table(&self) -> &CountTable {
        &self.table
    }

    #[must_use]
    pub fn reserved_by_rank(&self) -> &[u8; RANK_COUNT] {
        &self.reserved_by_rank
    }

    #[must_use]
    pub fn reserved_by_color(&self) -> &[u8; COLOR_COUNT] {
        &self.reserved_by_color
    }

    /// True if any reservation is outstanding.
    #[must_use]
    pub fn has_reservations(&self) -> bool {
        self.reserved_by_rank.iter().chain(&self.reserved_by_color).any(|&r| r > 0)
    }

    /// Drop the active reservation batch.
    ///
    /// Needed only after an aborted redeterminization; a completed one
    /// consumes every reservation it made.
    pub fn clear_reservations(&mut self) {
        self.reserved_by_rank = [0; RANK_COUNT];
        self.reserved_by_color = [0; COLOR_COUNT];
    }

    /// Draw one card, ignoring reservations.
    ///
    /// With both attributes given, draws that exact card. With one given,
    /// draws from that row or column. With neither, draws from the whole
    /// table. Every individual remaining copy is equally likely.
    pub fn draw(&mut self, rank: Option<Rank>, color: Option<Color>, rng: &mut GameRng) -> Result<Card> {
        let (rank, color) = sample_cell(&self.table, rank, color, rng).ok_or(Error::Depleted { rank, color })?;
        self.take(rank, color)?;
        trace!(%rank, %color, remaining = self.len(), "drew card");
        Ok(Card::hidden(rank, color))
    }

    /// Remove every card in `cards` from the supply.
    ///
    /// Either all cards are removed or, on error, none are.
    pub fn remove_many(&mut self, cards: &[Card]) -> Result<()> {
        let mut table = self.table;
        for card in cards {
            let (rank, color) = card.require_identity()?;
            if !table.decrement(rank, color) {
                return Err(Error::Depleted {
                    rank: Some(rank),
                    color: Some(color),
                });
            }
        }
        self.table = table;
        Ok(())
    }

    /// Return cards to the supply.
    ///
    /// With `redeterminizing`, the cards are a hand about to be resampled:
    /// fully determined cards stay out of the pool, every other card gives
    /// back its hypothetical identity (if it holds one) and records its
    /// rank-only or color-only reservation. Reservations must be clear.
    pub fn add_many(&mut self, cards: &[Card], redeterminizing: bool) -> Result<()> {
        if redeterminizing {
            self.ensure_cleared("add_many")?;
        }

        let mut table = self.table;
        for card in cards {
            let identity = if redeterminizing {
                if card.is_fully_determined() {
                    continue;
                }
                // Never drawn from this supply: its copy is still in the pool.
                match card.identity() {
                    Some(identity) => identity,
                    None => continue,
                }
            } else {
                card.require_identity()?
            };

            let (rank, color) = identity;
            if !table.increment(rank, color, self.quantities[rank.index()]) {
                return Err(Error::Overflow { rank, color });
            }
        }
        self.table = table;

        if redeterminizing {
            cards.iter().for_each(|card| self.reserve_card(card));
            debug!(
                ranks = ?self.reserved_by_rank,
                colors = ?self.reserved_by_color,
                "returned hand for redeterminization"
            );
        }
        Ok(())
    }

    /// Reserve copies for every partially known card in `cards`.
    ///
    /// Fails with `Error::Precondition` if a previous batch is still active.
    pub fn reserve(&mut self, cards: &[Card]) -> Result<()> {
        self.ensure_cleared("reserve")?;
        cards.iter().for_each(|card| self.reserve_card(card));
        Ok(())
    }

    /// Draw one card while honoring the active reservations.
    ///
    /// - Neither attribute given: the card is fully unknown and may not
    ///   touch any row or column whose copies are all reserved.
    /// - One attribute given: the card is the partially known card whose
    ///   reservation is being satisfied. Its reservation must exist and is
    ///   consumed.
    /// - Both given: an exact draw.
    pub fn redraw(&mut self, rank: Option<Rank>, color: Option<Color>, rng: &mut GameRng) -> Result<Card> {
        if rank.is_some() && color.is_some() {
            return self.draw(rank, color, rng);
        }

        let masked = mask_reserved(
            &self.table,
            rank.is_none().then_some(&self.reserved_by_rank),
            color.is_none().then_some(&self.reserved_by_color),
            self.max_mask_passes,
        )?;

        let (drawn_rank, drawn_color) = match (rank, color) {
            (Some(rank), None) => {
                self.ensure_reserved(self.reserved_by_rank[rank.index()], || format!("rank {rank}"))?;
                let (rank, color) = sample_within_reservation(&masked, &self.table, Some(rank), None, rng)
                    .ok_or(Error::Depleted { rank: Some(rank), color: None })?;
                self.reserved_by_rank[rank.index()] -= 1;
                (rank, color)
            }
            (None, Some(color)) => {
                self.ensure_reserved(self.reserved_by_color[color.index()], || format!("color {color}"))?;
                let (rank, color) = sample_within_reservation(&masked, &self.table, None, Some(color), rng)
                    .ok_or(Error::Depleted { rank: None, color: Some(color) })?;
                self.reserved_by_color[color.index()] -= 1;
                (rank, color)
            }
            _ => sample_cell(&masked, None, None, rng).ok_or(Error::Depleted { rank: None, color: None })?,
        };

        self.take(drawn_rank, drawn_color)?;
        trace!(rank = %drawn_rank, color = %drawn_color, remaining = self.len(), "redrew card");
        Ok(Card::hidden(drawn_rank, drawn_color))
    }

    fn take(&mut self, rank: Rank, color: Color) -> Result<()> {
        if self.table.decrement(rank, color) {
            Ok(())
        } else {
            Err(Error::Depleted {
                rank: Some(rank),
                color: Some(color),
            })
        }
    }

    fn reserve_card(&mut self, card: &Card) {
        if card.is_fully_determined() {
            return;
        }
        if let Some(rank) = card.known_rank() {
            self.reserved_by_rank[rank.index()] += 1;
        } else if let Some(color) = card.known_color() {
            self.reserved_by_color[color.index()] += 1;
        }
    }

    fn ensure_cleared(&self, operation: &str) -> Result<()> {
        if !self.has_reservations() {
            return Ok(());
        }
        warn!(
            operation,
            ranks = ?self.reserved_by_rank,
            colors = ?self.reserved_by_color,
            "reservations were not cleared"
        );
        Err(Error::Precondition(format!(
            "{operation} requires cleared reservations, found ranks {:?} colors {:?}",
            self.reserved_by_rank, self.reserved_by_color
        )))
    }

    fn ensure_reserved(&self, reserved: u8, what: impl FnOnce() -> String) -> Result<()> {
        if reserved > 0 {
            return Ok(());
        }
        let what = what();
        warn!(reservation = %what, "constrained redraw without a reservation");
        Err(Error::Precondition(format!("no card with {what} was reserved")))
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Deck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.table, f)
    }
}

/// Pick a cell weighted by its count, restricted to a row, a column or a single cell.
fn sample_cell(
    table: &CountTable,
    rank: Option<Rank>,
    color: Option<Color>,
    rng: &mut GameRng,
) -> Option<(Rank, Color)> {
    match (rank, color) {
        (Some(rank), Some(color)) => (table.get(rank, color) > 0).then_some((rank, color)),
        (Some(rank), None) => {
            let index = rng.choose_by_count(&table.row(rank))?;
            Some((rank, Color::from_index(index)?))
        }
        (None, Some(color)) => {
            let index = rng.choose_by_count(&table.column(color))?;
            Some((Rank::from_index(index)?, color))
        }
        (None, None) => CountTable::cell_at(rng.choose_by_count(table.cells())?),
    }
}

/// Sample the reserved row or column, preferring cells other reservations
/// leave free. The reserved line itself is never masked away: if masking
/// emptied it, fall back to its real counts.
fn sample_within_reservation(
    masked: &CountTable,
    table: &CountTable,
    rank: Option<Rank>,
    color: Option<Color>,
    rng: &mut GameRng,
) -> Option<(Rank, Color)> {
    sample_cell(masked, rank, color, rng).or_else(|| {
        debug!(?rank, ?color, "reserved line fully masked, sampling real counts");
        sample_cell(table, rank, color, rng)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank(value: u8) -> Rank {
        Rank::new(value).unwrap()
    }

    #[test]
    fn test_new_deck() {
        let deck = Deck::new();

        assert_eq!(deck.len(), 50);
        assert_eq!(deck.count(rank(1), Color::Red), 3);
        assert_eq!(deck.count(rank(5), Color::White), 1);
        assert!(!deck.has_reservations());
    }

    #[test]
    fn test_draw_exact() {
        let mut deck = Deck::new();
        let mut rng = GameRng::new(1);

        let card = deck.draw(Some(rank(5)), Some(Color::Blue), &mut rng).unwrap();
        assert_eq!(card.identity(), Some((rank(5), Color::Blue)));
        assert!(!card.rank_known() && !card.color_known());
        assert_eq!(deck.count(rank(5), Color::Blue), 0);

        let err = deck.draw(Some(rank(5)), Some(Color::Blue), &mut rng).unwrap_err();
        assert_eq!(
            err,
            Error::Depleted {
                rank: Some(rank(5)),
                color: Some(Color::Blue)
            }
        );
        assert_eq!(deck.len(), 49);
    }

    #[test]
    fn test_draw_by_rank_stays_in_row() {
        let mut deck = Deck::new();
        let mut rng = GameRng::new(2);

        for _ in 0..5 {
            let card = deck.draw(Some(rank(5)), None, &mut rng).unwrap();
            assert_eq!(card.rank(), Some(rank(5)));
        }
        assert_eq!(deck.table().row_sum(rank(5)), 0);
        assert!(matches!(
            deck.draw(Some(rank(5)), None, &mut rng),
            Err(Error::Depleted { .. })
        ));
    }

    #[test]
    fn test_draw_until_empty() {
        let mut deck = Deck::new();
        let mut rng = GameRng::new(3);

        for drawn in 1..=50 {
            deck.draw(None, None, &mut rng).unwrap();
            assert_eq!(deck.len(), 50 - drawn);
        }
        assert!(deck.is_empty());
        assert_eq!(
            deck.draw(None, None, &mut rng),
            Err(Error::Depleted { rank: None, color: None })
        );
    }

    #[test]
    fn test_remove_many_is_atomic() {
        let mut deck = Deck::new();
        let fives = [Card::known(rank(5), Color::Red), Card::known(rank(5), Color::Red)];

        assert!(matches!(deck.remove_many(&fives), Err(Error::Depleted { .. })));
        assert_eq!(deck.len(), 50);

        assert_eq!(deck.remove_many(&[Card::unknown()]), Err(Error::Undetermined));
    }

    #[test]
    fn test_add_many_rejects_overflow() {
        let mut deck = Deck::new();
        let err = deck.add_many(&[Card::known(rank(1), Color::Red)], false).unwrap_err();
        assert_eq!(err, Error::Overflow { rank: rank(1), color: Color::Red });
    }

    #[test]
    fn test_add_many_redeterminizing_reserves() {
        let mut deck = Deck::new();
        let mut hint = Card::hidden(rank(2), Color::Green);
        hint.reveal_rank(None).unwrap();
        let hand = [
            Card::known(rank(1), Color::Red),
            hint,
            Card::hidden(rank(4), Color::Blue),
            Card::color_only(Color::White),
        ];
        deck.remove_many(&hand[..3]).unwrap();

        deck.add_many(&hand, true).unwrap();

        // Known card stays out; hypothetical 2G and 4B come back.
        assert_eq!(deck.len(), 49);
        assert_eq!(deck.count(rank(1), Color::Red), 2);
        assert_eq!(deck.reserved_by_rank(), &[0, 1, 0, 0, 0]);
        assert_eq!(deck.reserved_by_color(), &[0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_add_many_redeterminizing_requires_cleared() {
        let mut deck = Deck::new();
        deck.reserve(&[Card::rank_only(rank(3))]).unwrap();

        let err = deck.add_many(&[], true).unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
    }

    #[test]
    fn test_reserve_counts_partial_cards_only() {
        let mut deck = Deck::new();
        let hand = [
            Card::rank_only(rank(3)),
            Card::rank_only(rank(3)),
            Card::color_only(Color::Yellow),
            Card::known(rank(4), Color::Yellow),
            Card::unknown(),
        ];

        deck.reserve(&hand).unwrap();

        assert_eq!(deck.reserved_by_rank(), &[0, 0, 2, 0, 0]);
        assert_eq!(deck.reserved_by_color(), &[0, 1, 0, 0, 0]);
        assert!(matches!(deck.reserve(&hand), Err(Error::Precondition(_))));

        deck.clear_reservations();
        assert!(deck.reserve(&hand).is_ok());
    }

    #[test]
    fn test_redraw_consumes_reservation() {
        let mut deck = Deck::new();
        let mut rng = GameRng::new(4);
        deck.reserve(&[Card::rank_only(rank(3))]).unwrap();

        let card = deck.redraw(Some(rank(3)), None, &mut rng).unwrap();
        assert_eq!(card.rank(), Some(rank(3)));
        assert_eq!(deck.reserved_by_rank()[2], 0);
        assert_eq!(deck.len(), 49);

        let err = deck.redraw(Some(rank(3)), None, &mut rng).unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
        assert_eq!(deck.len(), 49);
    }

    #[test]
    fn test_redraw_by_color_consumes_reservation() {
        let mut deck = Deck::new();
        let mut rng = GameRng::new(5);
        deck.reserve(&[Card::color_only(Color::Blue)]).unwrap();

        let card = deck.redraw(None, Some(Color::Blue), &mut rng).unwrap();
        assert_eq!(card.color(), Some(Color::Blue));
        assert!(!deck.has_reservations());
    }

    #[test]
    fn test_unconstrained_redraw_avoids_reserved_row() {
        let mut deck = Deck::new();
        let mut rng = GameRng::new(6);
        // Four of the five 5s are gone; the last one belongs to the hinted card.
        for color in [Color::Red, Color::Yellow, Color::Green, Color::Blue] {
            deck.draw(Some(rank(5)), Some(color), &mut rng).unwrap();
        }
        deck.reserve(&[Card::rank_only(rank(5))]).unwrap();

        for _ in 0..40 {
            let card = deck.redraw(None, None, &mut rng).unwrap();
            assert_ne!(card.rank(), Some(rank(5)));
        }
        assert_eq!(deck.count(rank(5), Color::White), 1);
    }

    #[test]
    fn test_unconstrained_redraw_depleted_when_all_reserved() {
        let mut deck = Deck::with_config(&SupplyConfig::default().with_quantities([1, 0, 0, 0, 0]));
        let mut rng = GameRng::new(7);
        deck.reserve(&[Card::color_only(Color::Red)]).unwrap();
        for color in [Color::Yellow, Color::Green, Color::Blue, Color::White] {
            deck.draw(None, Some(color), &mut rng).unwrap();
        }

        assert_eq!(
            deck.redraw(None, None, &mut rng),
            Err(Error::Depleted { rank: None, color: None })
        );
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut deck = Deck::new();
        let mut rng = GameRng::new(8);
        let snapshot = deck.clone();

        deck.draw(None, None, &mut rng).unwrap();
        deck.reserve(&[Card::rank_only(rank(1))]).unwrap();

        assert_eq!(snapshot.len(), 50);
        assert!(!snapshot.has_reservations());
    }

    #[test]
    fn test_serialization() {
        let mut deck = Deck::new();
        deck.reserve(&[Card::color_only(Color::Green)]).unwrap();

        let json = serde_json::to_string(&deck).unwrap();
        let deserialized: Deck = serde_json::from_str(&json).unwrap();

        assert_eq!(deck, deserialized);
    }
}
