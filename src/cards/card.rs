//! Cards with per-attribute knowledge.
//!
//! A card's rank and color are tracked independently. Each attribute may hold
//! a value without that value being known to the card's holder: that is the
//! state of a card in one's own hand after determinization, where the value
//! is a hypothesis and only the knowledge flag reflects revealed information.

use serde::{Deserialize, Serialize};

use super::{Color, Rank};
use crate::core::{Error, Result};

/// One attribute of a card: an optional value plus whether it is known.
///
/// `known` implies `value.is_some()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Knowledge<T> {
    value: Option<T>,
    known: bool,
}

impl<T: Copy + PartialEq> Knowledge<T> {
    /// No value, not known.
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            value: None,
            known: false,
        }
    }

    /// Value held as a hypothesis, not known.
    #[must_use]
    pub const fn hidden(value: T) -> Self {
        Self {
            value: Some(value),
            known: false,
        }
    }

    /// Value held and known.
    #[must_use]
    pub const fn known(value: T) -> Self {
        Self {
            value: Some(value),
            known: true,
        }
    }

    /// Held value, known or not.
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<T> {
        self.value
    }

    /// Whether the holder knows this attribute.
    #[inline]
    #[must_use]
    pub fn is_known(&self) -> bool {
        self.known
    }

    /// Held value if it is known.
    #[must_use]
    pub fn known_value(&self) -> Option<T> {
        if self.known {
            self.value
        } else {
            None
        }
    }

    /// Replace a hypothetical value. Known values are left alone.
    fn resample(&mut self, value: T) {
        if !self.known {
            self.value = Some(value);
        }
    }
}

impl<T: Copy + PartialEq + std::fmt::Display> Knowledge<T> {
    fn reveal(&mut self, attribute: &'static str, revealed: Option<T>) -> Result<()> {
        match (self.value, revealed) {
            (None, None) => return Err(Error::Undetermined),
            (Some(existing), Some(revealed)) if existing != revealed => {
                return Err(Error::RevealConflict {
                    attribute,
                    existing: existing.to_string(),
                    revealed: revealed.to_string(),
                });
            }
            (_, Some(revealed)) => self.value = Some(revealed),
            (Some(_), None) => {}
        }
        self.known = true;
        Ok(())
    }
}

/// A card whose rank and color are each possibly undetermined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    rank: Knowledge<Rank>,
    color: Knowledge<Color>,
}

impl Card {
    /// Face-down card: nothing held, nothing known.
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            rank: Knowledge::unknown(),
            color: Knowledge::unknown(),
        }
    }

    /// Card with a concrete identity that its holder has not been told.
    #[must_use]
    pub const fn hidden(rank: Rank, color: Color) -> Self {
        Self {
            rank: Knowledge::hidden(rank),
            color: Knowledge::hidden(color),
        }
    }

    /// Fully determined card.
    #[must_use]
    pub const fn known(rank: Rank, color: Color) -> Self {
        Self {
            rank: Knowledge::known(rank),
            color: Knowledge::known(color),
        }
    }

    /// Card whose rank has been revealed, color still open.
    #[must_use]
    pub const fn rank_only(rank: Rank) -> Self {
        Self {
            rank: Knowledge::known(rank),
            color: Knowledge::unknown(),
        }
    }

    /// Card whose color has been revealed, rank still open.
    #[must_use]
    pub const fn color_only(color: Color) -> Self {
        Self {
            rank: Knowledge::unknown(),
            color: Knowledge::known(color),
        }
    }

    #[must_use]
    pub fn rank(&self) -> Option<Rank> {
        self.rank.value()
    }

    #[must_use]
    pub fn color(&self) -> Option<Color> {
        self.color.value()
    }

    #[must_use]
    pub fn rank_known(&self) -> bool {
        self.rank.is_known()
    }

    #[must_use]
    pub fn color_known(&self) -> bool {
        self.color.is_known()
    }

    /// Rank, only if revealed.
    #[must_use]
    pub fn known_rank(&self) -> Option<Rank> {
        self.rank.known_value()
    }

    /// Color, only if revealed.
    #[must_use]
    pub fn known_color(&self) -> Option<Color> {
        self.color.known_value()
    }

    /// Both attributes known.
    #[must_use]
    pub fn is_fully_determined(&self) -> bool {
        self.rank.is_known() && self.color.is_known()
    }

    /// Held (rank, color), whether known or hypothetical.
    #[must_use]
    pub fn identity(&self) -> Option<(Rank, Color)> {
        Some((self.rank.value()?, self.color.value()?))
    }

    /// Held (rank, color), failing with `Undetermined` if either is missing.
    pub fn require_identity(&self) -> Result<(Rank, Color)> {
        self.identity().ok_or(Error::Undetermined)
    }

    /// Mark the rank as known.
    ///
    /// With `Some(rank)` the value is set; it must agree with any value
    /// already held. With `None` the already-held value becomes known.
    pub fn reveal_rank(&mut self, rank: Option<Rank>) -> Result<()> {
        self.rank.reveal("rank", rank)
    }

    /// Mark the color as known. Same rules as [`Card::reveal_rank`].
    pub fn reveal_color(&mut self, color: Option<Color>) -> Result<()> {
        self.color.reveal("color", color)
    }

    /// Same (rank, color) as `other`, ignoring knowledge flags.
    #[must_use]
    pub fn same_identity(&self, other: &Card) -> bool {
        self.rank.value() == other.rank.value() && self.color.value() == other.color.value()
    }

    /// Overwrite the hypothetical attributes with a freshly drawn identity.
    pub(crate) fn resample(&mut self, rank: Rank, color: Color) {
        debug_assert!(self.known_rank().map_or(true, |r| r == rank));
        debug_assert!(self.known_color().map_or(true, |c| c == color));
        self.rank.resample(rank);
        self.color.resample(color);
    }
}

impl Default for Card {
    fn default() -> Self {
        Self::unknown()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.rank.value() {
            Some(rank) => write!(f, "{rank}")?,
            None => f.write_str("?")?,
        }
        match self.color.value() {
            Some(color) => write!(f, "{}", color.initial()),
            None => f.write_str("?"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank(value: u8) -> Rank {
        Rank::new(value).unwrap()
    }

    #[test]
    fn test_constructors() {
        let unknown = Card::unknown();
        assert_eq!(unknown.identity(), None);
        assert!(!unknown.rank_known() && !unknown.color_known());

        let hidden = Card::hidden(rank(3), Color::Red);
        assert_eq!(hidden.identity(), Some((rank(3), Color::Red)));
        assert!(!hidden.is_fully_determined());
        assert_eq!(hidden.known_rank(), None);

        let known = Card::known(rank(3), Color::Red);
        assert!(known.is_fully_determined());
        assert!(known.same_identity(&hidden));
        assert_ne!(known, hidden);
    }

    #[test]
    fn test_reveal_sets_value() {
        let mut card = Card::unknown();

        card.reveal_rank(Some(rank(2))).unwrap();
        assert_eq!(card.known_rank(), Some(rank(2)));
        assert!(!card.is_fully_determined());

        card.reveal_color(Some(Color::Blue)).unwrap();
        assert!(card.is_fully_determined());
        assert_eq!(card.to_string(), "2B");
    }

    #[test]
    fn test_reveal_is_idempotent_when_agreeing() {
        let mut card = Card::hidden(rank(4), Color::White);

        card.reveal_rank(Some(rank(4))).unwrap();
        card.reveal_rank(Some(rank(4))).unwrap();
        assert_eq!(card.known_rank(), Some(rank(4)));
    }

    #[test]
    fn test_reveal_conflict_is_rejected() {
        let mut card = Card::hidden(rank(4), Color::White);

        let err = card.reveal_color(Some(Color::Green)).unwrap_err();
        assert_eq!(
            err,
            Error::RevealConflict {
                attribute: "color",
                existing: "white".into(),
                revealed: "green".into(),
            }
        );
        assert!(!card.color_known());
        assert_eq!(card.color(), Some(Color::White));
    }

    #[test]
    fn test_reveal_held_value() {
        let mut card = Card::hidden(rank(1), Color::Yellow);
        card.reveal_color(None).unwrap();
        assert_eq!(card.known_color(), Some(Color::Yellow));

        let mut blank = Card::unknown();
        assert_eq!(blank.reveal_rank(None), Err(Error::Undetermined));
        assert!(!blank.rank_known());
    }

    #[test]
    fn test_resample_keeps_known_attributes() {
        let mut card = Card::rank_only(rank(3));
        card.resample(rank(3), Color::Green);

        assert_eq!(card.identity(), Some((rank(3), Color::Green)));
        assert!(card.rank_known());
        assert!(!card.color_known());

        card.resample(rank(3), Color::Red);
        assert_eq!(card.color(), Some(Color::Red));
    }

    #[test]
    fn test_display_partial() {
        assert_eq!(Card::unknown().to_string(), "??");
        assert_eq!(Card::color_only(Color::Blue).to_string(), "?B");
        assert_eq!(Card::rank_only(rank(5)).to_string(), "5?");
    }

    #[test]
    fn test_serialization() {
        let card = Card::rank_only(rank(2));
        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
