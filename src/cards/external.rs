//! Comparison against engine-side card objects.
//!
//! The engine hands cards and moves around as JSON objects. Cards carry a
//! `rank` field, played/discarded move payloads carry `value` instead, and
//! both carry a lowercase `color` name. Anything else is a shape mismatch
//! and is reported as an error instead of comparing unequal.

use serde_json::Value;

use super::{Card, Color, Rank};
use crate::core::{Error, Result};

/// Resolve an engine object into (rank, color).
pub fn parse_external(other: &Value) -> Result<(Rank, Color)> {
    let object = other
        .as_object()
        .ok_or_else(|| Error::TypeMismatch(format!("expected a card object, got {other}")))?;

    let rank_field = object
        .get("rank")
        .or_else(|| object.get("value"))
        .ok_or_else(|| Error::TypeMismatch(format!("object {other} has neither rank nor value")))?;
    let rank = rank_field
        .as_u64()
        .and_then(|v| u8::try_from(v).ok())
        .ok_or_else(|| Error::TypeMismatch(format!("rank {rank_field} is not a small integer")))?;
    let rank = Rank::new(rank).map_err(|_| Error::TypeMismatch(format!("rank {rank} out of range")))?;

    let color = object
        .get("color")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::TypeMismatch(format!("object {other} has no color name")))?
        .parse::<Color>()?;

    Ok((rank, color))
}

impl Card {
    /// Compare this card's held identity with an engine card or move object.
    ///
    /// Knowledge flags are ignored. A card with no held identity never matches.
    pub fn matches_external(&self, other: &Value) -> Result<bool> {
        let (rank, color) = parse_external(other)?;
        Ok(self.rank() == Some(rank) && self.color() == Some(color))
    }
}
