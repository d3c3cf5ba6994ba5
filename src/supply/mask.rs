//! Reservation masking for constrained redraws.
//!
//! A row (rank) whose remaining copies are all spoken for by rank-only
//! reservations must not feed an unconstrained draw; likewise for columns and
//! color-only reservations. Zeroing a row changes column totals and vice
//! versa, so rows and columns are masked alternately until nothing changes.

use tracing::{debug, warn};

use crate::cards::{Color, CountTable, Rank, COLOR_COUNT, RANK_COUNT};
use crate::core::{Error, Result};

/// Mask out rows/columns needed to satisfy reservations.
///
/// `rank_reservations` is `None` when the draw already fixes a rank (the row
/// pass is skipped); `color_reservations` likewise. Fails with
/// `Error::Convergence` after `max_passes` changing passes.
pub(crate) fn mask_reserved(
    table: &CountTable,
    rank_reservations: Option<&[u8; RANK_COUNT]>,
    color_reservations: Option<&[u8; COLOR_COUNT]>,
    max_passes: usize,
) -> Result<CountTable> {
    let mut masked = *table;
    let mut passes = 0;

    loop {
        let mut changed = false;

        if let Some(reserved) = rank_reservations {
            for rank in Rank::ALL {
                let sum = masked.row_sum(rank);
                if sum > 0 && sum <= u32::from(reserved[rank.index()]) {
                    debug!(%rank, sum, reserved = reserved[rank.index()], "masking reserved rank");
                    masked.zero_row(rank);
                    changed = true;
                }
            }
        }

        if let Some(reserved) = color_reservations {
            for color in Color::ALL {
                let sum = masked.col_sum(color);
                if sum > 0 && sum <= u32::from(reserved[color.index()]) {
                    debug!(%color, sum, reserved = reserved[color.index()], "masking reserved color");
                    masked.zero_col(color);
                    changed = true;
                }
            }
        }

        if !changed {
            return Ok(masked);
        }

        passes += 1;
        if passes > max_passes {
            warn!(passes, table = %masked, "reservation masking did not converge");
            return Err(Error::Convergence {
                passes,
                table: masked,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CARD_QUANTITIES;

    fn rank(value: u8) -> Rank {
        Rank::new(value).unwrap()
    }

    #[test]
    fn test_no_reservations_is_identity() {
        let table = CountTable::full(&CARD_QUANTITIES);
        let masked = mask_reserved(&table, Some(&[0; 5]), Some(&[0; 5]), 100).unwrap();
        assert_eq!(masked, table);
    }

    #[test]
    fn test_exhausted_row_is_masked() {
        let mut table = CountTable::full(&CARD_QUANTITIES);
        // Leave a single 5 (the red one) in the table.
        for color in [Color::Yellow, Color::Green, Color::Blue, Color::White] {
            table.decrement(rank(5), color);
        }

        let masked = mask_reserved(&table, Some(&[0, 0, 0, 0, 1]), None, 100).unwrap();

        assert_eq!(masked.row_sum(rank(5)), 0);
        assert_eq!(masked.total(), table.total() - 1);
    }

    #[test]
    fn test_row_not_masked_when_copies_to_spare() {
        let table = CountTable::full(&CARD_QUANTITIES);
        let masked = mask_reserved(&table, Some(&[0, 0, 0, 0, 4]), None, 100).unwrap();
        assert_eq!(masked.row_sum(rank(5)), 5);
    }

    #[test]
    fn test_row_masking_cascades_into_column() {
        // Only red cards left: 1R x1 and 5R x1. A rank-5 reservation claims
        // the 5R, after which red holds a single card claimed by a red
        // reservation.
        let mut table = CountTable::empty();
        table.increment(rank(1), Color::Red, 3);
        table.increment(rank(5), Color::Red, 1);

        let masked = mask_reserved(&table, Some(&[0, 0, 0, 0, 1]), Some(&[1, 0, 0, 0, 0]), 100).unwrap();

        assert!(masked.is_empty());
    }

    #[test]
    fn test_pass_limit_is_enforced() {
        let mut table = CountTable::empty();
        table.increment(rank(1), Color::Red, 3);
        table.increment(rank(5), Color::Red, 1);

        let err = mask_reserved(&table, Some(&[0, 0, 0, 0, 1]), Some(&[1, 0, 0, 0, 0]), 0).unwrap_err();

        assert!(matches!(err, Error::Convergence { passes: 1, .. }));
    }
}
