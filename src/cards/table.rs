//! Fixed 5x5 rank-by-color count table.
//!
//! Backs both the card supply and the discard pile. Stored as a flat array
//! indexed `rank.index() * COLOR_COUNT + color.index()` so copies are plain
//! memcpy and no numeric crate is needed.

use serde::{Deserialize, Serialize};

use super::{Color, Rank, COLOR_COUNT, RANK_COUNT};

const CELLS: usize = RANK_COUNT * COLOR_COUNT;

/// Remaining copies per (rank, color) cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountTable {
    cells: [u8; CELLS],
}

impl CountTable {
    /// Table with every cell at zero.
    #[must_use]
    pub const fn empty() -> Self {
        Self { cells: [0; CELLS] }
    }

    /// Table where every color holds `quantities[rank - 1]` copies of each rank.
    #[must_use]
    pub fn full(quantities: &[u8; RANK_COUNT]) -> Self {
        let mut table = Self::empty();
        for rank in Rank::ALL {
            for color in Color::ALL {
                table.cells[Self::offset(rank, color)] = quantities[rank.index()];
            }
        }
        table
    }

    #[inline]
    const fn offset(rank: Rank, color: Color) -> usize {
        rank.index() * COLOR_COUNT + color.index()
    }

    /// (rank, color) for a flat cell index.
    #[must_use]
    pub fn cell_at(index: usize) -> Option<(Rank, Color)> {
        if index >= CELLS {
            return None;
        }
        Some((
            Rank::from_index(index / COLOR_COUNT)?,
            Color::from_index(index % COLOR_COUNT)?,
        ))
    }

    /// Count in one cell.
    #[inline]
    #[must_use]
    pub fn get(&self, rank: Rank, color: Color) -> u8 {
        self.cells[Self::offset(rank, color)]
    }

    /// All cells, row-major.
    #[must_use]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Counts for one rank across colors.
    #[must_use]
    pub fn row(&self, rank: Rank) -> [u8; COLOR_COUNT] {
        let start = rank.index() * COLOR_COUNT;
        let mut row = [0; COLOR_COUNT];
        row.copy_from_slice(&self.cells[start..start + COLOR_COUNT]);
        row
    }

    /// Counts for one color across ranks.
    #[must_use]
    pub fn column(&self, color: Color) -> [u8; RANK_COUNT] {
        Rank::ALL.map(|rank| self.get(rank, color))
    }

    /// Copies of one rank, all colors.
    #[must_use]
    pub fn row_sum(&self, rank: Rank) -> u32 {
        self.row(rank).iter().map(|&c| u32::from(c)).sum()
    }

    /// Copies of one color, all ranks.
    #[must_use]
    pub fn col_sum(&self, color: Color) -> u32 {
        self.column(color).iter().map(|&c| u32::from(c)).sum()
    }

    /// Total copies in the table.
    #[must_use]
    pub fn total(&self) -> usize {
        self.cells.iter().map(|&c| c as usize).sum()
    }

    /// True if no copies remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }

    /// Remove one copy. Returns `false` (and leaves the cell alone) if it was empty.
    pub fn decrement(&mut self, rank: Rank, color: Color) -> bool {
        let cell = &mut self.cells[Self::offset(rank, color)];
        if *cell == 0 {
            return false;
        }
        *cell -= 1;
        true
    }

    /// Add one copy unless the cell is already at `ceiling`.
    pub fn increment(&mut self, rank: Rank, color: Color, ceiling: u8) -> bool {
        let cell = &mut self.cells[Self::offset(rank, color)];
        if *cell >= ceiling {
            return false;
        }
        *cell += 1;
        true
    }

    /// Zero every cell of one rank.
    pub fn zero_row(&mut self, rank: Rank) {
        let start = rank.index() * COLOR_COUNT;
        self.cells[start..start + COLOR_COUNT].fill(0);
    }

    /// Zero every cell of one color.
    pub fn zero_col(&mut self, color: Color) {
        for rank in Rank::ALL {
            self.cells[Self::offset(rank, color)] = 0;
        }
    }
}

impl Default for CountTable {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Display for CountTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "r y g b w")?;
        for rank in Rank::ALL {
            let row = self.row(rank);
            let line: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
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
    fn test_full_table() {
        let table = CountTable::full(&CARD_QUANTITIES);

        assert_eq!(table.total(), 50);
        assert_eq!(table.row_sum(rank(1)), 15);
        assert_eq!(table.row_sum(rank(5)), 5);
        assert_eq!(table.col_sum(Color::Blue), 10);
        assert_eq!(table.column(Color::Red), [3, 2, 2, 2, 1]);
    }

    #[test]
    fn test_decrement_stops_at_zero() {
        let mut table = CountTable::full(&CARD_QUANTITIES);

        assert!(table.decrement(rank(5), Color::Red));
        assert!(!table.decrement(rank(5), Color::Red));
        assert_eq!(table.get(rank(5), Color::Red), 0);
        assert_eq!(table.total(), 49);
    }

    #[test]
    fn test_increment_respects_ceiling() {
        let mut table = CountTable::empty();

        assert!(table.increment(rank(2), Color::Green, 2));
        assert!(table.increment(rank(2), Color::Green, 2));
        assert!(!table.increment(rank(2), Color::Green, 2));
        assert_eq!(table.get(rank(2), Color::Green), 2);
    }

    #[test]
    fn test_zero_row_and_column() {
        let mut table = CountTable::full(&CARD_QUANTITIES);

        table.zero_row(rank(1));
        assert_eq!(table.row_sum(rank(1)), 0);
        assert_eq!(table.col_sum(Color::Yellow), 7);

        table.zero_col(Color::Yellow);
        assert_eq!(table.col_sum(Color::Yellow), 0);
        assert_eq!(table.total(), 50 - 15 - 7);
    }

    #[test]
    fn test_cell_at_matches_layout() {
        assert_eq!(CountTable::cell_at(0), Some((rank(1), Color::Red)));
        assert_eq!(CountTable::cell_at(7), Some((rank(2), Color::Green)));
        assert_eq!(CountTable::cell_at(24), Some((rank(5), Color::White)));
        assert_eq!(CountTable::cell_at(25), None);
    }

    #[test]
    fn test_display() {
        let table = CountTable::full(&CARD_QUANTITIES);
        let rendered = table.to_string();
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines[0], "r y g b w");
        assert_eq!(lines[1], "3 3 3 3 3");
        assert_eq!(lines[5], "1 1 1 1 1");
    }
}
