//! Grid model: the N×N set of addressable cells.

use crate::types::{CellPosition, GridCell};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridModel {
    size: u32,
}

impl GridModel {
    /// Sizes below 1 are raised to 1.
    pub fn new(size: u32) -> Self {
        Self { size: size.max(1) }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Apply a new size. Returns `false` (and keeps the old size) when `n < 1`
    /// or `n` does not fit the coordinate type.
    pub fn set_size(&mut self, n: i64) -> bool {
        match u32::try_from(n) {
            Ok(size) if size >= 1 => {
                self.size = size;
                true
            }
            _ => false,
        }
    }

    pub fn contains(&self, pos: CellPosition) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Row-major cells, derived from the current size on every call.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| GridCell::new(row, col)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_are_row_major() {
        let grid = GridModel::new(2);
        let ids: Vec<String> = grid.cells().map(|c| c.id).collect();
        assert_eq!(ids, ["cell-0-0", "cell-0-1", "cell-1-0", "cell-1-1"]);
        let last = grid.cells().last().unwrap();
        assert_eq!(last.position(), CellPosition::new(1, 1));
    }

    #[test]
    fn test_invalid_sizes_are_ignored() {
        let mut grid = GridModel::new(4);
        assert!(!grid.set_size(0));
        assert!(!grid.set_size(-3));
        assert!(!grid.set_size(i64::from(u32::MAX) + 1));
        assert_eq!(grid.size(), 4);
        assert!(grid.set_size(6));
        assert_eq!(grid.cells().count(), 36);
    }

    #[test]
    fn test_new_clamps_zero() {
        assert_eq!(GridModel::new(0).size(), 1);
    }

    #[test]
    fn test_contains() {
        let grid = GridModel::new(3);
        assert!(grid.contains(CellPosition::new(2, 2)));
        assert!(!grid.contains(CellPosition::new(3, 0)));
    }
}
