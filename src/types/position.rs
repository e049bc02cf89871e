use serde::{Deserialize, Serialize};

/// A single grid cell address (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPosition {
    pub row: u32,
    pub col: u32,
}

impl CellPosition {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl From<(u32, u32)> for CellPosition {
    fn from((row, col): (u32, u32)) -> Self {
        Self { row, col }
    }
}

/// Inclusive, normalized cell rectangle.
///
/// `start_row <= end_row` and `start_col <= end_col` always hold; use
/// [`CellRect::from_corners`] to build one from two arbitrary drag endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRect {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

impl CellRect {
    /// Rectangle spanning two corners in any order.
    pub fn from_corners(a: CellPosition, b: CellPosition) -> Self {
        Self {
            start_row: a.row.min(b.row),
            start_col: a.col.min(b.col),
            end_row: a.row.max(b.row),
            end_col: a.col.max(b.col),
        }
    }

    /// Single-cell rectangle.
    pub fn single(pos: CellPosition) -> Self {
        Self::from_corners(pos, pos)
    }

    /// Bounding rectangle of a set of positions, `None` when empty.
    pub fn bounding<'a, I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a CellPosition>,
    {
        let mut iter = positions.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(Self::single(first), |rect, pos| Self {
            start_row: rect.start_row.min(pos.row),
            start_col: rect.start_col.min(pos.col),
            end_row: rect.end_row.max(pos.row),
            end_col: rect.end_col.max(pos.col),
        }))
    }

    pub fn top_left(&self) -> CellPosition {
        CellPosition::new(self.start_row, self.start_col)
    }

    pub fn row_span(&self) -> u32 {
        self.end_row - self.start_row + 1
    }

    pub fn col_span(&self) -> u32 {
        self.end_col - self.start_col + 1
    }

    /// Number of cells covered. Widened so a full-range rectangle cannot overflow.
    pub fn cell_count(&self) -> u64 {
        u64::from(self.row_span()) * u64::from(self.col_span())
    }

    pub fn contains(&self, pos: CellPosition) -> bool {
        pos.row >= self.start_row
            && pos.row <= self.end_row
            && pos.col >= self.start_col
            && pos.col <= self.end_col
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellPosition> {
        let (start_col, end_col) = (self.start_col, self.end_col);
        (self.start_row..=self.end_row)
            .flat_map(move |row| (start_col..=end_col).map(move |col| CellPosition::new(row, col)))
    }
}

/// One enumerable cell of the grid model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
    /// Stable identifier, also used as the DOM id in the browser widget.
    pub id: String,
}

impl GridCell {
    pub fn new(row: u32, col: u32) -> Self {
        Self {
            row,
            col,
            id: format!("cell-{row}-{col}"),
        }
    }

    pub fn position(&self) -> CellPosition {
        CellPosition::new(self.row, self.col)
    }
}
