use serde::Serialize;

use super::{CellPosition, CellRect};

/// Current drag selection: an ordered, row-major list of cells.
///
/// Built only from a [`CellRect`] (or empty), so it is always rectangular.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    cells: Vec<CellPosition>,
}

impl Selection {
    /// Every cell of `rect`, row-major.
    pub fn from_rect(rect: CellRect) -> Self {
        Self {
            cells: rect.cells().collect(),
        }
    }

    pub fn cells(&self) -> &[CellPosition] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: CellPosition) -> bool {
        // Row-major order lets the bounds answer without scanning.
        self.bounds().is_some_and(|rect| rect.contains(pos))
    }

    /// Get normalized bounds (min/max)
    pub fn bounds(&self) -> Option<CellRect> {
        match (self.cells.first(), self.cells.last()) {
            (Some(first), Some(last)) => Some(CellRect::from_corners(*first, *last)),
            _ => None,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.cells.clear();
    }
}
