//! Drag-selection tracking.
//!
//! The selection is recomputed wholesale from the anchor and the pointer's
//! current cell on every update, so it can never go stale or partial.

use crate::types::{CellPosition, CellRect, Selection};

#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    anchor: Option<CellPosition>,
    dragging: bool,
    selection: Selection,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new drag at `pos`, discarding any prior selection.
    pub fn begin(&mut self, pos: CellPosition) {
        self.anchor = Some(pos);
        self.dragging = true;
        self.selection = Selection::from_rect(CellRect::single(pos));
    }

    /// Replace the selection with the rectangle between the anchor and `pos`.
    ///
    /// Returns `false` without changing anything when no drag is active.
    pub fn extend(&mut self, pos: CellPosition) -> bool {
        let Some(anchor) = self.anchor.filter(|_| self.dragging) else {
            return false;
        };
        self.selection = Selection::from_rect(CellRect::from_corners(anchor, pos));
        true
    }

    /// Leave dragging state. The selection stays for a following merge.
    pub fn end(&mut self) {
        self.dragging = false;
    }

    pub fn clear(&mut self) {
        self.anchor = None;
        self.dragging = false;
        self.selection.clear();
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn anchor(&self) -> Option<CellPosition> {
        self.anchor
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }
}
