use serde::{Deserialize, Serialize};

use super::{CellPosition, CellRect};

/// A committed rectangular merge, anchored at its top-left cell.
///
/// Regions are immutable once created; the registry only ever appends them
/// or clears all of them together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedRegion {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
    pub row_span: u32,
    pub col_span: u32,
}

impl MergedRegion {
    pub fn from_rect(rect: CellRect) -> Self {
        Self {
            start_row: rect.start_row,
            start_col: rect.start_col,
            end_row: rect.end_row,
            end_col: rect.end_col,
            row_span: rect.row_span(),
            col_span: rect.col_span(),
        }
    }

    pub fn anchor(&self) -> CellPosition {
        CellPosition::new(self.start_row, self.start_col)
    }

    pub fn rect(&self) -> CellRect {
        CellRect {
            start_row: self.start_row,
            start_col: self.start_col,
            end_row: self.end_row,
            end_col: self.end_col,
        }
    }

    /// Covered cells other than the anchor, row-major.
    pub fn occluded_cells(&self) -> impl Iterator<Item = CellPosition> {
        let anchor = self.anchor();
        self.rect().cells().filter(move |pos| *pos != anchor)
    }
}

/// How a cell is displayed, derived from the registry and the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CellKind {
    /// Ordinary visible cell
    #[default]
    Plain,
    /// Top-left anchor of a merged region
    Merged,
    /// Covered by another cell's span; not rendered
    Occluded,
}

/// Display classification: a kind plus an independent selection overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellClass {
    pub kind: CellKind,
    pub selected: bool,
}

impl CellClass {
    /// Space-separated CSS class list for the widget.
    pub fn css_classes(&self) -> &'static str {
        match (self.kind, self.selected) {
            (CellKind::Occluded, _) => "gm-cell gm-occluded",
            (CellKind::Merged, true) => "gm-cell gm-merged gm-selected",
            (CellKind::Merged, false) => "gm-cell gm-merged",
            (CellKind::Plain, true) => "gm-cell gm-selected",
            (CellKind::Plain, false) => "gm-cell",
        }
    }
}
