//! Merge registry: committed regions and the cells they occlude.

use std::collections::{HashMap, HashSet};

use crate::error::{GridMergeError, Result};
use crate::types::{CellClass, CellKind, CellPosition, CellRect, MergedRegion};

/// Committed merge regions plus the derived occlusion set.
///
/// `occluded` holds every non-anchor cell of every region exactly once and
/// `anchors` maps each anchor cell to its index in `regions`. Both are only
/// written by [`MergeRegistry::commit`] and [`MergeRegistry::reset`].
#[derive(Debug, Clone, Default)]
pub struct MergeRegistry {
    regions: Vec<MergedRegion>,
    occluded: HashSet<CellPosition>,
    anchors: HashMap<CellPosition, usize>,
}

impl MergeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `selection` and record it as a merged region.
    ///
    /// Returns `Ok(None)` for an empty selection. On error the registry is
    /// left untouched.
    ///
    /// # Errors
    /// - [`GridMergeError::NotRectangular`] if the distinct cells do not fill
    ///   their bounding rectangle
    /// - [`GridMergeError::Overlap`] if any cell of that rectangle is already
    ///   an anchor or occluded
    pub fn commit(&mut self, selection: &[CellPosition]) -> Result<Option<MergedRegion>> {
        let Some(rect) = CellRect::bounding(selection) else {
            return Ok(None);
        };

        let distinct: HashSet<&CellPosition> = selection.iter().collect();
        let distinct_count = u64::try_from(distinct.len()).unwrap_or(u64::MAX);
        if distinct.len() != selection.len() || distinct_count != rect.cell_count() {
            tracing::debug!(
                cells = selection.len(),
                expected = rect.cell_count(),
                "merge rejected: not rectangular"
            );
            return Err(GridMergeError::NotRectangular);
        }

        if let Some(conflict) = rect.cells().find(|pos| self.is_covered(*pos)) {
            tracing::debug!(row = conflict.row, col = conflict.col, "merge rejected: overlap");
            return Err(GridMergeError::Overlap {
                row: conflict.row,
                col: conflict.col,
            });
        }

        let region = MergedRegion::from_rect(rect);
        self.anchors.insert(region.anchor(), self.regions.len());
        self.occluded.extend(region.occluded_cells());
        self.regions.push(region);

        tracing::info!(
            start_row = region.start_row,
            start_col = region.start_col,
            row_span = region.row_span,
            col_span = region.col_span,
            "merge committed"
        );
        Ok(Some(region))
    }

    /// Drop every region and occluded cell.
    pub fn reset(&mut self) {
        self.regions.clear();
        self.occluded.clear();
        self.anchors.clear();
    }

    pub fn regions(&self) -> &[MergedRegion] {
        &self.regions
    }

    pub fn occluded(&self) -> &HashSet<CellPosition> {
        &self.occluded
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn is_occluded(&self, pos: CellPosition) -> bool {
        self.occluded.contains(&pos)
    }

    /// True iff the cell is rendered (not hidden under another cell's span).
    pub fn is_visible(&self, pos: CellPosition) -> bool {
        !self.is_occluded(pos)
    }

    /// The region anchored at `pos`, if any.
    pub fn anchor_at(&self, pos: CellPosition) -> Option<&MergedRegion> {
        self.anchors.get(&pos).and_then(|&idx| self.regions.get(idx))
    }

    /// True when `pos` already belongs to some region, anchor included.
    pub fn is_covered(&self, pos: CellPosition) -> bool {
        self.is_occluded(pos) || self.anchors.contains_key(&pos)
    }

    /// Display classification. Occlusion wins over everything, including the
    /// selection overlay.
    pub fn classify(&self, pos: CellPosition, selected: bool) -> CellClass {
        if self.is_occluded(pos) {
            return CellClass {
                kind: CellKind::Occluded,
                selected: false,
            };
        }
        let kind = if self.anchors.contains_key(&pos) {
            CellKind::Merged
        } else {
            CellKind::Plain
        };
        CellClass { kind, selected }
    }
}
