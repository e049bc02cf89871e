//! Grid merge editor.
//!
//! `MergeEditor` owns the grid model, the drag-selection tracker, the merge
//! registry and the generated output. It has no presentation dependency; the
//! browser widget and the CLI both drive it through the methods below.

mod grid;
mod registry;
mod tracker;

pub use grid::GridModel;
pub use registry::MergeRegistry;
pub use tracker::SelectionTracker;

use std::collections::HashSet;

use crate::codegen::{self, RevealToken, Tick, Typewriter};
use crate::config::EditorConfig;
use crate::error::{GridMergeError, Result};
use crate::export::{ExportFile, FileSink};
use crate::types::{CellClass, CellPosition, CellRect, GridCell, MergedRegion, Selection};

#[derive(Debug, Clone)]
pub struct MergeEditor {
    config: EditorConfig,
    grid: GridModel,
    tracker: SelectionTracker,
    registry: MergeRegistry,
    /// Last generated document; `None` until code is generated.
    output: Option<String>,
    typewriter: Typewriter,
}

impl MergeEditor {
    pub fn new(config: EditorConfig) -> Self {
        let grid = GridModel::new(config.grid_size);
        let typewriter = Typewriter::new(config.base_delay());
        Self {
            config,
            grid,
            tracker: SelectionTracker::new(),
            registry: MergeRegistry::new(),
            output: None,
            typewriter,
        }
    }

    /// Editor over an `n`×`n` grid with default settings.
    pub fn with_size(size: u32) -> Self {
        Self::new(EditorConfig {
            grid_size: size,
            ..EditorConfig::default()
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ---- Grid model ----

    pub fn size(&self) -> u32 {
        self.grid.size()
    }

    /// Rebuild the grid at size `n`, resetting merges, selection and output.
    ///
    /// Values below 1 are ignored; returns whether the size was applied.
    pub fn set_size(&mut self, n: i64) -> bool {
        if !self.grid.set_size(n) {
            tracing::debug!(requested = n, "grid size ignored");
            return false;
        }
        self.reset();
        self.clear_output();
        tracing::info!(size = self.grid.size(), "grid rebuilt");
        true
    }

    pub fn cells(&self) -> impl Iterator<Item = GridCell> {
        self.grid.cells()
    }

    // ---- Selection ----

    pub fn begin_selection(&mut self, row: u32, col: u32) {
        let pos = CellPosition::new(row, col);
        if !self.grid.contains(pos) {
            tracing::debug!(row, col, "selection start outside grid");
            return;
        }
        self.tracker.begin(pos);
    }

    pub fn extend_selection(&mut self, row: u32, col: u32) {
        let pos = CellPosition::new(row, col);
        if self.grid.contains(pos) {
            self.tracker.extend(pos);
        }
    }

    /// End the drag. Safe to call at any time, including when no drag is active.
    pub fn end_selection(&mut self) {
        self.tracker.end();
    }

    pub fn selection(&self) -> &Selection {
        self.tracker.selection()
    }

    pub fn is_dragging(&self) -> bool {
        self.tracker.is_dragging()
    }

    // ---- Merge registry ----

    /// Merge the current selection.
    ///
    /// An empty selection is a no-op and returns `Ok(None)`. On success the
    /// selection is cleared; on failure nothing changes.
    ///
    /// # Errors
    /// [`GridMergeError::NotRectangular`] or [`GridMergeError::Overlap`].
    pub fn commit_merge(&mut self) -> Result<Option<MergedRegion>> {
        if self.tracker.selection().is_empty() {
            tracing::debug!("merge requested with empty selection");
            return Ok(None);
        }
        let region = self.registry.commit(self.tracker.selection().cells())?;
        self.tracker.clear();
        Ok(region)
    }

    /// Select `rect` and merge it, as a drag from corner to corner would.
    ///
    /// # Errors
    /// [`GridMergeError::OutOfBounds`] if the rectangle leaves the grid, or
    /// any error from [`MergeEditor::commit_merge`].
    pub fn merge_range(&mut self, rect: CellRect) -> Result<MergedRegion> {
        let size = self.grid.size();
        for corner in [rect.top_left(), CellPosition::new(rect.end_row, rect.end_col)] {
            if !self.grid.contains(corner) {
                return Err(GridMergeError::OutOfBounds {
                    row: corner.row,
                    col: corner.col,
                    size,
                });
            }
        }
        self.tracker.begin(rect.top_left());
        self.tracker.extend(CellPosition::new(rect.end_row, rect.end_col));
        self.tracker.end();
        match self.commit_merge() {
            Ok(Some(region)) => Ok(region),
            // A non-empty rectangle always yields a region.
            Ok(None) => Err(GridMergeError::NotRectangular),
            Err(e) => {
                self.tracker.clear();
                Err(e)
            }
        }
    }

    /// Clear regions, occlusion and selection together.
    pub fn reset(&mut self) {
        self.registry.reset();
        self.tracker.clear();
        tracing::debug!("merge state reset");
    }

    pub fn regions(&self) -> &[MergedRegion] {
        self.registry.regions()
    }

    pub fn occluded(&self) -> &HashSet<CellPosition> {
        self.registry.occluded()
    }

    pub fn registry(&self) -> &MergeRegistry {
        &self.registry
    }

    pub fn classify(&self, row: u32, col: u32) -> CellClass {
        let pos = CellPosition::new(row, col);
        let selected = self.tracker.selection().contains(pos);
        self.registry.classify(pos, selected)
    }

    pub fn is_visible(&self, row: u32, col: u32) -> bool {
        self.registry.is_visible(CellPosition::new(row, col))
    }

    // ---- Code generation ----

    /// Regenerate the document from the current state without revealing it.
    pub fn render_code(&self) -> String {
        codegen::generate(
            self.grid.size(),
            self.registry.regions(),
            self.registry.occluded(),
        )
    }

    /// Regenerate the document and start revealing it.
    ///
    /// Any reveal still in flight is cancelled.
    pub fn generate_code(&mut self) -> RevealToken {
        let html = self.render_code();
        tracing::info!(
            size = self.grid.size(),
            regions = self.registry.regions().len(),
            bytes = html.len(),
            "code generated"
        );
        let token = self.typewriter.start(html.as_str());
        self.output = Some(html);
        token
    }

    /// Advance the reveal started by `token` by one character.
    pub fn reveal_step(&mut self, token: RevealToken) -> Option<Tick> {
        self.typewriter.step(token)
    }

    /// Show the whole generated document immediately.
    pub fn finish_reveal(&mut self) {
        self.typewriter.finish();
    }

    pub fn generated_code(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn displayed_code(&self) -> &str {
        self.typewriter.displayed()
    }

    pub fn is_typing(&self) -> bool {
        self.typewriter.is_typing()
    }

    fn clear_output(&mut self) {
        self.output = None;
        self.typewriter.clear();
    }

    // ---- Export ----

    /// The generated document as a named file.
    ///
    /// # Errors
    /// [`GridMergeError::NothingGenerated`] before the first generation.
    pub fn export_file(&self) -> Result<ExportFile<'_>> {
        let contents = self
            .output
            .as_deref()
            .ok_or(GridMergeError::NothingGenerated)?;
        Ok(ExportFile::html(&self.config.file_name, contents))
    }

    /// Hand the generated document to `sink`.
    ///
    /// # Errors
    /// [`GridMergeError::NothingGenerated`] or whatever the sink reports.
    pub fn export_as_file(&self, sink: &mut dyn FileSink) -> Result<()> {
        let file = self.export_file()?;
        sink.save(&file)
    }
}

impl Default for MergeEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
