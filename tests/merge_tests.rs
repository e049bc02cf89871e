//! Merge registry behavior through the editor API.
//!
//! Covers the drag → merge → reset cycle, overlap rejection, and the
//! bookkeeping of occluded cells.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

mod common;

use std::collections::HashSet;

use common::{drag, pos, rect};
use gridmerge::{CellKind, GridMergeError, MergeEditor, MergedRegion};

// ============================================================================
// BASIC MERGE TESTS
// ============================================================================

/// 2x2 merge in the top-left corner of a 3x3 grid.
#[test]
fn test_merge_2x2_top_left() {
    let mut editor = MergeEditor::with_size(3);
    drag(&mut editor, (0, 0), (1, 1));
    let region = editor.commit_merge().unwrap().unwrap();

    assert_eq!(
        region,
        MergedRegion {
            start_row: 0,
            start_col: 0,
            end_row: 1,
            end_col: 1,
            row_span: 2,
            col_span: 2,
        }
    );
    assert_eq!(editor.regions(), &[region]);

    let expected: HashSet<_> = [pos(0, 1), pos(1, 0), pos(1, 1)].into_iter().collect();
    assert_eq!(editor.occluded(), &expected);
}

/// Overlapping an occluded cell of an earlier merge is rejected.
#[test]
fn test_overlap_rejected_and_state_unchanged() {
    let mut editor = MergeEditor::with_size(3);
    drag(&mut editor, (0, 0), (1, 1));
    editor.commit_merge().unwrap();

    drag(&mut editor, (1, 1), (2, 2));
    let err = editor.commit_merge().unwrap_err();
    assert!(matches!(err, GridMergeError::Overlap { row: 1, col: 1 }));
    assert_eq!(err.to_string(), "selection overlaps existing merge");
    assert_eq!(editor.regions().len(), 1);
    assert_eq!(editor.occluded().len(), 3);
}

/// A drag started at the bottom-right still anchors the region top-left.
#[test]
fn test_reverse_drag_anchors_top_left() {
    let mut editor = MergeEditor::with_size(4);
    drag(&mut editor, (3, 2), (1, 0));
    let region = editor.commit_merge().unwrap().unwrap();
    assert_eq!((region.start_row, region.start_col), (1, 0));
    assert_eq!((region.end_row, region.end_col), (3, 2));
    assert_eq!((region.row_span, region.col_span), (3, 3));
    assert_eq!(editor.classify(1, 0).kind, CellKind::Merged);
    assert_eq!(editor.classify(3, 2).kind, CellKind::Occluded);
}

/// A new selection that covers only an existing anchor is also rejected.
#[test]
fn test_selection_covering_only_anchor_is_rejected() {
    let mut editor = MergeEditor::with_size(4);
    editor.merge_range(rect(1, 1, 2, 2)).unwrap();
    let err = editor.merge_range(rect(0, 0, 1, 1)).unwrap_err();
    assert!(matches!(err, GridMergeError::Overlap { row: 1, col: 1 }));
    assert_eq!(editor.regions().len(), 1);
}

/// Adjacent merges that touch edges but share no cells are fine.
#[test]
fn test_adjacent_merges() {
    let mut editor = MergeEditor::with_size(4);
    editor.merge_range(rect(0, 0, 1, 1)).unwrap();
    editor.merge_range(rect(0, 2, 1, 3)).unwrap();
    editor.merge_range(rect(2, 0, 3, 3)).unwrap();
    assert_eq!(editor.regions().len(), 3);
    assert_eq!(editor.occluded().len(), 16 - 3);
}

/// Committing with nothing selected is a silent no-op.
#[test]
fn test_empty_commit() {
    let mut editor = MergeEditor::with_size(3);
    assert_eq!(editor.commit_merge().unwrap(), None);
    assert!(editor.regions().is_empty());
}

// ============================================================================
// OCCLUSION TESTS
// ============================================================================

/// Every merge adds exactly rows*cols - 1 occluded cells inside its bounds.
#[test]
fn test_occlusion_count_per_merge() {
    let mut editor = MergeEditor::with_size(6);
    for (r0, c0, r1, c1) in [(0, 0, 0, 5), (1, 0, 4, 1), (1, 2, 5, 5)] {
        let before: HashSet<_> = editor.occluded().clone();
        let region = editor.merge_range(rect(r0, c0, r1, c1)).unwrap();
        let added: Vec<_> = editor.occluded().difference(&before).copied().collect();

        let expected = usize::try_from(region.row_span * region.col_span).unwrap() - 1;
        assert_eq!(added.len(), expected);
        assert!(added.iter().all(|p| region.rect().contains(*p)));
        assert!(!added.contains(&region.anchor()));
    }
}

/// Occluded cells are hidden; everything else stays visible.
#[test]
fn test_visibility() {
    let mut editor = MergeEditor::with_size(3);
    editor.merge_range(rect(1, 0, 2, 0)).unwrap();
    assert!(editor.is_visible(1, 0));
    assert!(!editor.is_visible(2, 0));
    assert!(editor.is_visible(2, 1));
}

// ============================================================================
// RESET TESTS
// ============================================================================

/// Reset empties regions, occlusion, and selection together.
#[test]
fn test_reset_clears_all_state() {
    let mut editor = MergeEditor::with_size(5);
    editor.merge_range(rect(0, 0, 1, 1)).unwrap();
    editor.merge_range(rect(3, 3, 4, 4)).unwrap();
    drag(&mut editor, (2, 0), (2, 4));

    editor.reset();

    assert!(editor.regions().is_empty());
    assert!(editor.occluded().is_empty());
    assert!(editor.selection().is_empty());
    assert!(!editor.is_dragging());
    assert!((0..5).all(|r| (0..5).all(|c| editor.classify(r, c).kind == CellKind::Plain)));
}

/// After reset the same area can be merged again.
#[test]
fn test_merge_after_reset() {
    let mut editor = MergeEditor::with_size(3);
    editor.merge_range(rect(0, 0, 2, 2)).unwrap();
    editor.reset();
    editor.merge_range(rect(1, 1, 2, 2)).unwrap();
    assert_eq!(editor.regions().len(), 1);
}

/// Resizing the grid rebuilds it from scratch.
#[test]
fn test_resize_discards_merges() {
    let mut editor = MergeEditor::with_size(3);
    editor.merge_range(rect(0, 0, 1, 1)).unwrap();
    assert!(editor.set_size(2));
    assert!(editor.regions().is_empty());
    assert_eq!(editor.cells().count(), 4);
}
