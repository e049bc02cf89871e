//! gridmerge - merge table cells on a grid and emit HTML markup
//!
//! Drag across an N×N grid to select a rectangle, merge it, and generate a
//! static HTML document whose `<table>` reproduces the merges with
//! `colspan`/`rowspan`:
//! - Rectangular drag selection that is recomputed wholesale on every move
//! - Merge validation (rectangularity, no overlap with existing merges)
//! - Deterministic code generation with a typewriter-style reveal
//! - Browser widget (WebAssembly) and a native CLI over the same core
//!
//! # Usage (Rust)
//!
//! ```
//! use gridmerge::MergeEditor;
//!
//! let mut editor = MergeEditor::with_size(3);
//! editor.begin_selection(0, 0);
//! editor.extend_selection(1, 1);
//! editor.end_selection();
//! editor.commit_merge().expect("rectangular, no overlap");
//! let html = editor.render_code();
//! assert!(html.contains(r#"<td colspan="2" rowspan="2">"#));
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridMergeWidget } from 'gridmerge';
//! await init();
//! const widget = new GridMergeWidget(container, codeBlock, { gridSize: 4 });
//! mergeButton.onclick = () => widget.merge();
//! ```

pub mod cell_ref;
pub mod codegen;
pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod widget;

use wasm_bindgen::prelude::*;

pub use config::EditorConfig;
pub use editor::MergeEditor;
pub use error::{GridMergeError, Result};
#[cfg(target_arch = "wasm32")]
pub use widget::GridMergeWidget;

pub use types::*;

/// Generate the HTML document for a `size`×`size` grid from a JSON array of
/// merge ranges in A1 notation (e.g. `["A1:B2", "C3:C4"]`).
///
/// # Errors
/// Returns an error if `size` is zero, the JSON is malformed, or a range is
/// invalid, out of bounds or overlaps an earlier one.
#[wasm_bindgen]
pub fn generate_table(size: u32, ranges_json: &str) -> std::result::Result<String, JsValue> {
    generate_from_ranges(size, ranges_json).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Native counterpart of [`generate_table`].
///
/// # Errors
/// See [`generate_table`].
pub fn generate_from_ranges(size: u32, ranges_json: &str) -> Result<String> {
    if size == 0 {
        return Err(GridMergeError::InvalidSize(size.to_string()));
    }
    let ranges: Vec<String> = serde_json::from_str(ranges_json)?;
    let mut editor = MergeEditor::with_size(size);
    for range in &ranges {
        editor.merge_range(cell_ref::parse_cell_range(range)?)?;
    }
    Ok(editor.render_code())
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
