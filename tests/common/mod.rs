//! Common test utilities for driving the editor.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]

use gridmerge::{CellPosition, CellRect, MergeEditor};

pub fn pos(row: u32, col: u32) -> CellPosition {
    CellPosition::new(row, col)
}

pub fn rect(r0: u32, c0: u32, r1: u32, c1: u32) -> CellRect {
    CellRect::from_corners(pos(r0, c0), pos(r1, c1))
}

/// Simulate a pointer drag from `from` to `to`, released over the last cell.
pub fn drag(editor: &mut MergeEditor, from: (u32, u32), to: (u32, u32)) {
    editor.begin_selection(from.0, from.1);
    editor.extend_selection(to.0, to.1);
    editor.end_selection();
}

/// Rows of the generated table, each as the list of its `<td ...>` opening tags.
pub fn table_rows(html: &str) -> Vec<Vec<String>> {
    let table = html
        .split_once("<table class=\"merged\">")
        .and_then(|(_, rest)| rest.split_once("</table>"))
        .map(|(body, _)| body)
        .expect("generated document has a table");
    table
        .split("<tr>")
        .skip(1)
        .map(|row| {
            row.split("<td")
                .skip(1)
                .map(|cell| {
                    let end = cell.find('>').expect("closed tag");
                    format!("<td{}", &cell[..=end])
                })
                .collect()
        })
        .collect()
}
