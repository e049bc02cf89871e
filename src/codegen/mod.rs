//! HTML/CSS code generation for a merged grid.
//!
//! The output is a complete, static HTML5 document. Occluded cells are
//! omitted; anchors carry `colspan`/`rowspan` so the browser's table layout
//! fills the covered area.

mod reveal;

pub use reveal::*;

use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use crate::types::{CellPosition, MergedRegion};

/// Title of the generated document.
pub const DOCUMENT_TITLE: &str = "Merged Table";

/// Stylesheet embedded in every generated document.
pub const STYLESHEET: &str = ".merged{border-collapse:collapse}\n\
.merged td{border:1px solid #000;background:#fff;width:40px;height:40px}";

/// Serialize a `size`×`size` grid into an HTML document.
///
/// Pure: identical inputs always produce byte-identical output.
pub fn generate(size: u32, regions: &[MergedRegion], occluded: &HashSet<CellPosition>) -> String {
    let anchors: HashMap<CellPosition, &MergedRegion> = regions
        .iter()
        .map(|region| (region.anchor(), region))
        .collect();

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html>\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    let _ = writeln!(html, "<title>{DOCUMENT_TITLE}</title>");
    let _ = writeln!(html, "<style>\n{STYLESHEET}\n</style>");
    html.push_str("</head>\n<body>\n");
    html.push_str("<table class=\"merged\">\n");

    for row in 0..size {
        html.push_str("  <tr>\n");
        for col in 0..size {
            let pos = CellPosition::new(row, col);
            if occluded.contains(&pos) {
                continue;
            }
            match anchors.get(&pos) {
                Some(region) => {
                    let _ = writeln!(
                        html,
                        "    <td colspan=\"{}\" rowspan=\"{}\"></td>",
                        region.col_span, region.row_span
                    );
                }
                None => html.push_str("    <td></td>\n"),
            }
        }
        html.push_str("  </tr>\n");
    }

    html.push_str("</table>\n");
    html.push_str("</body>\n</html>\n");
    html
}
