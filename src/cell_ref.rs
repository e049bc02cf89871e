//! Utilities for parsing and formatting A1-style cell references and ranges.

use crate::error::{GridMergeError, Result};
use crate::types::{CellPosition, CellRect};

/// Parse a cell reference like "B3" (or "$B$3") into a 0-indexed position.
pub fn parse_cell_ref(cell_ref: &str) -> Option<CellPosition> {
    let mut col: u32 = 0;
    let mut row: u32 = 0;
    let mut saw_col = false;
    let mut saw_row = false;

    for b in cell_ref.trim().bytes() {
        if b == b'$' {
            continue;
        }
        if b.is_ascii_alphabetic() {
            // Letters must precede digits.
            if saw_row {
                return None;
            }
            let upper = b.to_ascii_uppercase();
            col = col
                .checked_mul(26)?
                .checked_add(u32::from(upper - b'A') + 1)?;
            saw_col = true;
        } else if b.is_ascii_digit() {
            row = row.checked_mul(10)?.checked_add(u32::from(b - b'0'))?;
            saw_row = true;
        } else {
            return None;
        }
    }

    if !saw_col || !saw_row || row == 0 {
        return None;
    }

    Some(CellPosition::new(row - 1, col - 1))
}

/// Parse a range like "A1:B2" or a single cell "C4" into a normalized rectangle.
pub fn parse_cell_range(range: &str) -> Result<CellRect> {
    let parse =
        |s: &str| parse_cell_ref(s).ok_or_else(|| GridMergeError::CellRef(range.to_string()));
    match range.split_once(':') {
        Some((start, end)) => Ok(CellRect::from_corners(parse(start)?, parse(end)?)),
        None => Ok(CellRect::single(parse(range)?)),
    }
}

/// Convert a 0-based column index to letters (A, B, ..., Z, AA, AB, ...)
pub fn col_to_letter(col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = u64::from(col) + 1;
    while n > 0 {
        n -= 1;
        let offset = u8::try_from(n % 26).unwrap_or(0);
        letters.push(char::from(b'A' + offset));
        n /= 26;
    }
    letters.iter().rev().collect()
}

/// Format a rectangle back into A1 notation.
pub fn format_range(rect: &CellRect) -> String {
    let start = format!("{}{}", col_to_letter(rect.start_col), u64::from(rect.start_row) + 1);
    if rect.cell_count() == 1 {
        return start;
    }
    format!(
        "{start}:{}{}",
        col_to_letter(rect.end_col),
        u64::from(rect.end_row) + 1
    )
}
