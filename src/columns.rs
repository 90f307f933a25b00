//! Pure column helpers: base-26 column lettering and exact header lookup.

use crate::grid::Sheet;

/// Highest column index a worksheet can address (column "XFD").
pub const MAX_COLUMNS: u32 = 16_384;

/// Converts a 1-based column index to its alphabetic reference, `1` → `"A"`,
/// `26` → `"Z"`, `27` → `"AA"`, `16384` → `"XFD"`. Out-of-range indices yield
/// `None`.
pub fn column_address(col: u32) -> Option<String> {
    if col < 1 || col > MAX_COLUMNS {
        return None;
    }
    let mut col = col;
    let mut result = String::new();
    while col > 0 {
        let remainder = (col - 1) % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        col = (col - 1) / 26;
    }
    Some(result)
}

/// Finds the 1-based column whose cell in `row` equals `needle` exactly
/// (case-sensitive), returning 0 when no column matches.
pub fn find_column_exact(sheet: &Sheet, needle: &str, row: u32) -> u32 {
    let last = sheet.last_col();
    for col in 1..=last {
        if sheet.value(row, col) == needle {
            return col;
        }
    }
    0
}
