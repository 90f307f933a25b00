//! The "Dim - " quantity-takeoff transformation.
//!
//! Schedules named with the `Dim - ` prefix get their `Type`, `QS Tag` and
//! `QS Unit` columns merged into a single key column placed next to `QS Qty`,
//! then their rows are accumulated on the combined sheet that later feeds the
//! summary report.

use tracing::debug;

use crate::columns::{column_address, find_column_exact};
use crate::grid::Sheet;

/// Name prefix marking a schedule for the quantity-takeoff merge.
pub const DIM_PREFIX: &str = "Dim - ";
/// Fixed row treated as the column-title row on every sheet.
pub const HEADER_ROW: u32 = 3;
/// Separator between the merged key segments.
pub const KEY_SEPARATOR: &str = " : ";

const TYPE_HEADER: &str = "Type";
const TAG_HEADER: &str = "QS Tag";
const UNIT_HEADER: &str = "QS Unit";
const QTY_HEADER: &str = "QS Qty";

/// Replaces each character a worksheet name cannot carry with `_`.
pub fn sanitize_sheet_name(name: &str) -> String {
    name.chars()
        .map(|ch| match ch {
            ':' | '*' | '?' | '/' | '\\' | '[' | ']' => '_',
            other => other,
        })
        .collect()
}

/// Merges the key columns of a "Dim - " sheet in place.
///
/// Order matters throughout: the merged values are computed before the source
/// columns go away, each deletion re-locates its column because earlier
/// deletions shift indices, and the `QS Qty` move compensates the cut-insert
/// shift when the column sits left of its target.
pub fn merge_dimension_columns(sheet: &mut Sheet) {
    sheet.insert_column(1);

    let sources: Vec<u32> = [TYPE_HEADER, TAG_HEADER, UNIT_HEADER]
        .into_iter()
        .map(|header| find_column_exact(sheet, header, HEADER_ROW))
        .filter(|&col| col != 0)
        .collect();
    debug!(
        sheet = sheet.name(),
        key_columns = ?sources.iter().filter_map(|&col| column_address(col)).collect::<Vec<_>>(),
        "merging key columns"
    );

    if !sources.is_empty() {
        let last = sheet.last_row();
        for row in HEADER_ROW..=last {
            let merged = sources
                .iter()
                .map(|&col| sheet.value(row, col).to_string())
                .collect::<Vec<_>>()
                .join(KEY_SEPARATOR);
            sheet.set(row, 1, merged);
        }
    }

    for header in [TYPE_HEADER, TAG_HEADER, UNIT_HEADER] {
        let col = find_column_exact(sheet, header, HEADER_ROW);
        if col != 0 {
            sheet.delete_column(col);
        }
    }

    // Moving a column left of its target collapses one position when the cut
    // is removed, so a low QS Qty index aims one past the real target.
    let qty = find_column_exact(sheet, QTY_HEADER, HEADER_ROW);
    if qty < 4 {
        sheet.move_column(qty, 5);
    } else {
        sheet.move_column(qty, 4);
    }

    sheet.move_column(1, 4);
    sheet.format.bold_rows = HEADER_ROW;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dim_sheet(header: &[&str], data: &[&[&str]]) -> Sheet {
        // Mirrors the text import: title on row 2, headers on row 3.
        let mut sheet = Sheet::new("Dim - Walls");
        sheet.set(2, 1, "Dim - Walls");
        for (col, cell) in header.iter().enumerate() {
            sheet.set(HEADER_ROW, col as u32 + 1, *cell);
        }
        for (row, cells) in data.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                sheet.set(HEADER_ROW + 1 + row as u32, col as u32 + 1, *cell);
            }
        }
        sheet
    }

    #[test]
    fn sanitize_replaces_reserved_characters() {
        assert_eq!(sanitize_sheet_name("Dim - A:B*C?D/E\\F[G]"), "Dim - A_B_C_D_E_F_G_");
        assert_eq!(sanitize_sheet_name("Rooms"), "Rooms");
    }

    #[test]
    fn canonical_layout_lands_key_in_c_and_qty_in_d() {
        let mut sheet = dim_sheet(
            &["Type", "QS Tag", "QS Unit", "QS Qty"],
            &[&["Wall A", "W1", "m2", "12.5"], &["Wall B", "W2", "m2", "3"]],
        );
        merge_dimension_columns(&mut sheet);

        assert_eq!(sheet.value(3, 3), "Type : QS Tag : QS Unit");
        assert_eq!(sheet.value(3, 4), "QS Qty");
        assert_eq!(sheet.value(4, 3), "Wall A : W1 : m2");
        assert_eq!(sheet.value(4, 4), "12.5");
        assert_eq!(sheet.value(5, 3), "Wall B : W2 : m2");
        assert_eq!(sheet.value(5, 4), "3");
        // The original key columns are gone.
        assert_eq!(sheet.value(3, 1), "");
        assert_eq!(sheet.value(3, 2), "");
        assert_eq!(sheet.last_col(), 4);
        assert_eq!(sheet.format.bold_rows, HEADER_ROW);
    }

    #[test]
    fn absent_segment_is_skipped_in_the_key() {
        let mut sheet = dim_sheet(
            &["Type", "QS Unit", "QS Qty"],
            &[&["Wall A", "m2", "7"]],
        );
        merge_dimension_columns(&mut sheet);

        assert_eq!(sheet.value(3, 3), "Type : QS Unit");
        assert_eq!(sheet.value(4, 3), "Wall A : m2");
        assert_eq!(sheet.value(4, 4), "7");
    }

    #[test]
    fn empty_data_cells_keep_their_separator() {
        let mut sheet = dim_sheet(
            &["Type", "QS Tag", "QS Unit", "QS Qty"],
            &[&["Wall A", "", "m2", "1"]],
        );
        merge_dimension_columns(&mut sheet);
        assert_eq!(sheet.value(4, 3), "Wall A :  : m2");
    }

    #[test]
    fn no_key_columns_means_no_fill() {
        let mut sheet = dim_sheet(&["Name", "QS Qty"], &[&["x", "2"]]);
        merge_dimension_columns(&mut sheet);

        // QS Qty still relocates to column D; the key column stays blank.
        assert_eq!(sheet.value(3, 4), "QS Qty");
        assert_eq!(sheet.value(4, 4), "2");
        assert_eq!(sheet.value(3, 3), "");
    }

    #[test]
    fn qty_move_is_recomputed_after_deletions() {
        let mut sheet = dim_sheet(
            &["Count", "Type", "QS Tag", "QS Unit", "QS Qty"],
            &[&["1", "Wall A", "W1", "m2", "4"]],
        );
        merge_dimension_columns(&mut sheet);

        // Post-deletion layout is [merged, Count, QS Qty]; QS Qty sits at 3,
        // still < 4, so the compensated move applies.
        assert_eq!(sheet.value(3, 3), "Type : QS Tag : QS Unit");
        assert_eq!(sheet.value(3, 4), "QS Qty");
        assert_eq!(sheet.value(4, 4), "4");
    }

    #[test]
    fn missing_qty_column_is_tolerated() {
        let mut sheet = dim_sheet(&["Type", "QS Tag"], &[&["Wall A", "W1"]]);
        merge_dimension_columns(&mut sheet);
        assert_eq!(sheet.value(3, 3), "Type : QS Tag");
        assert_eq!(sheet.value(4, 3), "Wall A : W1");
    }
}
