//! Summary sheet grouping the combined quantity-takeoff rows.

use std::collections::BTreeMap;

use tracing::debug;

use crate::grid::Sheet;
use crate::transform::HEADER_ROW;

/// Name of the derived summary sheet.
pub const SUMMARY_SHEET: &str = "QS Desc";
/// Combined-sheet column holding the merged key.
const KEY_COLUMN: u32 = 3;
/// Combined-sheet column holding the quantity.
const QTY_COLUMN: u32 = 4;
/// Label grouping rows that carry a quantity but no key.
const BLANK_LABEL: &str = "(blank)";

/// Builds the summary report over the combined sheet's key and quantity
/// columns.
///
/// When the combined sheet has no rows below the header row the summary stays
/// empty; the quantity column keeps its number format either way.
pub fn build_summary(combined: &Sheet, summary: &mut Sheet) {
    summary
        .format
        .column_formats
        .push((2, "#,##0.00".to_string()));

    let last = combined.last_row();
    if last <= HEADER_ROW {
        debug!("combined sheet holds no data rows, leaving summary empty");
        return;
    }

    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for row in HEADER_ROW + 1..=last {
        let key = combined.value(row, KEY_COLUMN).trim();
        let qty = combined.value(row, QTY_COLUMN).trim();
        if key.is_empty() && qty.is_empty() {
            continue;
        }
        let label = if key.is_empty() { BLANK_LABEL } else { key };
        *totals.entry(label.to_string()).or_insert(0.0) += qty.parse::<f64>().unwrap_or(0.0);
    }
    debug!(groups = totals.len(), "summary groups collected");

    summary.set(2, 1, combined.value(HEADER_ROW, KEY_COLUMN).to_string());
    summary.set(
        2,
        2,
        format!("Sum of {}", combined.value(HEADER_ROW, QTY_COLUMN)),
    );

    let mut row = HEADER_ROW;
    let mut grand_total = 0.0;
    for (label, total) in totals {
        summary.set(row, 1, label);
        summary.set(row, 2, total.to_string());
        grand_total += total;
        row += 1;
    }
    summary.set(row, 1, "Grand Total");
    summary.set(row, 2, grand_total.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combined_with(rows: &[(&str, &str)]) -> Sheet {
        let mut sheet = Sheet::new("All Dim");
        sheet.set(HEADER_ROW, KEY_COLUMN, "Type : QS Tag : QS Unit");
        sheet.set(HEADER_ROW, QTY_COLUMN, "QS Qty");
        for (offset, (key, qty)) in rows.iter().enumerate() {
            let row = HEADER_ROW + 1 + offset as u32;
            sheet.set(row, KEY_COLUMN, *key);
            sheet.set(row, QTY_COLUMN, *qty);
        }
        sheet
    }

    #[test]
    fn groups_are_summed_and_sorted() {
        let combined = combined_with(&[
            ("Wall B : W2 : m2", "3"),
            ("Wall A : W1 : m2", "12.5"),
            ("Wall A : W1 : m2", "2.5"),
        ]);
        let mut summary = Sheet::new(SUMMARY_SHEET);
        build_summary(&combined, &mut summary);

        assert_eq!(summary.value(2, 1), "Type : QS Tag : QS Unit");
        assert_eq!(summary.value(2, 2), "Sum of QS Qty");
        assert_eq!(summary.value(3, 1), "Wall A : W1 : m2");
        assert_eq!(summary.value(3, 2), "15");
        assert_eq!(summary.value(4, 1), "Wall B : W2 : m2");
        assert_eq!(summary.value(4, 2), "3");
        assert_eq!(summary.value(5, 1), "Grand Total");
        assert_eq!(summary.value(5, 2), "18");
    }

    #[test]
    fn blank_rows_are_skipped_and_blank_keys_grouped() {
        let combined = combined_with(&[
            ("Wall A : W1 : m2", "1"),
            ("", ""),
            ("", "4"),
            ("Wall A : W1 : m2", "not a number"),
        ]);
        let mut summary = Sheet::new(SUMMARY_SHEET);
        build_summary(&combined, &mut summary);

        assert_eq!(summary.value(3, 1), "(blank)");
        assert_eq!(summary.value(3, 2), "4");
        assert_eq!(summary.value(4, 1), "Wall A : W1 : m2");
        assert_eq!(summary.value(4, 2), "1");
        assert_eq!(summary.value(5, 1), "Grand Total");
        assert_eq!(summary.value(5, 2), "5");
    }

    #[test]
    fn empty_combined_leaves_summary_without_a_table() {
        let mut combined = Sheet::new("All Dim");
        combined.set(HEADER_ROW, KEY_COLUMN, "Type : QS Tag : QS Unit");
        let mut summary = Sheet::new(SUMMARY_SHEET);
        build_summary(&combined, &mut summary);

        assert_eq!(summary.last_row(), 0);
        assert_eq!(summary.format.column_formats, vec![(2, "#,##0.00".to_string())]);
    }
}
