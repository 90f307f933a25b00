//! Serialises the in-memory workbook to an `.xlsx` file.
//!
//! This is the only place the spreadsheet file format appears; every sheet is
//! written in one pass, applying the cosmetic state accumulated in
//! [`SheetFormat`](crate::grid::SheetFormat) along the way.

use std::path::Path;

use rust_xlsxwriter::Format;

use crate::error::Result;
use crate::grid::{Sheet, Workbook};

/// Writes `workbook` to `path`, sheets in workbook order.
pub fn write_workbook(path: &Path, workbook: &Workbook) -> Result<()> {
    let mut writer = rust_xlsxwriter::Workbook::new();

    for sheet in workbook.sheets() {
        let worksheet = writer.add_worksheet();
        worksheet.set_name(sheet.name())?;

        for (row_idx, row) in sheet.rows().iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                if cell.is_empty() {
                    continue;
                }
                let row_num = row_idx as u32;
                let col_num = col_idx as u16;
                let format = cell_format(sheet, row_num + 1, col_idx as u32 + 1);

                match parse_number(cell) {
                    Some(number) => match &format {
                        Some(format) => {
                            worksheet.write_number_with_format(row_num, col_num, number, format)?;
                        }
                        None => {
                            worksheet.write_number(row_num, col_num, number)?;
                        }
                    },
                    None => match &format {
                        Some(format) => {
                            worksheet.write_string_with_format(row_num, col_num, cell, format)?;
                        }
                        None => {
                            worksheet.write_string(row_num, col_num, cell)?;
                        }
                    },
                }
            }
        }

        if sheet.format.freeze_rows > 0 {
            worksheet.set_freeze_panes(sheet.format.freeze_rows, 0)?;
        }
        if sheet.format.autofit {
            worksheet.autofit();
        }
        if let Some(page) = &sheet.format.page {
            if page.landscape {
                worksheet.set_landscape();
            }
            if page.repeat_rows > 0 {
                worksheet.set_repeat_rows(0, page.repeat_rows - 1)?;
            }
            worksheet.set_footer(format!("&L{}&R{}", page.left_footer, page.right_footer));
            worksheet.set_print_fit_to_pages(page.fit_to_width, 0);
        }
    }

    writer.save(path)?;
    Ok(())
}

/// Format for one 1-based cell position, `None` when the cell needs no
/// explicit format (column formats are applied separately).
fn cell_format(sheet: &Sheet, row: u32, col: u32) -> Option<Format> {
    let style = &sheet.format;
    let bold = (row <= style.bold_rows && !style.plain_columns.contains(&col))
        || style.bold_cells.contains(&(row, col));
    let number_format = style
        .column_formats
        .iter()
        .find(|(format_col, _)| *format_col == col)
        .map(|(_, format)| format.as_str());

    if !bold && number_format.is_none() {
        return None;
    }
    let mut format = Format::new();
    if bold {
        format = format.set_bold();
    }
    if let Some(number_format) = number_format {
        format = format.set_num_format(number_format);
    }
    Some(format)
}

/// Cells whose full text parses as a finite number are written as numbers so
/// sums and number formats behave in the spreadsheet.
fn parse_number(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_detection_requires_a_finite_full_parse() {
        assert_eq!(parse_number("12.5"), Some(12.5));
        assert_eq!(parse_number("3"), Some(3.0));
        assert_eq!(parse_number("12.5 m2"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("Wall A"), None);
    }
}
