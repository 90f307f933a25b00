//! Export orchestration: one pass from schedule discovery to the saved
//! workbook.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::Local;
use tracing::{debug, info, instrument};

use crate::aggregate::{self, SUMMARY_SHEET};
use crate::document::ScheduleSource;
use crate::error::{ExportError, Result};
use crate::grid::{PageSetup, Workbook};
use crate::io::{delimited, xlsx};
use crate::naming::OutputNaming;
use crate::transform::{self, DIM_PREFIX, HEADER_ROW, sanitize_sheet_name};

/// Accumulator sheet holding every "Dim - " schedule's merged rows.
pub const COMBINED_SHEET: &str = "All Dim";
/// Longest name a worksheet can carry.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Outcome of a successful export run.
#[derive(Debug)]
pub struct ExportReport {
    pub workbook_path: PathBuf,
    pub sheet_count: usize,
    pub elapsed: Duration,
}

/// Exports every schedule of `source` into one timestamped workbook.
///
/// The workbook only exists on disk after the whole pipeline succeeds; every
/// failure before the final save aborts with nothing written.
#[instrument(level = "info", skip_all, fields(document = %source.path().display()))]
pub fn export_document(source: &dyn ScheduleSource) -> Result<ExportReport> {
    let started = Instant::now();
    let naming = OutputNaming::resolve(source.title(), source.path(), Local::now());

    let mut names = source.schedule_names();
    if names.is_empty() {
        return Err(ExportError::NoSchedules);
    }
    // Validate every name, reserved ones included, before any file I/O.
    if let Some(name) = names
        .iter()
        .find(|name| name.chars().count() > MAX_SHEET_NAME_LEN)
    {
        return Err(ExportError::ScheduleNameTooLong(name.clone()));
    }
    names.sort();
    info!(
        schedules = names.len(),
        output = %naming.workbook_path().display(),
        "starting export"
    );

    let mut workbook = Workbook::new();
    workbook.add_sheet(COMBINED_SHEET);
    let temp_path = naming.temp_export_path();

    for name in &names {
        if name.starts_with('<') {
            debug!(schedule = %name, "skipping reserved schedule");
            continue;
        }
        let sheet_name = sanitize_sheet_name(name);

        source
            .export_schedule(name, &temp_path)
            .map_err(|error| ExportError::ScheduleExport {
                name: name.clone(),
                source: Box::new(error),
            })?;
        let table = delimited::read_table(&temp_path)?;

        workbook.add_sheet(&sheet_name);
        let last_index = workbook.len() - 1;
        let (combined, sheet) = workbook.sheet_pair_mut(0, last_index);

        // Rows land one above the header row: title on row 2, headers on
        // row 3, data below.
        let mut row = HEADER_ROW - 1;
        for cells in &table {
            for (col, cell) in cells.iter().enumerate() {
                if !cell.is_empty() {
                    sheet.set(row, col as u32 + 1, cell.clone());
                }
            }
            row += 1;
        }

        if sheet_name.starts_with(DIM_PREFIX) {
            transform::merge_dimension_columns(sheet);
            combined.append_used_rows(sheet);
        } else {
            sheet.format.bold_rows = HEADER_ROW;
        }

        fs::remove_file(&temp_path)?;
        info!(schedule = %name, sheet = %sheet_name, "schedule imported");
    }

    workbook.move_to_front(COMBINED_SHEET);
    workbook.add_sheet(SUMMARY_SHEET);
    let last_index = workbook.len() - 1;
    let (combined, summary) = workbook.sheet_pair_mut(0, last_index);
    aggregate::build_summary(combined, summary);
    workbook.move_to_front(SUMMARY_SHEET);

    apply_final_formatting(&mut workbook, &naming.base_name);

    let workbook_path = naming.workbook_path();
    xlsx::write_workbook(&workbook_path, &workbook)?;
    info!(output = %workbook_path.display(), "workbook saved");

    Ok(ExportReport {
        workbook_path,
        sheet_count: workbook.len(),
        elapsed: started.elapsed(),
    })
}

/// Uniform cosmetic treatment of every finished sheet, last to first: frozen
/// header rows, a row-number column, autofit widths, the run's name in B1,
/// and the shared page setup.
fn apply_final_formatting(workbook: &mut Workbook, base_name: &str) {
    let title = base_name.to_uppercase();
    for sheet in workbook.sheets_mut().iter_mut().rev() {
        sheet.format.freeze_rows = HEADER_ROW;

        sheet.insert_column(1);
        let last = sheet.last_row().max(1);
        for row in 1..=last {
            sheet.set(row, 1, row.to_string());
        }
        sheet.format.plain_columns.push(1);

        sheet.format.autofit = true;
        sheet.set(1, 2, title.clone());
        sheet.format.bold_cells.push((1, 2));

        sheet.format.page = Some(PageSetup {
            landscape: true,
            repeat_rows: HEADER_ROW,
            left_footer: base_name.to_string(),
            right_footer: "&P/&N".to_string(),
            fit_to_width: 1,
        });
    }
}
