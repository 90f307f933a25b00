//! In-memory workbook model.
//!
//! Sheets are rectangular grids of string cells with a 1-based row/column
//! API matching spreadsheet conventions. All structural edits happen here;
//! nothing touches the output file until [`crate::io::xlsx`] serialises the
//! finished workbook in one pass.

/// Page setup applied to a sheet when the workbook is serialised.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSetup {
    pub landscape: bool,
    /// Rows 1..=n repeated at the top of every printed page.
    pub repeat_rows: u32,
    pub left_footer: String,
    pub right_footer: String,
    pub fit_to_width: u16,
}

/// Cosmetic state carried alongside a sheet's cells and applied by the
/// serialiser.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetFormat {
    /// Rows 1..=n rendered bold, except cells in [`Self::plain_columns`].
    pub bold_rows: u32,
    /// Columns exempt from the row bolding (the row-number column).
    pub plain_columns: Vec<u32>,
    /// Individual cells rendered bold regardless of row.
    pub bold_cells: Vec<(u32, u32)>,
    /// Rows 1..=n frozen above the scrolling area.
    pub freeze_rows: u32,
    pub autofit: bool,
    /// Column → Excel number format, applied to the column's written cells.
    pub column_formats: Vec<(u32, String)>,
    pub page: Option<PageSetup>,
}

/// A named rectangular grid of cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<String>>,
    pub format: SheetFormat,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
            format: SheetFormat::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The cell rows, row 0 being sheet row 1. Rows share the same width.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    fn width(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    fn ensure(&mut self, row: u32, col: u32) {
        let width = self.width().max(col as usize);
        while self.rows.len() < row as usize {
            self.rows.push(vec![String::new(); width]);
        }
        if width > self.width() {
            for cells in &mut self.rows {
                cells.resize(width, String::new());
            }
        }
    }

    /// Writes `value` at the 1-based position, growing the grid as needed.
    pub fn set(&mut self, row: u32, col: u32, value: impl Into<String>) {
        debug_assert!(row >= 1 && col >= 1);
        self.ensure(row, col);
        self.rows[row as usize - 1][col as usize - 1] = value.into();
    }

    /// Cell content at the 1-based position; empty for cells outside the grid.
    pub fn value(&self, row: u32, col: u32) -> &str {
        self.rows
            .get(row as usize - 1)
            .and_then(|cells| cells.get(col as usize - 1))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Last 1-based row holding any non-empty cell, 0 for a blank sheet.
    pub fn last_row(&self) -> u32 {
        self.rows
            .iter()
            .rposition(|cells| cells.iter().any(|cell| !cell.is_empty()))
            .map(|index| index as u32 + 1)
            .unwrap_or(0)
    }

    /// Last 1-based column holding any non-empty cell, 0 for a blank sheet.
    pub fn last_col(&self) -> u32 {
        self.rows
            .iter()
            .filter_map(|cells| cells.iter().rposition(|cell| !cell.is_empty()))
            .max()
            .map(|index| index as u32 + 1)
            .unwrap_or(0)
    }

    /// Inserts a blank column at the 1-based position, shifting data right.
    pub fn insert_column(&mut self, col: u32) {
        debug_assert!(col >= 1);
        let index = (col as usize - 1).min(self.width());
        for cells in &mut self.rows {
            cells.insert(index, String::new());
        }
    }

    /// Deletes the column at the 1-based position, shifting data left.
    pub fn delete_column(&mut self, col: u32) {
        if col == 0 || col as usize > self.width() {
            return;
        }
        for cells in &mut self.rows {
            cells.remove(col as usize - 1);
        }
    }

    /// Moves a column with spreadsheet cut-insert semantics: the target
    /// position is interpreted before the source column is removed, so a
    /// rightward move lands one short of the nominal target.
    pub fn move_column(&mut self, from: u32, to: u32) {
        if from == 0 || to == 0 || from == to {
            return;
        }
        let from = from as usize - 1;
        if from >= self.width() {
            return;
        }
        let insert_at = if (from as u32) < to - 1 {
            to as usize - 2
        } else {
            to as usize - 1
        };
        for cells in &mut self.rows {
            let cell = cells.remove(from);
            if cells.len() < insert_at {
                cells.resize(insert_at, String::new());
            }
            cells.insert(insert_at, cell);
        }
    }

    /// Appends every used row of `other` (row 1 through its last used row,
    /// full width) below this sheet's own used rows.
    pub fn append_used_rows(&mut self, other: &Sheet) {
        let start = self.last_row() + 1;
        let last = other.last_row();
        for row in 1..=last {
            let width = other.width() as u32;
            for col in 1..=width {
                let value = other.value(row, col);
                if !value.is_empty() {
                    self.set(start + row - 1, col, value.to_string());
                }
            }
        }
    }
}

/// Ordered collection of sheets, the in-memory stand-in for a workbook.
#[derive(Debug, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheets_mut(&mut self) -> &mut [Sheet] {
        &mut self.sheets
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Appends a new blank sheet as the last sheet and returns it.
    pub fn add_sheet(&mut self, name: impl Into<String>) -> &mut Sheet {
        self.sheets.push(Sheet::new(name));
        self.sheets.last_mut().unwrap()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name() == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|sheet| sheet.name() == name)
    }

    /// Mutable access to two distinct sheets at once, `first` preceding
    /// `second` in workbook order.
    pub fn sheet_pair_mut(&mut self, first: usize, second: usize) -> (&mut Sheet, &mut Sheet) {
        assert!(first < second && second < self.sheets.len());
        let (head, tail) = self.sheets.split_at_mut(second);
        (&mut head[first], &mut tail[0])
    }

    /// Relocates the named sheet to be the first sheet of the workbook.
    pub fn move_to_front(&mut self, name: &str) {
        if let Some(index) = self.sheets.iter().position(|sheet| sheet.name() == name) {
            let sheet = self.sheets.remove(index);
            self.sheets.insert(0, sheet);
        }
    }
}
