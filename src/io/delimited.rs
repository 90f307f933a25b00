//! Tab-delimited text export format shared with the modeling host.
//!
//! One schedule at a time round-trips through a single reusable file: the
//! source writes the schedule title followed by its rows, the importer reads
//! the lines back into cells, and the caller deletes the file before the next
//! schedule is exported.

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Writes `title` and `rows` to `path` as tab-separated lines.
pub fn write_table(path: &Path, title: &str, rows: &[Vec<String>]) -> Result<()> {
    let mut text = String::new();
    text.push_str(title);
    text.push('\n');
    for row in rows {
        text.push_str(&row.join("\t"));
        text.push('\n');
    }
    fs::write(path, text)?;
    Ok(())
}

/// Reads the lines of `path` back into rows of cells.
pub fn read_table(path: &Path) -> Result<Vec<Vec<String>>> {
    let text = fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(|line| line.split('\t').map(str::to_string).collect())
        .collect())
}
