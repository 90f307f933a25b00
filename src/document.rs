use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ExportError, Result};
use crate::io::delimited;

/// Narrow interface over the modeling document hosting the schedule views.
///
/// The orchestration only needs to know the document's identity, which
/// schedules exist, and how to export one of them to a delimited text file;
/// tests drive the pipeline with an in-memory implementation.
pub trait ScheduleSource {
    /// Title of the document, typically its file name.
    fn title(&self) -> &str;

    /// Full path of the document on disk.
    fn path(&self) -> &Path;

    /// Names of every schedule view the document holds, unsorted.
    fn schedule_names(&self) -> Vec<String>;

    /// Exports one schedule as a tab-delimited text file at `destination`.
    ///
    /// The first line carries the schedule title, the second the column
    /// headers, and the remaining lines the data rows.
    fn export_schedule(&self, name: &str, destination: &Path) -> Result<()>;
}

/// A schedule view and its tabular content as stored in the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleEntry {
    /// View name; doubles as the exported title line.
    pub name: String,
    /// Header row followed by data rows.
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct DocumentFile {
    title: Option<String>,
    schedules: Vec<ScheduleEntry>,
}

/// Concrete [`ScheduleSource`] backed by a JSON manifest on disk.
#[derive(Debug)]
pub struct JsonDocument {
    path: PathBuf,
    title: String,
    schedules: Vec<ScheduleEntry>,
}

impl JsonDocument {
    /// Loads a document manifest from `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let file: DocumentFile = serde_json::from_str(&data)?;
        let title = file.title.unwrap_or_else(|| {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
        Ok(Self {
            path: path.to_path_buf(),
            title,
            schedules: file.schedules,
        })
    }
}

impl ScheduleSource for JsonDocument {
    fn title(&self) -> &str {
        &self.title
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn schedule_names(&self) -> Vec<String> {
        self.schedules
            .iter()
            .map(|schedule| schedule.name.clone())
            .collect()
    }

    fn export_schedule(&self, name: &str, destination: &Path) -> Result<()> {
        let schedule = self
            .schedules
            .iter()
            .find(|schedule| schedule.name == name)
            .ok_or_else(|| ExportError::UnknownSchedule(name.to_string()))?;
        delimited::write_table(destination, &schedule.name, &schedule.rows)
    }
}
