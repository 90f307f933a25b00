use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Error type covering the different failure cases that can occur while the
/// tool reads schedules, transforms them, or writes the workbook.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing of the document manifest fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Raised when the document exposes no schedule views at all.
    #[error("no schedule available in the document")]
    NoSchedules,

    /// Raised before any file I/O when a schedule name cannot fit an Excel
    /// sheet name.
    #[error("schedule name '{0}' should not be more than 31 characters")]
    ScheduleNameTooLong(String),

    /// Raised when exporting a single schedule to the destination folder
    /// fails, typically because the folder is read-only.
    #[error(
        "failed to export schedule '{name}': {source}; the destination folder \
         may be read-only, save the document to a writable folder first"
    )]
    ScheduleExport {
        name: String,
        #[source]
        source: Box<ExportError>,
    },

    /// Raised when a schedule is requested that the document does not hold.
    #[error("unknown schedule '{0}'")]
    UnknownSchedule(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
