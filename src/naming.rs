use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

/// Extension the modeling host hides from document titles; appended before
/// stripping so a title works whether or not the host shows it.
pub const SOURCE_EXTENSION: &str = ".rvt";

/// Derived output identity for one export run: a timestamped base name plus
/// the destination folder shared by the workbook and the temporary per
/// schedule text file.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputNaming {
    pub base_name: String,
    pub folder: PathBuf,
}

impl OutputNaming {
    /// Resolves the run's naming from the document title and path.
    ///
    /// The title is normalised to end with [`SOURCE_EXTENSION`], then the
    /// extension is replaced by a `-yyyyMMdd-HHmmss` stamp so repeated runs
    /// never overwrite an earlier output file.
    pub fn resolve(title: &str, document_path: &Path, now: DateTime<Local>) -> Self {
        let mut name = title.to_string();
        if !name.ends_with(SOURCE_EXTENSION) {
            name.push_str(SOURCE_EXTENSION);
        }
        let stem = name
            .strip_suffix(SOURCE_EXTENSION)
            .unwrap_or(&name)
            .to_string();
        let base_name = format!("{stem}{}", now.format("-%Y%m%d-%H%M%S"));
        let folder = document_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self { base_name, folder }
    }

    /// Destination of the workbook produced by this run.
    pub fn workbook_path(&self) -> PathBuf {
        self.folder.join(format!("{}.xlsx", self.base_name))
    }

    /// Reusable temporary file one schedule at a time is exported into.
    pub fn temp_export_path(&self) -> PathBuf {
        self.folder.join(format!("{}.txt", self.base_name))
    }
}
