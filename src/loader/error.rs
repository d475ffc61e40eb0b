//! Loader error types.

use derive_more::{Display, Error, From};
use std::fmt;
use std::path::{Path, PathBuf};

/// A required field was missing or malformed, or the file could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct FormatError {
    /// File being loaded.
    pub path: PathBuf,
    /// 1-based record (row, array element or `<QuestionItem>`) at fault.
    pub record: Option<usize>,
    /// Field at fault.
    pub field: Option<String>,
    /// What went wrong.
    pub message: String,
}

impl FormatError {
    /// Creates a file-level error.
    pub fn new(path: &Path, message: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            record: None,
            field: None,
            message: message.into(),
        }
    }

    /// Creates an error for one record.
    pub fn record(path: &Path, record: usize, message: impl Into<String>) -> Self {
        Self {
            record: Some(record),
            ..Self::new(path, message)
        }
    }

    /// Creates an error for one field of one record.
    pub fn field(
        path: &Path,
        record: usize,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: Some(field.into()),
            ..Self::record(path, record, message)
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Format error in {}", self.path.display())?;
        if let Some(record) = self.record {
            write!(f, ", record {}", record)?;
        }
        if let Some(field) = &self.field {
            write!(f, ", field {}", field)?;
        }
        write!(f, ": {}", self.message)
    }
}

/// The file extension does not name a supported format.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unsupported question bank format: {} (expected .csv, .json or .xml)", path.display())]
pub struct UnsupportedFormatError {
    /// Rejected path.
    pub path: PathBuf,
}

impl UnsupportedFormatError {
    /// Creates the error for `path`.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

/// Any failure while loading a question bank.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum LoadError {
    /// Malformed content or unreadable file.
    #[display("{}", _0)]
    Format(FormatError),
    /// Unknown extension.
    #[display("{}", _0)]
    UnsupportedFormat(UnsupportedFormatError),
}
