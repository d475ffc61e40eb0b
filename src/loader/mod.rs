//! Question bank loaders.
//!
//! The format is picked once from the file extension and each arm turns
//! its native syntax into the canonical [`Catalog`]. Loading is fail-fast:
//! one bad record rejects the whole file.

mod csv_loader;
mod error;
mod json_loader;
mod record;
mod xml_loader;

pub use error::{FormatError, LoadError, UnsupportedFormatError};

use crate::model::Catalog;
use std::path::Path;
use strum::Display;
use tracing::{debug, info, instrument, warn};

/// Supported question bank formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DataFormat {
    /// Comma-separated values with a header row.
    #[strum(to_string = "csv")]
    Csv,
    /// A JSON array of question objects.
    #[strum(to_string = "json")]
    Json,
    /// `<QuestionItem>` elements.
    #[strum(to_string = "xml")]
    Xml,
}

impl DataFormat {
    /// Picks the format from a path's extension, ignoring case.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, UnsupportedFormatError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let format = match extension.as_deref() {
            Some("csv") => DataFormat::Csv,
            Some("json") => DataFormat::Json,
            Some("xml") => DataFormat::Xml,
            _ => {
                warn!(?extension, "Unsupported question bank extension");
                return Err(UnsupportedFormatError::new(path));
            }
        };

        debug!(%format, "Selected loader");
        Ok(format)
    }

    /// Parses the file at `path` in this format.
    pub fn load(self, path: &Path) -> Result<Catalog, FormatError> {
        let catalog = match self {
            DataFormat::Csv => csv_loader::load(path)?,
            DataFormat::Json => json_loader::load(path)?,
            DataFormat::Xml => xml_loader::load(path)?,
        };
        Ok(catalog)
    }
}

/// Loads a question bank, choosing the loader by extension.
///
/// # Errors
///
/// Returns [`LoadError::UnsupportedFormat`] for an unknown extension (no
/// I/O is attempted) and [`LoadError::Format`] for unreadable files or the
/// first malformed record.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load(path: impl AsRef<Path>) -> Result<Catalog, LoadError> {
    let path = path.as_ref();
    let format = DataFormat::from_path(path)?;
    let catalog = format.load(path).inspect_err(|e| {
        warn!(error = %e, "Question bank rejected");
    })?;

    info!(
        %format,
        categories = catalog.total_categories(),
        questions = catalog.total_questions(),
        "Question bank loaded"
    );
    Ok(catalog)
}

/// Reads a whole file, mapping I/O failures to a [`FormatError`].
fn read_file(path: &Path) -> Result<String, FormatError> {
    std::fs::read_to_string(path)
        .map_err(|e| FormatError::new(path, format!("Failed to read file: {}", e)))
}
