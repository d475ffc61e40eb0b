//! Format-neutral record normalization shared by every loader.

use super::FormatError;
use crate::model::{OptionKey, Question};
use std::collections::BTreeMap;
use std::path::Path;

/// One question as read from a source file, before normalization.
///
/// Loaders fill in whatever their syntax provides; `into_question` decides
/// what is missing or malformed so every format reports the same way.
#[derive(Debug, Default)]
pub(crate) struct RawRecord {
    pub category: Option<String>,
    pub value: Option<String>,
    pub prompt: Option<String>,
    pub options: Vec<(String, Option<String>)>,
    pub correct: Option<String>,
}

impl RawRecord {
    /// Normalizes the record into a canonical question.
    ///
    /// `index` is the 1-based record number used in error messages.
    pub fn into_question(self, path: &Path, index: usize) -> Result<Question, FormatError> {
        let category = required(path, index, "Category", self.category)?;
        let value_text = required(path, index, "Value", self.value)?;
        let value = value_text.parse::<i64>().map_err(|_| {
            FormatError::field(
                path,
                index,
                "Value",
                format!("'{}' is not an integer", value_text),
            )
        })?;
        let prompt = required(path, index, "Question", self.prompt)?;
        let options = options(path, index, self.options)?;
        let correct = required(path, index, "CorrectAnswer", self.correct)?;

        Ok(Question::new(category, value, prompt, options, correct))
    }
}

fn required(
    path: &Path,
    index: usize,
    field: &str,
    value: Option<String>,
) -> Result<String, FormatError> {
    value
        .map(|v| v.trim().to_string())
        .ok_or_else(|| FormatError::field(path, index, field, "missing required field"))
}

fn options(
    path: &Path,
    index: usize,
    raw: Vec<(String, Option<String>)>,
) -> Result<BTreeMap<OptionKey, String>, FormatError> {
    if raw.len() != OptionKey::ALL.len() {
        return Err(FormatError::field(
            path,
            index,
            "Options",
            format!("expected 4 options, found {}", raw.len()),
        ));
    }

    let mut options = BTreeMap::new();
    for (key_text, text) in raw {
        let key = OptionKey::parse(&key_text).ok_or_else(|| {
            FormatError::field(
                path,
                index,
                "Options",
                format!("unknown option key '{}'", key_text),
            )
        })?;
        let field = format!("Option{}", key);
        let text = required(path, index, &field, text)?;
        if options.insert(key, text).is_some() {
            return Err(FormatError::field(
                path,
                index,
                field,
                "option given more than once",
            ));
        }
    }
    Ok(options)
}
