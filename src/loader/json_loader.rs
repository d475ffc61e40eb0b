//! JSON question banks: an array of
//! `{Category, Value, Question, Options: {A, B, C, D}, CorrectAnswer}` objects.

use super::record::RawRecord;
use super::{read_file, FormatError};
use crate::model::Catalog;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
struct JsonItem {
    #[serde(rename = "Category")]
    category: Option<String>,
    #[serde(rename = "Value")]
    value: Option<Value>,
    #[serde(rename = "Question")]
    question: Option<String>,
    #[serde(rename = "Options")]
    options: Option<BTreeMap<String, Option<String>>>,
    #[serde(rename = "CorrectAnswer")]
    correct_answer: Option<String>,
}

#[instrument(skip(path), fields(path = %path.display()))]
pub(super) fn load(path: &Path) -> Result<Catalog, FormatError> {
    let text = read_file(path)?;
    parse(path, &text)
}

pub(super) fn parse(path: &Path, text: &str) -> Result<Catalog, FormatError> {
    let items: Vec<Value> = serde_json::from_str(text)
        .map_err(|e| FormatError::new(path, format!("Expected a JSON array: {}", e)))?;

    let mut catalog = Catalog::new();
    for (i, item) in items.into_iter().enumerate() {
        let index = i + 1;
        let item: JsonItem = serde_json::from_value(item)
            .map_err(|e| FormatError::record(path, index, e.to_string()))?;
        let raw = to_raw(path, index, item)?;
        catalog.add_question(raw.into_question(path, index)?);
    }

    debug!(records = catalog.total_questions(), "JSON parsed");
    Ok(catalog)
}

fn to_raw(path: &Path, index: usize, item: JsonItem) -> Result<RawRecord, FormatError> {
    let value = match item.value {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::String(s)) => Some(s),
        Some(other) => {
            return Err(FormatError::field(
                path,
                index,
                "Value",
                format!("expected an integer, found {}", other),
            ));
        }
    };

    let options = item
        .options
        .ok_or_else(|| FormatError::field(path, index, "Options", "missing required field"))?
        .into_iter()
        .collect();

    Ok(RawRecord {
        category: item.category,
        value,
        prompt: item.question,
        options,
        correct: item.correct_answer,
    })
}
