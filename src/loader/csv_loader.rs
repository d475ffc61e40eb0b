//! CSV question banks.
//!
//! Header: `Category,Value,Question,OptionA,OptionB,OptionC,OptionD,CorrectAnswer`.

use super::record::RawRecord;
use super::{read_file, FormatError};
use crate::model::{Catalog, OptionKey};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::path::Path;
use tracing::{debug, instrument};

const COLUMNS: usize = 8;

#[instrument(skip(path), fields(path = %path.display()))]
pub(super) fn load(path: &Path) -> Result<Catalog, FormatError> {
    let text = read_file(path)?;
    parse(path, &text)
}

pub(super) fn parse(path: &Path, text: &str) -> Result<Catalog, FormatError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| FormatError::new(path, format!("Unreadable header row: {}", e)))?;
    if headers.len() != COLUMNS {
        return Err(FormatError::new(
            path,
            format!(
                "Header row has {} columns, expected {}",
                headers.len(),
                COLUMNS
            ),
        ));
    }

    let mut catalog = Catalog::new();
    let mut index = 0;
    for row in reader.records() {
        index += 1;
        let row = row.map_err(|e| FormatError::record(path, index, e.to_string()))?;
        if is_blank(&row) {
            index -= 1;
            continue;
        }
        if row.len() != COLUMNS {
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            return Err(FormatError::record(
                path,
                index,
                format!(
                    "expected {} columns, found {} (line {})",
                    COLUMNS,
                    row.len(),
                    line
                ),
            ));
        }
        catalog.add_question(to_raw(&row).into_question(path, index)?);
    }

    debug!(records = index, "CSV parsed");
    Ok(catalog)
}

/// A whitespace-only line. Rows of empty fields are not blank.
fn is_blank(row: &StringRecord) -> bool {
    row.len() == 1 && row.get(0).is_some_and(str::is_empty)
}

fn to_raw(row: &StringRecord) -> RawRecord {
    let field = |i: usize| row.get(i).map(str::to_string);
    RawRecord {
        category: field(0),
        value: field(1),
        prompt: field(2),
        options: OptionKey::ALL
            .iter()
            .enumerate()
            .map(|(i, key)| (key.to_string(), field(3 + i)))
            .collect(),
        correct: field(7),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Category,Value,Question,OptionA,OptionB,OptionC,OptionD,CorrectAnswer\n";

    #[test]
    fn test_quoted_fields_with_commas_and_quotes() {
        let text = format!(
            "{HEADER}Literature,100,\"Who wrote \"\"Dune\"\", the novel?\",Herbert,\"Asimov, Isaac\",Clarke,Le Guin,a\n"
        );
        let catalog = parse(Path::new("q.csv"), &text).expect("valid csv");
        let q = catalog.question("Literature", 100).expect("question present");
        assert_eq!(q.prompt(), "Who wrote \"Dune\", the novel?");
        assert_eq!(q.option(OptionKey::B), Some("Asimov, Isaac"));
        assert_eq!(q.correct(), "A");
    }

    #[test]
    fn test_short_row_names_record() {
        let text = format!("{HEADER}Science,100,Q1,a,b,c,d,A\nScience,200,Q2,a,b,c,A\n");
        let err = parse(Path::new("q.csv"), &text).unwrap_err();
        assert_eq!(err.record, Some(2));
        assert!(err.message.contains("found 7"));
    }

    #[test]
    fn test_long_row_rejected() {
        let text = format!("{HEADER}Science,100,Q1,a,b,c,d,A,extra\n");
        assert!(parse(Path::new("q.csv"), &text).is_err());
    }

    #[test]
    fn test_blank_lines_skipped() {
        let text = format!("{HEADER}\nScience,100,Q1,a,b,c,d,A\n\n");
        let catalog = parse(Path::new("q.csv"), &text).expect("valid csv");
        assert_eq!(catalog.total_questions(), 1);
    }

    #[test]
    fn test_whitespace_only_line_skipped() {
        let text = format!("{HEADER}Science,100,Q1,a,b,c,d,A\n   \nScience,200,Q2,a,b,c,d,B\n");
        let catalog = parse(Path::new("q.csv"), &text).expect("valid csv");
        assert_eq!(catalog.total_questions(), 2);
    }

    #[test]
    fn test_row_of_empty_fields_rejected() {
        let text = format!("{HEADER}Science,100,Q1,a,b,c,d,A\n,,,,,,,\nScience,200,Q2,a,b,c,d,B\n");
        let err = parse(Path::new("q.csv"), &text).unwrap_err();
        assert_eq!(err.record, Some(2));
        assert_eq!(err.field.as_deref(), Some("Value"));
    }

    #[test]
    fn test_short_row_of_empty_fields_rejected() {
        let text = format!("{HEADER}Science,100,Q1,a,b,c,d,A\n,,\n");
        let err = parse(Path::new("q.csv"), &text).unwrap_err();
        assert_eq!(err.record, Some(2));
        assert!(err.message.contains("found 3"));
    }

    #[test]
    fn test_bad_header_rejected() {
        let err = parse(Path::new("q.csv"), "Category,Value\n").unwrap_err();
        assert_eq!(err.record, None);
    }
}
