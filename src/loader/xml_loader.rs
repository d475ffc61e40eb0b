//! XML question banks.
//!
//! ```xml
//! <JeopardyQuestions>
//!   <QuestionItem>
//!     <Category>Science</Category>
//!     <Value>100</Value>
//!     <QuestionText>What is H2O?</QuestionText>
//!     <Options>
//!       <OptionA>Water</OptionA> ... <OptionD>Fire</OptionD>
//!     </Options>
//!     <CorrectAnswer>A</CorrectAnswer>
//!   </QuestionItem>
//! </JeopardyQuestions>
//! ```
//!
//! `<QuestionItem>` elements are collected in document order at any depth,
//! whatever the root and any elements around them.

use super::record::RawRecord;
use super::{read_file, FormatError};
use crate::model::Catalog;
use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::Reader;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, instrument};

const ITEM: &str = "QuestionItem";

#[derive(Debug, Deserialize)]
struct XmlItem {
    #[serde(rename = "Category")]
    category: Option<String>,
    #[serde(rename = "Value")]
    value: Option<String>,
    #[serde(rename = "QuestionText")]
    question_text: Option<String>,
    #[serde(rename = "Question")]
    question: Option<String>,
    #[serde(rename = "Options")]
    options: Option<XmlOptions>,
    #[serde(rename = "CorrectAnswer")]
    correct_answer: Option<String>,
}

#[derive(Debug, Deserialize)]
struct XmlOptions {
    #[serde(rename = "OptionA")]
    a: Option<String>,
    #[serde(rename = "OptionB")]
    b: Option<String>,
    #[serde(rename = "OptionC")]
    c: Option<String>,
    #[serde(rename = "OptionD")]
    d: Option<String>,
}

#[instrument(skip(path), fields(path = %path.display()))]
pub(super) fn load(path: &Path) -> Result<Catalog, FormatError> {
    let text = read_file(path)?;
    parse(path, &text)
}

pub(super) fn parse(path: &Path, text: &str) -> Result<Catalog, FormatError> {
    let malformed = |e: quick_xml::Error| FormatError::new(path, format!("Malformed XML: {}", e));
    let mut reader = Reader::from_str(text);

    let mut catalog = Catalog::new();
    let mut index = 0;
    loop {
        let item = match reader.read_event().map_err(malformed)? {
            Event::Start(e) if e.name().as_ref() == ITEM.as_bytes() => {
                let span = reader.read_to_end(QName(ITEM.as_bytes())).map_err(malformed)?;
                let inner = usize::try_from(span.start)
                    .ok()
                    .zip(usize::try_from(span.end).ok())
                    .and_then(|(start, end)| text.get(start..end))
                    .ok_or_else(|| FormatError::new(path, "QuestionItem span out of range"))?;
                format!("<{ITEM}>{inner}</{ITEM}>")
            }
            Event::Empty(e) if e.name().as_ref() == ITEM.as_bytes() => format!("<{ITEM}/>"),
            Event::Eof => break,
            _ => continue,
        };

        index += 1;
        let item: XmlItem = quick_xml::de::from_str(&item)
            .map_err(|e| FormatError::record(path, index, e.to_string()))?;
        let raw = to_raw(path, index, item)?;
        catalog.add_question(raw.into_question(path, index)?);
    }

    debug!(records = index, "XML parsed");
    Ok(catalog)
}

fn to_raw(path: &Path, index: usize, item: XmlItem) -> Result<RawRecord, FormatError> {
    let options = item
        .options
        .ok_or_else(|| FormatError::field(path, index, "Options", "missing <Options> element"))?;

    Ok(RawRecord {
        category: item.category,
        value: item.value,
        prompt: item.question_text.or(item.question),
        options: vec![
            ("A".to_string(), options.a),
            ("B".to_string(), options.b),
            ("C".to_string(), options.c),
            ("D".to_string(), options.d),
        ],
        correct: item.correct_answer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OptionKey;

    fn item(body: &str) -> String {
        format!("<JeopardyQuestions><QuestionItem>{body}</QuestionItem></JeopardyQuestions>")
    }

    const OPTIONS: &str = "<Options><OptionA>Water</OptionA><OptionB>Salt</OptionB>\
        <OptionC>Air</OptionC><OptionD>Fire</OptionD></Options>";

    #[test]
    fn test_parses_question_item() {
        let text = item(&format!(
            "<Category> Science </Category><Value>100</Value>\
             <QuestionText>What is H2O?</QuestionText>{OPTIONS}<CorrectAnswer>a</CorrectAnswer>"
        ));
        let catalog = parse(Path::new("q.xml"), &text).expect("valid xml");
        let q = catalog.question("Science", 100).expect("question present");
        assert_eq!(q.prompt(), "What is H2O?");
        assert_eq!(q.option(OptionKey::C), Some("Air"));
        assert_eq!(q.correct(), "A");
    }

    #[test]
    fn test_question_tag_fallback() {
        let text = item(&format!(
            "<Category>Science</Category><Value>100</Value>\
             <Question>What is H2O?</Question>{OPTIONS}<CorrectAnswer>A</CorrectAnswer>"
        ));
        let catalog = parse(Path::new("q.xml"), &text).expect("valid xml");
        assert_eq!(
            catalog.question("Science", 100).map(|q| q.prompt().as_str()),
            Some("What is H2O?")
        );
    }

    #[test]
    fn test_missing_options_element() {
        let text = item(
            "<Category>Science</Category><Value>100</Value>\
             <QuestionText>Q</QuestionText><CorrectAnswer>A</CorrectAnswer>",
        );
        let err = parse(Path::new("q.xml"), &text).unwrap_err();
        assert_eq!(err.record, Some(1));
        assert_eq!(err.field.as_deref(), Some("Options"));
    }

    #[test]
    fn test_missing_option_element() {
        let text = item(
            "<Category>Science</Category><Value>100</Value><QuestionText>Q</QuestionText>\
             <Options><OptionA>1</OptionA><OptionB>2</OptionB><OptionC>3</OptionC></Options>\
             <CorrectAnswer>A</CorrectAnswer>",
        );
        let err = parse(Path::new("q.xml"), &text).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("OptionD"));
    }

    fn full_item(category: &str, value: i64) -> String {
        format!(
            "<QuestionItem><Category>{category}</Category><Value>{value}</Value>\
             <QuestionText>Q?</QuestionText>{OPTIONS}<CorrectAnswer>A</CorrectAnswer></QuestionItem>"
        )
    }

    #[test]
    fn test_items_separated_by_other_elements() {
        let text = format!(
            "<Bank>{}<Note>interlude</Note>{}</Bank>",
            full_item("Science", 100),
            full_item("Science", 200)
        );
        let catalog = parse(Path::new("q.xml"), &text).expect("valid xml");
        assert_eq!(catalog.total_questions(), 2);
    }

    #[test]
    fn test_items_nested_in_wrapper() {
        let text = format!(
            "<Root><Questions>{}</Questions><More><Deeper>{}</Deeper></More></Root>",
            full_item("Science", 100),
            full_item("Math", 100)
        );
        let catalog = parse(Path::new("q.xml"), &text).expect("valid xml");
        let names: Vec<_> = catalog.categories().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Science", "Math"]);
    }

    #[test]
    fn test_empty_item_names_record() {
        let text = format!("<Bank>{}<QuestionItem/></Bank>", full_item("Science", 100));
        let err = parse(Path::new("q.xml"), &text).unwrap_err();
        assert_eq!(err.record, Some(2));
        assert_eq!(err.field.as_deref(), Some("Options"));
    }

    #[test]
    fn test_malformed_document() {
        assert!(parse(Path::new("q.xml"), "<JeopardyQuestions><QuestionItem>").is_err());
    }
}
