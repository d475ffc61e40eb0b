//! Shared builders for integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use strictly_trivia::{validate_catalog, Catalog, OptionKey, Question, ValidatedCatalog};

/// A question whose options read `"<category> <value> <key>"` and whose
/// correct answer is A.
pub fn question(category: &str, value: i64) -> Question {
    let options: BTreeMap<OptionKey, String> = OptionKey::ALL
        .iter()
        .map(|k| (*k, format!("{category} {value} {k}")))
        .collect();
    Question::new(category, value, format!("{category} for {value}?"), options, "A")
}

/// Science and Math, each with values 100 and 200.
pub fn catalog() -> Catalog {
    Catalog::from_questions(vec![
        question("Science", 100),
        question("Science", 200),
        question("Math", 100),
        question("Math", 200),
    ])
}

/// [`catalog`] after validation.
pub fn validated() -> ValidatedCatalog {
    validate_catalog(catalog()).expect("fixture catalog is valid")
}
