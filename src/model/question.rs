//! Multiple-choice questions and their option keys.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumIter, EnumString};

/// One of the four answer slots of a question.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum OptionKey {
    /// First option.
    A,
    /// Second option.
    B,
    /// Third option.
    C,
    /// Fourth option.
    D,
}

impl OptionKey {
    /// All keys in board order.
    pub const ALL: [OptionKey; 4] = [OptionKey::A, OptionKey::B, OptionKey::C, OptionKey::D];

    /// Parses a key from user or file input, ignoring surrounding whitespace and case.
    pub fn parse(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }
}

/// A single trivia question.
///
/// `correct` holds the normalized key text as it came from the source file.
/// Only validated catalogs guarantee that it names one of [`OptionKey::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Question {
    /// Name of the category the question belongs to.
    category: String,
    #[getter(skip)]
    value: i64,
    /// Prompt text.
    prompt: String,
    /// Option text by key.
    options: BTreeMap<OptionKey, String>,
    /// Upper-cased correct key text.
    correct: String,
    #[getter(skip)]
    answered: bool,
}

impl Question {
    /// Creates an unanswered question. Text fields are trimmed and the
    /// correct key is upper-cased.
    pub fn new(
        category: impl Into<String>,
        value: i64,
        prompt: impl Into<String>,
        options: BTreeMap<OptionKey, String>,
        correct: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into().trim().to_string(),
            value,
            prompt: prompt.into().trim().to_string(),
            options: options
                .into_iter()
                .map(|(key, text)| (key, text.trim().to_string()))
                .collect(),
            correct: correct.into().trim().to_uppercase(),
            answered: false,
        }
    }

    /// Point value of the question.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Whether the question has been attempted.
    pub fn answered(&self) -> bool {
        self.answered
    }

    /// The typed correct key, if the stored key text names one.
    pub fn correct_key(&self) -> Option<OptionKey> {
        OptionKey::parse(&self.correct)
    }

    /// Returns the text of the given option.
    pub fn option(&self, key: OptionKey) -> Option<&str> {
        self.options.get(&key).map(String::as_str)
    }

    /// Resolves a raw answer (e.g. `"b"`) to the option text it selects.
    pub fn option_text(&self, given: &str) -> Option<&str> {
        OptionKey::parse(given).and_then(|key| self.option(key))
    }

    /// Compares a given answer to the correct key, ignoring case and whitespace.
    pub fn is_correct(&self, given: &str) -> bool {
        given.trim().eq_ignore_ascii_case(&self.correct)
    }

    pub(crate) fn mark_answered(&mut self) {
        self.answered = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        let options = OptionKey::ALL
            .iter()
            .map(|k| (*k, format!("  option {k} ")))
            .collect();
        Question::new(" Science ", 100, " What is H2O? ", options, " b ")
    }

    #[test]
    fn test_new_trims_and_normalizes() {
        let q = sample();
        assert_eq!(q.category(), "Science");
        assert_eq!(q.prompt(), "What is H2O?");
        assert_eq!(q.correct(), "B");
        assert_eq!(q.option(OptionKey::A), Some("option A"));
        assert!(!q.answered());
    }

    #[test]
    fn test_is_correct_ignores_case() {
        let q = sample();
        assert!(q.is_correct("b"));
        assert!(q.is_correct(" B "));
        assert!(!q.is_correct("A"));
        assert!(!q.is_correct(""));
    }

    #[test]
    fn test_option_text_resolution() {
        let q = sample();
        assert_eq!(q.option_text("c"), Some("option C"));
        assert_eq!(q.option_text("Z"), None);
    }

    #[test]
    fn test_correct_key_rejects_unknown() {
        let options = OptionKey::ALL.iter().map(|k| (*k, k.to_string())).collect();
        let q = Question::new("Math", 200, "1+1?", options, "e");
        assert_eq!(q.correct_key(), None);
    }
}
