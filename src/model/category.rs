//! Question categories.

use super::Question;
use serde::{Deserialize, Serialize};

/// A named column of questions, ordered by point value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    name: String,
    questions: Vec<Question>,
}

impl Category {
    /// Creates an empty category.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            questions: Vec::new(),
        }
    }

    /// Category name as it appeared in the source.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Questions ordered by value.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Inserts a question, keeping value order. Equal values keep insertion
    /// order so duplicates stay visible to validation.
    pub fn add_question(&mut self, question: Question) {
        let at = self
            .questions
            .partition_point(|q| q.value() <= question.value());
        self.questions.insert(at, question);
    }

    /// Finds the question worth `value`.
    pub fn question(&self, value: i64) -> Option<&Question> {
        self.questions.iter().find(|q| q.value() == value)
    }

    pub(crate) fn question_mut(&mut self, value: i64) -> Option<&mut Question> {
        self.questions.iter_mut().find(|q| q.value() == value)
    }

    /// Whether any question is still open.
    pub fn has_available_questions(&self) -> bool {
        self.questions.iter().any(|q| !q.answered())
    }

    /// Values of the questions that are still open.
    pub fn available_values(&self) -> Vec<i64> {
        self.questions
            .iter()
            .filter(|q| !q.answered())
            .map(Question::value)
            .collect()
    }

    /// Case-insensitive name comparison, Unicode-aware like the validator's
    /// duplicate-name rule.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}
