//! The answer action.
//!
//! An answer is a first-class value so contracts can reason about it before
//! the session applies it.

use super::SessionStatus;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// The current player picking `category`/`value` and answering `given`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Answer {
    /// Category picked.
    pub category: String,
    /// Value picked.
    pub value: i64,
    /// Raw answer key (e.g. `"b"`).
    pub given: String,
}

impl Answer {
    /// Creates an answer.
    pub fn new(category: impl Into<String>, value: i64, given: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            value,
            given: given.into(),
        }
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} for {} -> {}", self.category, self.value, self.given)
    }
}

/// Why an answer was refused. Refusals leave the session untouched.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum AnswerError {
    /// The session is not accepting answers.
    #[display("Game is not in progress (status: {})", _0)]
    NotInProgress(SessionStatus),

    /// No question has that category and value.
    #[display("Question not found: {} - {}", category, value)]
    QuestionNotFound {
        /// Requested category.
        category: String,
        /// Requested value.
        value: i64,
    },

    /// The question was already attempted.
    #[display("Question already answered: {} - {}", category, value)]
    AlreadyAnswered {
        /// Requested category.
        category: String,
        /// Requested value.
        value: i64,
    },

    /// A postcondition failed after the answer was applied.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for AnswerError {}
