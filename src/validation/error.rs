//! Validation error type.

use derive_more::{Display, Error};

/// A catalog invariant was violated.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ValidationError {
    /// The catalog has no categories.
    #[display("Catalog is empty: no categories found")]
    EmptyCatalog,

    /// A category has a blank name.
    #[display("Category #{} has no name", position)]
    UnnamedCategory {
        /// 1-based category position.
        position: usize,
    },

    /// Two categories share a name, ignoring case.
    #[display("Duplicate category name: '{}'", name)]
    DuplicateCategory {
        /// The second occurrence.
        name: String,
    },

    /// A category has no questions.
    #[display("Category '{}' has no questions", category)]
    EmptyCategory {
        /// Category at fault.
        category: String,
    },

    /// Two questions in one category share a value.
    #[display("Category '{}' has repeated question value {}", category, value)]
    DuplicateValue {
        /// Category at fault.
        category: String,
        /// Repeated value.
        value: i64,
    },

    /// A question's value is zero or negative.
    #[display("Question in '{}' has invalid value {}", category, value)]
    NonPositiveValue {
        /// Category at fault.
        category: String,
        /// Offending value.
        value: i64,
    },

    /// A question's own category field disagrees with its category.
    #[display(
        "Question {} in '{}' claims category '{}'",
        value,
        category,
        declared
    )]
    MisfiledQuestion {
        /// Category holding the question.
        category: String,
        /// Question value.
        value: i64,
        /// Category named by the question itself.
        declared: String,
    },

    /// A question has no prompt text.
    #[display("Question {} in '{}' has no text", value, category)]
    BlankPrompt {
        /// Category at fault.
        category: String,
        /// Question value.
        value: i64,
    },

    /// A question lacks one of the four options.
    #[display("Question {} in '{}' is missing option {}", value, category, key)]
    MissingOption {
        /// Category at fault.
        category: String,
        /// Question value.
        value: i64,
        /// Missing key.
        key: String,
    },

    /// An option's text is blank.
    #[display("Option {} of question {} in '{}' cannot be empty", key, value, category)]
    BlankOption {
        /// Category at fault.
        category: String,
        /// Question value.
        value: i64,
        /// Blank key.
        key: String,
    },

    /// The correct answer is not one of A, B, C or D.
    #[display(
        "Invalid correct option '{}' for question {} in '{}': must be A, B, C or D",
        key,
        value,
        category
    )]
    InvalidCorrectKey {
        /// Category at fault.
        category: String,
        /// Question value.
        value: i64,
        /// Rejected key text.
        key: String,
    },
}
