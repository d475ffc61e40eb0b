//! The catalog root and its validated form.

use super::{Category, Question};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// All categories loaded from one question bank, in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog by grouping questions on their category name.
    pub fn from_questions(questions: impl IntoIterator<Item = Question>) -> Self {
        let mut catalog = Self::new();
        for question in questions {
            catalog.add_question(question);
        }
        catalog
    }

    /// Adds a question to the category with exactly the same name, creating
    /// the category on first sight.
    pub fn add_question(&mut self, question: Question) {
        match self
            .categories
            .iter_mut()
            .find(|c| c.name() == question.category())
        {
            Some(category) => category.add_question(question),
            None => {
                let mut category = Category::new(question.category().clone());
                category.add_question(question);
                self.categories.push(category);
            }
        }
    }

    /// Adds a whole category as-is.
    pub fn add_category(&mut self, category: Category) {
        self.categories.push(category);
    }

    /// Categories in load order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Looks up a category by name, ignoring case.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.is_named(name))
    }

    /// Looks up a question by category name and value.
    pub fn question(&self, category: &str, value: i64) -> Option<&Question> {
        self.category(category).and_then(|c| c.question(value))
    }

    pub(crate) fn question_mut(&mut self, category: &str, value: i64) -> Option<&mut Question> {
        self.categories
            .iter_mut()
            .find(|c| c.is_named(category))
            .and_then(|c| c.question_mut(value))
    }

    /// Number of categories.
    pub fn total_categories(&self) -> usize {
        self.categories.len()
    }

    /// Number of questions across all categories.
    pub fn total_questions(&self) -> usize {
        self.categories.iter().map(|c| c.questions().len()).sum()
    }

    /// Number of questions already attempted.
    pub fn answered_questions(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| c.questions())
            .filter(|q| q.answered())
            .count()
    }

    /// True when there are no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// True when every question has been attempted.
    pub fn all_answered(&self) -> bool {
        self.categories
            .iter()
            .all(|c| !c.has_available_questions())
    }

    /// Categories that still have open questions.
    pub fn available_categories(&self) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|c| c.has_available_questions())
            .collect()
    }

    /// Owned snapshot of the board for drivers.
    pub fn board(&self) -> Vec<CategoryView> {
        self.categories.iter().map(CategoryView::from).collect()
    }
}

/// A catalog that has passed every validation rule.
///
/// Only [`crate::validation::validate_catalog`] produces one, so a session
/// holding it can rely on unique names, unique values and well-formed
/// questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCatalog(Catalog);

impl ValidatedCatalog {
    pub(crate) fn new_unchecked(catalog: Catalog) -> Self {
        Self(catalog)
    }

    /// Unwraps the catalog.
    pub fn into_inner(self) -> Catalog {
        self.0
    }

    pub(crate) fn question_mut(&mut self, category: &str, value: i64) -> Option<&mut Question> {
        self.0.question_mut(category, value)
    }
}

impl Deref for ValidatedCatalog {
    type Target = Catalog;

    fn deref(&self) -> &Catalog {
        &self.0
    }
}

/// Read-only view of one category for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryView {
    /// Category name.
    pub name: String,
    /// `(value, answered)` pairs in value order.
    pub values: Vec<(i64, bool)>,
}

impl CategoryView {
    /// Values that can still be picked.
    pub fn open_values(&self) -> Vec<i64> {
        self.values
            .iter()
            .filter(|(_, answered)| !answered)
            .map(|(value, _)| *value)
            .collect()
    }
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name().to_string(),
            values: category
                .questions()
                .iter()
                .map(|q| (q.value(), q.answered()))
                .collect(),
        }
    }
}
