//! Catalog-level structural rules.

use super::{CatalogRule, ValidationError};
use crate::model::Catalog;
use std::collections::HashSet;

/// Rule: the catalog has at least one category.
pub struct NonEmptyCatalog;

impl CatalogRule for NonEmptyCatalog {
    fn check(catalog: &Catalog) -> Result<(), ValidationError> {
        if catalog.is_empty() {
            Err(ValidationError::EmptyCatalog)
        } else {
            Ok(())
        }
    }

    fn description() -> &'static str {
        "Catalog has at least one category"
    }
}

/// Rule: every category has a non-blank name.
pub struct CategoriesNamed;

impl CatalogRule for CategoriesNamed {
    fn check(catalog: &Catalog) -> Result<(), ValidationError> {
        match catalog
            .categories()
            .iter()
            .position(|c| c.name().trim().is_empty())
        {
            Some(i) => Err(ValidationError::UnnamedCategory { position: i + 1 }),
            None => Ok(()),
        }
    }

    fn description() -> &'static str {
        "Every category has a name"
    }
}

/// Rule: category names are unique, ignoring case.
pub struct UniqueCategoryNames;

impl CatalogRule for UniqueCategoryNames {
    fn check(catalog: &Catalog) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for category in catalog.categories() {
            if !seen.insert(category.name().to_lowercase()) {
                return Err(ValidationError::DuplicateCategory {
                    name: category.name().to_string(),
                });
            }
        }
        Ok(())
    }

    fn description() -> &'static str {
        "Category names are unique (case-insensitive)"
    }
}

/// Rule: every category holds at least one question.
pub struct CategoriesPopulated;

impl CatalogRule for CategoriesPopulated {
    fn check(catalog: &Catalog) -> Result<(), ValidationError> {
        match catalog
            .categories()
            .iter()
            .find(|c| c.questions().is_empty())
        {
            Some(category) => Err(ValidationError::EmptyCategory {
                category: category.name().to_string(),
            }),
            None => Ok(()),
        }
    }

    fn description() -> &'static str {
        "Every category has at least one question"
    }
}

/// Rule: no two questions in a category share a value.
pub struct UniqueQuestionValues;

impl CatalogRule for UniqueQuestionValues {
    fn check(catalog: &Catalog) -> Result<(), ValidationError> {
        for category in catalog.categories() {
            let mut seen = HashSet::new();
            for question in category.questions() {
                if !seen.insert(question.value()) {
                    return Err(ValidationError::DuplicateValue {
                        category: category.name().to_string(),
                        value: question.value(),
                    });
                }
            }
        }
        Ok(())
    }

    fn description() -> &'static str {
        "Question values are unique within a category"
    }
}
