//! Per-question rules.

use super::{CatalogRule, ValidationError};
use crate::model::{Catalog, Category, OptionKey, Question};

/// Rule: every question has a positive value, a prompt, four non-blank
/// options, a correct key among A to D, and belongs to the category that
/// holds it.
pub struct WellFormedQuestions;

impl CatalogRule for WellFormedQuestions {
    fn check(catalog: &Catalog) -> Result<(), ValidationError> {
        for category in catalog.categories() {
            for question in category.questions() {
                check_question(category, question)?;
            }
        }
        Ok(())
    }

    fn description() -> &'static str {
        "Questions have a positive value, text, options A-D and a valid answer key"
    }
}

fn check_question(category: &Category, question: &Question) -> Result<(), ValidationError> {
    let name = || category.name().to_string();
    let value = question.value();

    if question.category() != category.name() {
        return Err(ValidationError::MisfiledQuestion {
            category: name(),
            value,
            declared: question.category().clone(),
        });
    }

    if value <= 0 {
        return Err(ValidationError::NonPositiveValue {
            category: name(),
            value,
        });
    }

    if question.prompt().trim().is_empty() {
        return Err(ValidationError::BlankPrompt {
            category: name(),
            value,
        });
    }

    for key in OptionKey::ALL {
        match question.option(key) {
            None => {
                return Err(ValidationError::MissingOption {
                    category: name(),
                    value,
                    key: key.to_string(),
                });
            }
            Some(text) if text.trim().is_empty() => {
                return Err(ValidationError::BlankOption {
                    category: name(),
                    value,
                    key: key.to_string(),
                });
            }
            Some(_) => {}
        }
    }

    match question.correct_key() {
        Some(key) if question.option(key).is_some() => Ok(()),
        _ => Err(ValidationError::InvalidCorrectKey {
            category: name(),
            value,
            key: question.correct().clone(),
        }),
    }
}
