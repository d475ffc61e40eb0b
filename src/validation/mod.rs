//! Catalog validation.
//!
//! Each rule is a first-class type that can be checked and tested on its
//! own. [`CatalogRules`] composes them into the ordered, fail-fast set that
//! runs after every loader, whatever the source format.

mod error;
mod questions;
mod structure;

pub use error::ValidationError;
pub use questions::WellFormedQuestions;
pub use structure::{
    CategoriesNamed, CategoriesPopulated, NonEmptyCatalog, UniqueCategoryNames,
    UniqueQuestionValues,
};

use crate::model::{Catalog, ValidatedCatalog};
use tracing::{info, instrument, warn};

/// A structural rule every catalog must satisfy.
pub trait CatalogRule {
    /// Checks the rule, reporting the first violation found.
    fn check(catalog: &Catalog) -> Result<(), ValidationError>;

    /// Human-readable description of the rule.
    fn description() -> &'static str;
}

/// An ordered set of rules checked together.
///
/// Implemented for tuples; rules run left to right and the first failure
/// stops the check.
pub trait RuleSet {
    /// Checks every rule in order.
    fn check_all(catalog: &Catalog) -> Result<(), ValidationError>;

    /// Descriptions of every rule in order.
    fn descriptions() -> Vec<&'static str>;
}

macro_rules! impl_rule_set {
    ($($rule:ident),+) => {
        impl<$($rule: CatalogRule),+> RuleSet for ($($rule,)+) {
            fn check_all(catalog: &Catalog) -> Result<(), ValidationError> {
                $($rule::check(catalog)?;)+
                Ok(())
            }

            fn descriptions() -> Vec<&'static str> {
                vec![$($rule::description()),+]
            }
        }
    };
}

impl_rule_set!(R1, R2);
impl_rule_set!(R1, R2, R3);
impl_rule_set!(R1, R2, R3, R4);
impl_rule_set!(R1, R2, R3, R4, R5);
impl_rule_set!(R1, R2, R3, R4, R5, R6);

/// Every rule a playable catalog must satisfy, in checking order.
pub type CatalogRules = (
    NonEmptyCatalog,
    CategoriesNamed,
    UniqueCategoryNames,
    CategoriesPopulated,
    WellFormedQuestions,
    UniqueQuestionValues,
);

/// Checks a catalog without modifying it.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found.
#[instrument(skip(catalog), fields(categories = catalog.total_categories()))]
pub fn validate(catalog: &Catalog) -> Result<(), ValidationError> {
    CatalogRules::check_all(catalog).inspect_err(|e| {
        warn!(error = %e, "Catalog rejected");
    })
}

/// Validates a catalog and seals it for use by a game session.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found.
#[instrument(skip(catalog), fields(categories = catalog.total_categories()))]
pub fn validate_catalog(catalog: Catalog) -> Result<ValidatedCatalog, ValidationError> {
    validate(&catalog)?;
    info!(
        categories = catalog.total_categories(),
        questions = catalog.total_questions(),
        "Catalog validated"
    );
    Ok(ValidatedCatalog::new_unchecked(catalog))
}

impl TryFrom<Catalog> for ValidatedCatalog {
    type Error = ValidationError;

    fn try_from(catalog: Catalog) -> Result<Self, Self::Error> {
        validate_catalog(catalog)
    }
}
