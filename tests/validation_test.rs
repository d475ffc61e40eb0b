//! Tests for catalog validation rules.

mod common;

use common::question;
use strictly_trivia::{
    validate, validate_catalog, Catalog, Question, ValidatedCatalog, ValidationError,
};

#[test]
fn test_fixture_passes() {
    let validated = validate_catalog(common::catalog()).expect("valid catalog");
    assert_eq!(validated.total_questions(), 4);
}

#[test]
fn test_empty_catalog_rejected() {
    assert_eq!(validate(&Catalog::new()), Err(ValidationError::EmptyCatalog));
}

#[test]
fn test_duplicate_value_rejected() {
    let mut catalog = common::catalog();
    catalog.add_question(question("Science", 100));
    assert!(matches!(
        validate(&catalog),
        Err(ValidationError::DuplicateValue { value: 100, .. })
    ));
}

#[test]
fn test_duplicate_name_differing_in_case_rejected() {
    let mut catalog = common::catalog();
    catalog.add_question(question("science", 300));
    assert!(matches!(
        validate(&catalog),
        Err(ValidationError::DuplicateCategory { .. })
    ));
}

#[test]
fn test_invalid_correct_key_rejected() {
    let template = question("Art", 100);
    let q = Question::new("Art", 100, "Art for 100?", template.options().clone(), "e");
    let mut catalog = common::catalog();
    catalog.add_question(q);
    let err = validate(&catalog).expect_err("E is not a key");
    assert!(matches!(err, ValidationError::InvalidCorrectKey { ref key, .. } if key == "E"));
    assert!(err.to_string().contains("must be A, B, C or D"));
}

#[test]
fn test_try_from_seals_catalog() {
    let sealed = ValidatedCatalog::try_from(common::catalog()).expect("valid catalog");
    assert_eq!(sealed.into_inner(), common::catalog());
}
