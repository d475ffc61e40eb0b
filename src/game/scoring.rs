//! Scoring strategies.

use std::fmt::Debug;

/// Turns an answer outcome into a signed score change.
///
/// The session clamps the resulting score at zero, so strategies may
/// return any penalty.
pub trait ScoringStrategy: Debug + Send + Sync {
    /// Points awarded (positive) or deducted (negative).
    fn points(&self, value: i64, correct: bool) -> i64;

    /// Display name of the strategy.
    fn name(&self) -> &'static str;
}

/// Full value on a correct answer, full value deducted otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardScoring;

impl ScoringStrategy for StandardScoring {
    fn points(&self, value: i64, correct: bool) -> i64 {
        if correct { value } else { -value }
    }

    fn name(&self) -> &'static str {
        "Standard Scoring"
    }
}
