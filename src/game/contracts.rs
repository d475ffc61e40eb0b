//! Contract-based validation for answers.
//!
//! Preconditions are always checked and refuse the answer without touching
//! the session. Postconditions run in debug builds only.

use super::invariants::{InvariantSet, SessionInvariants};
use super::{Answer, AnswerError, GameSession, SessionStatus};
use tracing::{instrument, warn};

/// Preconditions and postconditions of a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), AnswerError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), AnswerError>;
}

/// Precondition: the session accepts answers.
pub struct SessionInProgress;

impl SessionInProgress {
    /// Checks the session status.
    #[instrument(skip(session))]
    pub fn check(session: &GameSession) -> Result<(), AnswerError> {
        match session.status() {
            SessionStatus::InProgress => Ok(()),
            status => Err(AnswerError::NotInProgress(status)),
        }
    }
}

/// Precondition: the question exists and has not been attempted.
pub struct QuestionOpen;

impl QuestionOpen {
    /// Looks the question up in the session catalog.
    #[instrument(skip(session))]
    pub fn check(answer: &Answer, session: &GameSession) -> Result<(), AnswerError> {
        let question = session
            .catalog()
            .and_then(|c| c.question(&answer.category, answer.value))
            .ok_or_else(|| AnswerError::QuestionNotFound {
                category: answer.category.clone(),
                value: answer.value,
            })?;

        if question.answered() {
            Err(AnswerError::AlreadyAnswered {
                category: answer.category.clone(),
                value: answer.value,
            })
        } else {
            Ok(())
        }
    }
}

/// Composite precondition: the session is in progress and the question is open.
pub struct LegalAnswer;

impl LegalAnswer {
    /// Validates all preconditions for an answer.
    #[instrument(skip(session))]
    pub fn check(answer: &Answer, session: &GameSession) -> Result<(), AnswerError> {
        SessionInProgress::check(session)?;
        QuestionOpen::check(answer, session)?;
        Ok(())
    }
}

/// Contract for answers.
///
/// Preconditions:
/// - Session is in progress
/// - Question exists and is unanswered
///
/// Postconditions:
/// - Session invariants hold
/// - Exactly one more question is answered
pub struct AnswerContract;

impl Contract<GameSession, Answer> for AnswerContract {
    fn pre(session: &GameSession, answer: &Answer) -> Result<(), AnswerError> {
        LegalAnswer::check(answer, session)
    }

    fn post(before: &GameSession, after: &GameSession) -> Result<(), AnswerError> {
        SessionInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            AnswerError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })?;

        let answered = |s: &GameSession| s.catalog().map_or(0, |c| c.answered_questions());
        if answered(after) != answered(before) + 1 {
            warn!(
                before = answered(before),
                after = answered(after),
                "Answered count did not advance by one"
            );
            return Err(AnswerError::InvariantViolation(
                "Postcondition failed: exactly one question must be answered".to_string(),
            ));
        }
        Ok(())
    }
}
