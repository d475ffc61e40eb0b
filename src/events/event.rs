//! Immutable game events.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Actor recorded for events no player caused.
pub const SYSTEM_ACTOR: &str = "System";

/// What happened.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum Activity {
    /// The validated catalog was attached to the session.
    #[strum(serialize = "Load Questions")]
    LoadQuestions,
    /// A player joined.
    #[strum(serialize = "Join Game")]
    JoinGame,
    /// The session moved to in-progress.
    #[strum(serialize = "Start Game")]
    StartGame,
    /// A player attempted a question.
    #[strum(serialize = "Answer Question")]
    AnswerQuestion,
    /// The turn passed to the next player.
    #[strum(serialize = "Next Turn")]
    NextTurn,
    /// Every question was answered.
    #[strum(serialize = "End Game")]
    EndGame,
    /// An operator ended the session early.
    #[strum(serialize = "Force Finish")]
    ForceFinish,
}

/// Outcome label of an answer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum AnswerResult {
    /// The given key matched.
    Correct,
    /// The given key did not match.
    Incorrect,
}

impl From<bool> for AnswerResult {
    fn from(correct: bool) -> Self {
        if correct {
            AnswerResult::Correct
        } else {
            AnswerResult::Incorrect
        }
    }
}

/// Everything an answer event must carry.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct AnswerDetails {
    /// Category picked.
    pub category: String,
    /// Value picked.
    pub value: i64,
    /// Prompt of the question.
    pub question_text: String,
    /// Option text chosen, or the raw key when it named no option.
    pub answer_given: String,
    /// Correctness.
    pub result: AnswerResult,
    /// Signed score change the scoring strategy applied, before clamping.
    pub points: i64,
    /// Player score after the answer was scored.
    pub score_after: i64,
}

/// One recorded fact about a session. Never mutated once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GameEvent {
    /// Session the event belongs to.
    case_id: String,
    /// Player id, or [`SYSTEM_ACTOR`].
    actor: String,
    /// What happened.
    activity: Activity,
    /// When it was recorded.
    timestamp: DateTime<Utc>,
    /// Category picked, for answers.
    category: Option<String>,
    /// Value picked, for answers.
    question_value: Option<i64>,
    /// Option text chosen, for answers.
    answer_given: Option<String>,
    /// Result label.
    result: Option<String>,
    /// Actor score after the event.
    score_after: Option<i64>,
    /// Signed score change applied, for answers.
    points: Option<i64>,
    /// Prompt of the question, for answers.
    question_text: Option<String>,
}

impl GameEvent {
    /// Creates an event stamped now. A missing actor is recorded as
    /// [`SYSTEM_ACTOR`].
    pub fn new(case_id: impl Into<String>, actor: Option<&str>, activity: Activity) -> Self {
        Self {
            case_id: case_id.into(),
            actor: actor.unwrap_or(SYSTEM_ACTOR).to_string(),
            activity,
            timestamp: Utc::now(),
            category: None,
            question_value: None,
            answer_given: None,
            result: None,
            score_after: None,
            points: None,
            question_text: None,
        }
    }

    /// Creates a system event.
    pub fn system(case_id: impl Into<String>, activity: Activity) -> Self {
        Self::new(case_id, None, activity)
    }

    /// Creates the event for a scored answer.
    pub fn answered(case_id: impl Into<String>, player_id: &str, details: AnswerDetails) -> Self {
        Self {
            category: Some(details.category),
            question_value: Some(details.value),
            answer_given: Some(details.answer_given),
            result: Some(details.result.to_string()),
            score_after: Some(details.score_after),
            points: Some(details.points),
            question_text: Some(details.question_text),
            ..Self::new(case_id, Some(player_id), Activity::AnswerQuestion)
        }
    }

    /// Attaches a result label.
    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    /// Attaches the actor's score.
    pub fn with_score(mut self, score: i64) -> Self {
        self.score_after = Some(score);
        self
    }

    /// Whether this event records an answer.
    pub fn is_answer(&self) -> bool {
        self.activity == Activity::AnswerQuestion
    }

    /// Whether the recorded answer was correct.
    pub fn is_correct(&self) -> bool {
        self.result.as_deref() == Some("Correct")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_actor_is_system() {
        let event = GameEvent::system("GAME1", Activity::StartGame);
        assert_eq!(event.actor(), SYSTEM_ACTOR);
        assert!(event.category().is_none());
    }

    #[test]
    fn test_answered_event_fields() {
        let details = AnswerDetails::new(
            "Science".into(),
            100,
            "What is H2O?".into(),
            "Water".into(),
            AnswerResult::Correct,
            100,
            100,
        );
        let event = GameEvent::answered("GAME1", "P1", details);
        assert_eq!(event.actor(), "P1");
        assert!(event.is_answer());
        assert!(event.is_correct());
        assert_eq!(event.result().as_deref(), Some("Correct"));
        assert_eq!(*event.score_after(), Some(100));
        assert_eq!(*event.points(), Some(100));
    }

    #[test]
    fn test_activity_labels() {
        assert_eq!(Activity::AnswerQuestion.to_string(), "Answer Question");
        assert_eq!("Next Turn".parse::<Activity>().ok(), Some(Activity::NextTurn));
    }
}
