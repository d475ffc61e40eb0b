//! The game session state machine.

use super::contracts::{AnswerContract, Contract};
use super::{winners, Answer, AnswerError, Player, ScoringStrategy, SetupError, StandardScoring};
use crate::events::{Activity, AnswerDetails, EventLog, GameEvent};
use crate::model::{Catalog, CategoryView, ValidatedCatalog};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum::{Display, EnumString};
use tracing::{debug, info, instrument, warn};

/// Lifecycle of a session. Transitions only move forward.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
pub enum SessionStatus {
    /// Waiting for players and a catalog.
    Setup,
    /// Accepting answers.
    InProgress,
    /// Terminal.
    Finished,
}

/// One run of the game from initialization to finish.
///
/// Not designed for concurrent callers: drive it from one place (a single
/// event loop or a mutex around it). Only the shared event log is safe to
/// record into from several threads.
#[derive(Debug, Clone)]
pub struct GameSession {
    case_id: String,
    status: SessionStatus,
    players: Vec<Player>,
    turn: usize,
    catalog: Option<ValidatedCatalog>,
    scoring: Arc<dyn ScoringStrategy>,
    log: Arc<EventLog>,
    turns_taken: usize,
    log_failures: usize,
}

impl GameSession {
    /// Creates a session in setup, recording into `log`.
    #[instrument(skip(case_id, log), fields(case_id = %case_id.as_ref()))]
    pub fn new(case_id: impl AsRef<str>, log: Arc<EventLog>) -> Self {
        info!("Creating new game session");
        Self {
            case_id: case_id.as_ref().to_string(),
            status: SessionStatus::Setup,
            players: Vec::new(),
            turn: 0,
            catalog: None,
            scoring: Arc::new(StandardScoring),
            log,
            turns_taken: 0,
            log_failures: 0,
        }
    }

    /// Replaces the scoring strategy.
    pub fn with_scoring(mut self, scoring: Arc<dyn ScoringStrategy>) -> Self {
        self.scoring = scoring;
        self
    }

    /// Adds the players (ids `P1`, `P2`, ... in the given order), attaches
    /// the catalog and starts the game.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] for an empty or blank name list, an empty
    /// catalog, or a session that already left setup. The session is left
    /// unchanged on error.
    #[instrument(skip(self, names, catalog), fields(case_id = %self.case_id, players = names.len()))]
    pub fn initialize<S: AsRef<str>>(
        &mut self,
        names: &[S],
        catalog: ValidatedCatalog,
    ) -> Result<(), SetupError> {
        if self.status != SessionStatus::Setup {
            warn!(status = %self.status, "Session already initialized");
            return Err(SetupError::AlreadyInitialized(self.status));
        }
        if names.is_empty() {
            return Err(SetupError::NoPlayers);
        }
        if let Some(i) = names.iter().position(|n| n.as_ref().trim().is_empty()) {
            return Err(SetupError::BlankPlayerName { position: i + 1 });
        }
        if catalog.is_empty() || catalog.total_questions() == 0 {
            return Err(SetupError::EmptyCatalog);
        }

        let summary = format!(
            "{} categories, {} questions",
            catalog.total_categories(),
            catalog.total_questions()
        );
        self.catalog = Some(catalog);
        self.record(GameEvent::system(&self.case_id, Activity::LoadQuestions).with_result(summary));

        self.players = names
            .iter()
            .enumerate()
            .map(|(i, name)| Player::new(format!("P{}", i + 1), name.as_ref().trim()))
            .collect();
        for i in 0..self.players.len() {
            let player = &self.players[i];
            let event = GameEvent::new(&self.case_id, Some(player.id()), Activity::JoinGame)
                .with_result(player.name().clone())
                .with_score(player.score());
            self.record(event);
        }

        self.turn = 0;
        self.status = SessionStatus::InProgress;
        self.record(GameEvent::system(&self.case_id, Activity::StartGame).with_result("Success"));

        info!(players = self.players.len(), "Game started");
        Ok(())
    }

    /// The current player answers the question at `category`/`value`.
    ///
    /// Returns whether the answer was correct. The turn does not advance;
    /// call [`advance_turn`](Self::advance_turn) afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`AnswerError`] when the session is not in progress or the
    /// question is missing or already answered. Nothing changes in that case.
    #[instrument(skip(self), fields(case_id = %self.case_id))]
    pub fn answer(&mut self, category: &str, value: i64, given: &str) -> Result<bool, AnswerError> {
        let action = Answer::new(category, value, given);

        #[cfg(debug_assertions)]
        let before = self.clone();

        AnswerContract::pre(self, &action).inspect_err(|e| {
            warn!(error = %e, "Answer refused");
        })?;

        let Some(player) = self.players.get(self.turn) else {
            return Err(AnswerError::InvariantViolation(
                "No player holds the turn".to_string(),
            ));
        };
        let player_id = player.id().clone();

        let not_found = || AnswerError::QuestionNotFound {
            category: category.to_string(),
            value,
        };
        let question = self
            .catalog
            .as_mut()
            .and_then(|c| c.question_mut(category, value))
            .ok_or_else(not_found)?;

        let correct = question.is_correct(given);
        question.mark_answered();
        let answer_given = question
            .option_text(given)
            .unwrap_or_else(|| given.trim())
            .to_string();
        let category_name = question.category().clone();
        let prompt = question.prompt().clone();

        let points = self.scoring.points(value, correct);
        let score_after = match self.players.get_mut(self.turn) {
            Some(player) => {
                player.apply_points(points);
                player.score()
            }
            None => 0,
        };
        self.turns_taken += 1;

        let details = AnswerDetails::new(
            category_name,
            value,
            prompt,
            answer_given,
            correct.into(),
            points,
            score_after,
        );
        self.record(GameEvent::answered(&self.case_id, &player_id, details));

        info!(player = %player_id, correct, points, score_after, "Answer scored");

        #[cfg(debug_assertions)]
        AnswerContract::post(&before, self)?;

        Ok(correct)
    }

    /// Passes the turn to the next player, wrapping around.
    ///
    /// No-op unless the session is in progress.
    #[instrument(skip(self), fields(case_id = %self.case_id))]
    pub fn advance_turn(&mut self) {
        if self.status != SessionStatus::InProgress || self.players.is_empty() {
            debug!(status = %self.status, "Turn unchanged");
            return;
        }
        self.turn = (self.turn + 1) % self.players.len();
        let player = &self.players[self.turn];
        let event = GameEvent::new(&self.case_id, Some(player.id()), Activity::NextTurn)
            .with_score(player.score());
        debug!(turn = self.turn, player = %player.id(), "Turn advanced");
        self.record(event);
    }

    /// Finishes the session if every question is answered.
    ///
    /// Returns true when all questions are answered. Otherwise returns false
    /// and leaves the status alone.
    #[instrument(skip(self), fields(case_id = %self.case_id))]
    pub fn check_completion(&mut self) -> bool {
        let complete = self.catalog.as_ref().is_some_and(|c| c.all_answered());
        if !complete {
            return false;
        }
        if self.status != SessionStatus::Finished {
            self.status = SessionStatus::Finished;
            let event =
                GameEvent::system(&self.case_id, Activity::EndGame).with_result(self.outcome());
            self.record(event);
            info!(outcome = %self.outcome(), "Game finished");
        }
        true
    }

    /// Ends the session now, whatever questions remain.
    #[instrument(skip(self), fields(case_id = %self.case_id))]
    pub fn force_finish(&mut self) {
        if self.status == SessionStatus::Finished {
            debug!("Session already finished");
            return;
        }
        self.status = SessionStatus::Finished;
        let event =
            GameEvent::system(&self.case_id, Activity::ForceFinish).with_result(self.outcome());
        self.record(event);
        info!(outcome = %self.outcome(), "Game force-finished");
    }

    /// Players at the maximum score. More than one means a tie.
    pub fn winners(&self) -> Vec<&Player> {
        winners(&self.players)
    }

    /// Outcome line: `Winner: NAME`, `Tie: A, B` or `No winners`.
    pub fn outcome(&self) -> String {
        let winners = self.winners();
        match winners.as_slice() {
            [] => "No winners".to_string(),
            [winner] => format!("Winner: {}", winner.name()),
            tied => format!(
                "Tie: {}",
                tied.iter()
                    .map(|p| p.name().as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    /// Session identifier used as the event case id.
    pub fn case_id(&self) -> &str {
        &self.case_id
    }

    /// Current lifecycle status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Players in turn order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Index of the player whose turn it is.
    pub fn turn_index(&self) -> usize {
        self.turn
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.turn)
    }

    /// The attached catalog, once initialized.
    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_deref()
    }

    /// Board snapshot of the categories that still have open questions.
    pub fn available_categories(&self) -> Vec<CategoryView> {
        self.catalog
            .as_ref()
            .map(|c| {
                c.available_categories()
                    .into_iter()
                    .map(CategoryView::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of answers scored.
    pub fn turns_taken(&self) -> usize {
        self.turns_taken
    }

    /// Number of events that could not be written to the log file.
    pub fn log_failures(&self) -> usize {
        self.log_failures
    }

    /// Name of the scoring strategy in use.
    pub fn scoring_name(&self) -> &'static str {
        self.scoring.name()
    }

    /// The shared event log.
    pub fn log(&self) -> &Arc<EventLog> {
        &self.log
    }

    /// This session's recorded events, in order.
    pub fn events(&self) -> Vec<GameEvent> {
        self.log.events_for(&self.case_id)
    }

    /// Short multi-line description of the session.
    pub fn summary(&self) -> String {
        format!(
            "Game ID: {}\nPlayers: {}\nTotal Turns: {}\nGame State: {}\nScoring: {}",
            self.case_id,
            self.players.len(),
            self.turns_taken,
            self.status,
            self.scoring.name()
        )
    }

    /// Records an event. Log failures are reported and counted, never raised.
    fn record(&mut self, event: GameEvent) {
        if let Err(e) = self.log.record(event) {
            self.log_failures += 1;
            warn!(error = %e, failures = self.log_failures, "Event log write failed; continuing");
        }
    }

    #[cfg(test)]
    pub(crate) fn set_turn_index_unchecked(&mut self, turn: usize) {
        self.turn = turn;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{fixtures, validate_catalog};

    fn started(names: &[&str]) -> GameSession {
        let mut session = GameSession::new("GAME-S", Arc::new(EventLog::in_memory()));
        session
            .initialize(names, validate_catalog(fixtures::catalog()).unwrap())
            .unwrap();
        session
    }

    #[test]
    fn test_initialize_assigns_ids_in_order() {
        let session = started(&["Alice", " Bob "]);
        let ids: Vec<_> = session.players().iter().map(|p| p.id().as_str()).collect();
        assert_eq!(ids, vec!["P1", "P2"]);
        assert_eq!(session.players()[1].name(), "Bob");
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert_eq!(session.current_player().map(|p| p.id().as_str()), Some("P1"));
    }

    #[test]
    fn test_initialize_records_setup_events() {
        let session = started(&["Alice", "Bob"]);
        let activities: Vec<_> = session.events().iter().map(|e| *e.activity()).collect();
        assert_eq!(
            activities,
            vec![
                Activity::LoadQuestions,
                Activity::JoinGame,
                Activity::JoinGame,
                Activity::StartGame
            ]
        );
    }

    #[test]
    fn test_initialize_rejects_empty_names() {
        let mut session = GameSession::new("GAME-S", Arc::new(EventLog::in_memory()));
        let names: [&str; 0] = [];
        let result = session.initialize(&names, validate_catalog(fixtures::catalog()).unwrap());
        assert_eq!(result, Err(SetupError::NoPlayers));
        assert_eq!(session.status(), SessionStatus::Setup);
    }

    #[test]
    fn test_initialize_twice_rejected() {
        let mut session = started(&["Alice"]);
        let result = session.initialize(&["Bob"], validate_catalog(fixtures::catalog()).unwrap());
        assert_eq!(
            result,
            Err(SetupError::AlreadyInitialized(SessionStatus::InProgress))
        );
    }

    #[test]
    fn test_answer_does_not_advance_turn() {
        let mut session = started(&["Alice", "Bob"]);
        assert!(session.answer("Science", 100, "a").unwrap());
        assert_eq!(session.turn_index(), 0);
        assert_eq!(session.players()[0].score(), 100);
    }

    #[test]
    fn test_incorrect_answer_clamps_at_zero() {
        let mut session = started(&["Alice"]);
        assert!(!session.answer("Math", 200, "D").unwrap());
        assert_eq!(session.players()[0].score(), 0);
    }

    #[test]
    fn test_second_answer_refused_without_changes() {
        let mut session = started(&["Alice"]);
        session.answer("Science", 100, "A").unwrap();
        let events = session.events().len();

        let result = session.answer("Science", 100, "B");
        assert!(matches!(result, Err(AnswerError::AlreadyAnswered { .. })));
        assert_eq!(session.players()[0].score(), 100);
        assert_eq!(session.events().len(), events);
        assert_eq!(session.turns_taken(), 1);
    }

    #[test]
    fn test_answer_event_resolves_option_text() {
        let mut session = started(&["Alice"]);
        session.answer("science", 200, "c").unwrap();
        let event = session.events().into_iter().last().unwrap();
        assert_eq!(event.category().as_deref(), Some("Science"));
        assert_eq!(event.answer_given().as_deref(), Some("Science 200 C"));
        assert_eq!(event.result().as_deref(), Some("Incorrect"));
    }

    #[test]
    fn test_unknown_key_logged_raw() {
        let mut session = started(&["Alice"]);
        assert!(!session.answer("Science", 200, " zz ").unwrap());
        let event = session.events().into_iter().last().unwrap();
        assert_eq!(event.answer_given().as_deref(), Some("zz"));
    }

    #[test]
    fn test_advance_turn_wraps() {
        let mut session = started(&["Alice", "Bob", "Cara"]);
        session.advance_turn();
        session.advance_turn();
        assert_eq!(session.turn_index(), 2);
        session.advance_turn();
        assert_eq!(session.turn_index(), 0);
    }

    #[test]
    fn test_advance_turn_without_players_is_noop() {
        let mut session = GameSession::new("GAME-S", Arc::new(EventLog::in_memory()));
        session.advance_turn();
        assert_eq!(session.turn_index(), 0);
        assert!(session.events().is_empty());
    }

    #[test]
    fn test_force_finish_is_terminal() {
        let mut session = started(&["Alice"]);
        session.force_finish();
        session.force_finish();
        assert_eq!(session.status(), SessionStatus::Finished);
        assert!(matches!(
            session.answer("Science", 100, "A"),
            Err(AnswerError::NotInProgress(SessionStatus::Finished))
        ));
        let finishes = session
            .events()
            .iter()
            .filter(|e| *e.activity() == Activity::ForceFinish)
            .count();
        assert_eq!(finishes, 1);
        assert!(!session.check_completion());
        assert_eq!(session.status(), SessionStatus::Finished);
    }

    #[test]
    fn test_custom_scoring_strategy() {
        #[derive(Debug)]
        struct NoPenalty;
        impl ScoringStrategy for NoPenalty {
            fn points(&self, value: i64, correct: bool) -> i64 {
                if correct { value * 2 } else { 0 }
            }
            fn name(&self) -> &'static str {
                "No Penalty"
            }
        }

        let mut session = GameSession::new("GAME-S", Arc::new(EventLog::in_memory()))
            .with_scoring(Arc::new(NoPenalty));
        session
            .initialize(&["Alice"], validate_catalog(fixtures::catalog()).unwrap())
            .unwrap();
        session.answer("Science", 100, "A").unwrap();
        assert_eq!(session.players()[0].score(), 200);
        assert!(session.summary().contains("Scoring: No Penalty"));
    }

    #[test]
    fn test_outcome_labels() {
        let mut session = started(&["Alice", "Bob"]);
        assert_eq!(session.outcome(), "Tie: Alice, Bob");
        session.answer("Science", 100, "A").unwrap();
        assert_eq!(session.outcome(), "Winner: Alice");
    }
}
