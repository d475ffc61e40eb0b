//! Driver-facing facade over loading, validation, play and reporting.
//!
//! A presentation layer talks only to [`TriviaEngine`]. It must call
//! [`advance_turn`](TriviaEngine::advance_turn) itself after each answer.

use crate::config::EngineConfig;
use crate::events::EventLog;
use crate::game::{AnswerError, GameSession, Player, SetupError};
use crate::loader::{self, LoadError};
use crate::model::{Catalog, CategoryView, ValidatedCatalog};
use crate::report::{ReportError, ReportGenerator};
use crate::validation::{validate_catalog, ValidationError};
use chrono::Utc;
use derive_more::{Display, Error, From};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};

/// Any failure surfaced by the engine.
#[derive(Debug, Display, Error, From)]
pub enum EngineError {
    /// The question bank could not be loaded.
    #[from]
    #[display("{}", _0)]
    Load(LoadError),

    /// The question bank failed validation.
    #[from]
    #[display("{}", _0)]
    Validation(ValidationError),

    /// The session could not start.
    #[from]
    #[display("{}", _0)]
    Setup(SetupError),

    /// The answer was refused.
    #[from]
    #[display("{}", _0)]
    Answer(AnswerError),

    /// The report could not be produced.
    #[from]
    #[display("{}", _0)]
    Report(ReportError),

    /// No catalog has been loaded.
    #[display("No question bank loaded")]
    NoCatalog,

    /// No session has been started.
    #[display("No game session started")]
    NoSession,
}

/// One catalog, at most one active session, one event log.
#[derive(Debug)]
pub struct TriviaEngine {
    config: EngineConfig,
    log: Arc<EventLog>,
    reports: ReportGenerator,
    catalog: Option<ValidatedCatalog>,
    session: Option<GameSession>,
    sessions_started: u64,
}

impl TriviaEngine {
    /// Wires the event log and report generator from `config`.
    #[instrument(skip(config), fields(event_log = %config.event_log_path().display()))]
    pub fn new(config: EngineConfig) -> Self {
        let log = Arc::new(EventLog::new(config.event_log_path()));
        let reports = ReportGenerator::new(config.report_dir(), config.report_file_name());
        Self::with_parts(config, log, reports)
    }

    /// Builds an engine from explicit parts.
    pub fn with_parts(config: EngineConfig, log: Arc<EventLog>, reports: ReportGenerator) -> Self {
        Self {
            config,
            log,
            reports,
            catalog: None,
            session: None,
            sessions_started: 0,
        }
    }

    /// Loads and validates a question bank, replacing any previous one.
    ///
    /// On failure the previously loaded catalog is kept.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Load`] or [`EngineError::Validation`].
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load_catalog(&mut self, path: impl AsRef<Path>) -> Result<&Catalog, EngineError> {
        let catalog = validate_catalog(loader::load(path)?)?;
        info!(questions = catalog.total_questions(), "Question bank ready");
        Ok(&**self.catalog.insert(catalog))
    }

    /// The loaded catalog.
    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_deref()
    }

    /// Starts a new session on a fresh copy of the loaded catalog.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoCatalog`] before a catalog is loaded and
    /// [`EngineError::Setup`] for bad player names.
    #[instrument(skip(self, names), fields(players = names.len()))]
    pub fn start_session<S: AsRef<str>>(&mut self, names: &[S]) -> Result<&GameSession, EngineError> {
        let catalog = self.catalog.clone().ok_or(EngineError::NoCatalog)?;
        // Sequence keeps ids unique when two sessions start in the same millisecond.
        let case_id = format!(
            "{}-{}-{}",
            self.config.case_id_prefix(),
            Utc::now().timestamp_millis(),
            self.sessions_started + 1
        );

        let mut session = GameSession::new(&case_id, Arc::clone(&self.log));
        session.initialize(names, catalog)?;
        self.sessions_started += 1;
        info!(%case_id, "Session started");
        Ok(self.session.insert(session))
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    fn active(&self) -> Result<&GameSession, EngineError> {
        self.session.as_ref().ok_or(EngineError::NoSession)
    }

    fn active_mut(&mut self) -> Result<&mut GameSession, EngineError> {
        self.session.as_mut().ok_or(EngineError::NoSession)
    }

    /// The player whose turn it is.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoSession`] without a session.
    pub fn current_player(&self) -> Result<Option<&Player>, EngineError> {
        Ok(self.active()?.current_player())
    }

    /// Categories with open questions.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoSession`] without a session.
    pub fn list_categories(&self) -> Result<Vec<CategoryView>, EngineError> {
        Ok(self.active()?.available_categories())
    }

    /// The current player answers; returns whether the answer was correct.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Answer`] when the question is missing, already
    /// answered or the session is not in progress. Play can continue.
    #[instrument(skip(self))]
    pub fn submit_answer(
        &mut self,
        category: &str,
        value: i64,
        answer: &str,
    ) -> Result<bool, EngineError> {
        Ok(self.active_mut()?.answer(category, value, answer)?)
    }

    /// Passes the turn to the next player.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoSession`] without a session.
    pub fn advance_turn(&mut self) -> Result<(), EngineError> {
        self.active_mut()?.advance_turn();
        Ok(())
    }

    /// Whether every question has been answered. Finishes the session the
    /// first time this holds.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoSession`] without a session.
    pub fn is_complete(&mut self) -> Result<bool, EngineError> {
        Ok(self.active_mut()?.check_completion())
    }

    /// Ends the session early.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoSession`] without a session.
    pub fn force_finish(&mut self) -> Result<(), EngineError> {
        self.active_mut()?.force_finish();
        Ok(())
    }

    /// Players at the top score.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoSession`] without a session.
    pub fn winners(&self) -> Result<Vec<&Player>, EngineError> {
        Ok(self.active()?.winners())
    }

    /// Writes the report of the finished session and returns its path.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoSession`] without a session and
    /// [`EngineError::Report`] if the session is unfinished or the file
    /// cannot be written.
    #[instrument(skip(self))]
    pub fn generate_report(&self) -> Result<PathBuf, EngineError> {
        let session = self.active()?;
        let path = self.reports.write(
            session.case_id(),
            session.status(),
            &session.events(),
            session.players(),
        )?;
        Ok(path)
    }

    /// The shared event log.
    pub fn log(&self) -> &Arc<EventLog> {
        &self.log
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
