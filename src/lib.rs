//! Strictly Trivia - a turn-based multiple-choice trivia engine
//!
//! Question banks are loaded from CSV, JSON or XML into one canonical
//! catalog, validated, then played by a fixed set of players taking turns.
//! Every transition is recorded as an immutable event in an append-only CSV
//! log, and the end-of-game report is rebuilt from those events.
//!
//! # Architecture
//!
//! - **Loader**: format detection and per-format parsing into a [`Catalog`]
//! - **Validation**: composable catalog rules producing a [`ValidatedCatalog`]
//! - **Game**: the [`GameSession`] state machine with contract-checked answers
//! - **Events**: [`GameEvent`] and the shared [`EventLog`]
//! - **Report**: [`ReportGenerator`] rendering the narrative of a finished game
//! - **Engine**: the [`TriviaEngine`] facade used by drivers
//!
//! # Example
//!
//! ```no_run
//! use strictly_trivia::{EngineConfig, TriviaEngine};
//!
//! # fn example() -> Result<(), strictly_trivia::EngineError> {
//! let mut engine = TriviaEngine::new(EngineConfig::default());
//! engine.load_catalog("data/sample_questions.csv")?;
//! engine.start_session(&["Alice", "Bob"])?;
//!
//! let correct = engine.submit_answer("Science", 100, "B")?;
//! engine.advance_turn()?;
//! # let _ = correct;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod engine;
mod events;
mod game;
mod loader;
mod model;
mod report;
mod validation;

// Crate-level exports - Configuration
pub use config::{ConfigError, EngineConfig};

// Crate-level exports - Engine facade
pub use engine::{EngineError, TriviaEngine};

// Crate-level exports - Events
pub use events::{
    Activity, AnswerDetails, AnswerResult, EventLog, GameEvent, LogWriteError, LOG_HEADER,
    SYSTEM_ACTOR,
};

// Crate-level exports - Game session
pub use game::{
    winners, Answer, AnswerContract, AnswerError, Contract, GameSession, Invariant,
    InvariantSet, InvariantViolation, LegalAnswer, Player, PlayerId, ScoresNonNegative,
    ScoringStrategy, SessionInvariants, SessionStatus, SetupError, StandardScoring,
    TurnInBounds, UniquePlayerIds,
};

// Crate-level exports - Loading
pub use loader::{load, DataFormat, FormatError, LoadError, UnsupportedFormatError};

// Crate-level exports - Canonical model
pub use model::{Catalog, Category, CategoryView, OptionKey, Question, ValidatedCatalog};

// Crate-level exports - Reporting
pub use report::{ReportError, ReportGenerator};

// Crate-level exports - Validation
pub use validation::{
    validate, validate_catalog, CatalogRule, CatalogRules, CategoriesNamed, CategoriesPopulated,
    NonEmptyCatalog, RuleSet, UniqueCategoryNames, UniqueQuestionValues, ValidationError,
    WellFormedQuestions,
};
