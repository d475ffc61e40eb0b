//! Turn-based game session.
//!
//! [`GameSession`] owns the players, the turn index, the validated catalog
//! and the scoring strategy. Every transition is recorded in the shared
//! [`EventLog`](crate::events::EventLog).

mod action;
mod contracts;
mod error;
mod invariants;
mod player;
mod scoring;
mod session;

pub use action::{Answer, AnswerError};
pub use contracts::{AnswerContract, Contract, LegalAnswer};
pub use error::SetupError;
pub use invariants::{
    Invariant, InvariantSet, InvariantViolation, ScoresNonNegative, SessionInvariants,
    TurnInBounds, UniquePlayerIds,
};
pub use player::{winners, Player, PlayerId};
pub use scoring::{ScoringStrategy, StandardScoring};
pub use session::{GameSession, SessionStatus};
