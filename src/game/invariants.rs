//! First-class session invariants.
//!
//! Invariants are logical properties that must hold after every
//! transition. They are checked in debug builds and tested independently.

use super::GameSession;
use std::collections::HashSet;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together, collecting every violation.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = match <(I1, I2)>::check_all(state) {
            Ok(()) => Vec::new(),
            Err(v) => v,
        };

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: no player's score is negative.
pub struct ScoresNonNegative;

impl Invariant<GameSession> for ScoresNonNegative {
    fn holds(session: &GameSession) -> bool {
        session.players().iter().all(|p| p.score() >= 0)
    }

    fn description() -> &'static str {
        "Player scores are never negative"
    }
}

/// Invariant: the turn index points at a player (or is zero with no players).
pub struct TurnInBounds;

impl Invariant<GameSession> for TurnInBounds {
    fn holds(session: &GameSession) -> bool {
        let count = session.players().len();
        if count == 0 {
            session.turn_index() == 0
        } else {
            session.turn_index() < count
        }
    }

    fn description() -> &'static str {
        "Turn index is within the player list"
    }
}

/// Invariant: player ids are unique.
pub struct UniquePlayerIds;

impl Invariant<GameSession> for UniquePlayerIds {
    fn holds(session: &GameSession) -> bool {
        let mut seen = HashSet::new();
        session.players().iter().all(|p| seen.insert(p.id().as_str()))
    }

    fn description() -> &'static str {
        "Player ids are unique within the session"
    }
}

/// All session invariants as a composable set.
pub type SessionInvariants = (ScoresNonNegative, TurnInBounds, UniquePlayerIds);
