//! Players and winner determination.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Stable player identifier within a session (`P1`, `P2`, ...).
pub type PlayerId = String;

/// A participant and their running score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Player {
    /// Session-stable identifier.
    id: PlayerId,
    /// Display name.
    name: String,
    #[getter(skip)]
    score: i64,
}

impl Player {
    /// Creates a player with a zero score.
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            score: 0,
        }
    }

    /// Current score, never negative.
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Applies a signed score change, clamping at zero.
    pub(crate) fn apply_points(&mut self, points: i64) {
        self.score = self.score.saturating_add(points).max(0);
    }

    #[cfg(test)]
    pub(crate) fn with_score(mut self, score: i64) -> Self {
        self.score = score;
        self
    }
}

/// Every player at the maximum score. More than one entry is a tie; no
/// players means no winners.
pub fn winners(players: &[Player]) -> Vec<&Player> {
    let Some(best) = players.iter().map(Player::score).max() else {
        return Vec::new();
    };
    players.iter().filter(|p| p.score() == best).collect()
}
