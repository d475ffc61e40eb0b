//! Session setup errors.

use super::SessionStatus;
use derive_more::Display;

/// The session could not be initialized.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SetupError {
    /// No player names were given.
    #[display("Player names cannot be empty")]
    NoPlayers,

    /// A player name is blank.
    #[display("Player #{} has a blank name", position)]
    BlankPlayerName {
        /// 1-based position in the name list.
        position: usize,
    },

    /// The catalog holds no questions.
    #[display("Game data cannot be empty")]
    EmptyCatalog,

    /// The session already left setup.
    #[display("Session already initialized (status: {})", _0)]
    AlreadyInitialized(SessionStatus),
}

impl std::error::Error for SetupError {}
