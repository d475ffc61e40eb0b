//! Event sourcing for game sessions.
//!
//! Every state transition becomes an immutable [`GameEvent`]. The
//! [`EventLog`] keeps them in recorded order and mirrors them to an
//! append-only CSV file.

mod error;
mod event;
mod log;

pub use error::LogWriteError;
pub use event::{Activity, AnswerDetails, AnswerResult, GameEvent, SYSTEM_ACTOR};
pub use log::{EventLog, LOG_HEADER};
