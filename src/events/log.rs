//! Append-only event log.

use super::{GameEvent, LogWriteError};
use csv::{Writer, WriterBuilder};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};

/// Fixed header row of the event log file.
pub const LOG_HEADER: [&str; 9] = [
    "Case_ID",
    "Player_ID",
    "Activity",
    "Timestamp",
    "Category",
    "Question_Value",
    "Answer_Given",
    "Result",
    "Score_After_Play",
];

/// Ordered, append-only record of game events.
///
/// Events are kept in memory in recorded order and, when a destination
/// file is configured, appended to it one row per event. `record` is the
/// only operation that may be called concurrently: writers are serialized
/// by an internal lock so rows never interleave.
pub struct EventLog {
    path: Option<PathBuf>,
    writer: Mutex<Option<Writer<File>>>,
    history: Mutex<Vec<GameEvent>>,
}

impl EventLog {
    /// Creates a log that also appends to the CSV file at `path`.
    ///
    /// The file is opened on first use; parent directories are created and
    /// the header is written only if the file is empty.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>) -> Self {
        info!("Creating file-backed event log");
        Self {
            path: Some(path.as_ref().to_path_buf()),
            writer: Mutex::new(None),
            history: Mutex::new(Vec::new()),
        }
    }

    /// Creates a log with no file behind it.
    #[instrument]
    pub fn in_memory() -> Self {
        debug!("Creating in-memory event log");
        Self {
            path: None,
            writer: Mutex::new(None),
            history: Mutex::new(Vec::new()),
        }
    }

    /// Destination file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Records one event.
    ///
    /// The event always joins the in-memory history. A file failure is
    /// returned to the caller without touching rows already written; the
    /// file is reopened on the next call.
    ///
    /// # Errors
    ///
    /// Returns [`LogWriteError`] if the destination file cannot be written.
    #[instrument(skip(self, event), fields(case_id = %event.case_id(), activity = %event.activity()))]
    pub fn record(&self, event: GameEvent) -> Result<(), LogWriteError> {
        let mut writer = lock(&self.writer);
        lock(&self.history).push(event.clone());

        let Some(path) = &self.path else {
            debug!("Event recorded in memory");
            return Ok(());
        };

        if writer.is_none() {
            *writer = Some(open(path)?);
        }

        let result = match (*writer).as_mut() {
            Some(w) => append(w, &event),
            None => Err(LogWriteError::new("Event log writer unavailable")),
        };

        if let Err(e) = &result {
            warn!(error = %e, "Dropping event log writer after failure");
            *writer = None;
        } else {
            debug!("Event recorded");
        }
        result
    }

    /// Every recorded event in order.
    pub fn history(&self) -> Vec<GameEvent> {
        lock(&self.history).clone()
    }

    /// Recorded events of one session, in order.
    pub fn events_for(&self, case_id: &str) -> Vec<GameEvent> {
        lock(&self.history)
            .iter()
            .filter(|e| e.case_id() == case_id)
            .cloned()
            .collect()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        lock(&self.history).len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for EventLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLog")
            .field("path", &self.path)
            .field("events", &self.len())
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[instrument(skip(path), fields(path = %path.display()))]
fn open(path: &Path) -> Result<Writer<File>, LogWriteError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let is_new = file.metadata()?.len() == 0;

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    if is_new {
        writer.write_record(LOG_HEADER)?;
        writer.flush()?;
        info!("Wrote event log header");
    }
    Ok(writer)
}

fn append(writer: &mut Writer<File>, event: &GameEvent) -> Result<(), LogWriteError> {
    let optional = |v: &Option<String>| v.clone().unwrap_or_default();
    let number = |v: &Option<i64>| v.map(|n| n.to_string()).unwrap_or_default();

    writer.write_record([
        event.case_id().clone(),
        event.actor().clone(),
        event.activity().to_string(),
        event.timestamp().to_rfc3339(),
        optional(event.category()),
        number(event.question_value()),
        optional(event.answer_given()),
        optional(event.result()),
        number(event.score_after()),
    ])?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Activity, AnswerDetails, AnswerResult};

    #[test]
    fn test_in_memory_keeps_order() {
        let log = EventLog::in_memory();
        log.record(GameEvent::system("G1", Activity::LoadQuestions)).unwrap();
        log.record(GameEvent::system("G2", Activity::StartGame)).unwrap();
        log.record(GameEvent::system("G1", Activity::StartGame)).unwrap();

        assert_eq!(log.len(), 3);
        let g1: Vec<_> = log.events_for("G1").iter().map(|e| *e.activity()).collect();
        assert_eq!(g1, vec![Activity::LoadQuestions, Activity::StartGame]);
    }

    #[test]
    fn test_file_gets_header_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("events.csv");

        let log = EventLog::new(&path);
        log.record(GameEvent::system("G1", Activity::StartGame)).unwrap();
        drop(log);

        let log = EventLog::new(&path);
        log.record(GameEvent::system("G2", Activity::StartGame)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], LOG_HEADER.join(","));
        assert!(lines[1].starts_with("G1,System,Start Game,"));
        assert!(lines[2].starts_with("G2,System,Start Game,"));
    }

    #[test]
    fn test_values_with_delimiters_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.csv");
        let log = EventLog::new(&path);

        let details = AnswerDetails::new(
            "Books, Films".into(),
            200,
            "Who?".into(),
            "Say \"hi\"".into(),
            AnswerResult::Incorrect,
            -200,
            0,
        );
        log.record(GameEvent::answered("G1", "P2", details)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.contains("\"Books, Films\",200,\"Say \"\"hi\"\"\",Incorrect,0"));
    }

    #[test]
    fn test_unwritable_destination_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending.
        let log = EventLog::new(dir.path());
        let result = log.record(GameEvent::system("G1", Activity::StartGame));
        assert!(result.is_err());
        assert_eq!(log.len(), 1);
    }
}
