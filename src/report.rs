//! End-of-game text report.
//!
//! The report is rebuilt from the recorded answer events and the final
//! player snapshot. Correctness, point changes and scores are displayed
//! exactly as the session recorded them.

use crate::events::GameEvent;
use crate::game::{winners, Player, SessionStatus};
use derive_more::Display;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// The report could not be produced.
#[derive(Debug, Display)]
pub enum ReportError {
    /// Reports are only available once the session is finished.
    #[display("Game is not finished yet (status: {})", _0)]
    NotFinished(SessionStatus),

    /// The report file could not be written.
    #[display("Failed to write report {}: {}", path.display(), source)]
    Io {
        /// Destination that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::Io { source, .. } => Some(source),
            ReportError::NotFinished(_) => None,
        }
    }
}

/// Renders and writes session reports to a fixed destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportGenerator {
    output_dir: PathBuf,
    file_name: String,
}

impl ReportGenerator {
    /// Creates a generator writing `output_dir/file_name`.
    pub fn new(output_dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_name: file_name.into(),
        }
    }

    /// Full path of the report file.
    pub fn destination(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }

    /// Renders the report text.
    ///
    /// Answer events are numbered as turns in recorded order. Every player
    /// appears under final scores; a tie line follows only when more than
    /// one player shares the top score.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NotFinished`] unless `status` is finished.
    #[instrument(skip(self, events, players), fields(events = events.len(), players = players.len()))]
    pub fn render(
        &self,
        case_id: &str,
        status: SessionStatus,
        events: &[GameEvent],
        players: &[Player],
    ) -> Result<String, ReportError> {
        if status != SessionStatus::Finished {
            warn!(%status, "Report requested before the game finished");
            return Err(ReportError::NotFinished(status));
        }

        let out = Narrative {
            case_id,
            events,
            players,
        }
        .to_string();
        debug!(bytes = out.len(), "Report rendered");
        Ok(out)
    }

    /// Renders the report and writes it to [`destination`](Self::destination),
    /// creating the output directory. Returns the written path.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the session is not finished or the file
    /// cannot be written.
    #[instrument(skip(self, events, players), fields(dir = %self.output_dir.display()))]
    pub fn write(
        &self,
        case_id: &str,
        status: SessionStatus,
        events: &[GameEvent],
        players: &[Player],
    ) -> Result<PathBuf, ReportError> {
        let text = self.render(case_id, status, events, players)?;
        let path = self.destination();

        create_parent(&path)?;
        std::fs::write(&path, text).map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), "Report written");
        Ok(path)
    }
}

/// Report text of one finished session.
struct Narrative<'a> {
    case_id: &'a str,
    events: &'a [GameEvent],
    players: &'a [Player],
}

impl Narrative<'_> {
    fn name_of(&self, id: &str) -> String {
        self.players
            .iter()
            .find(|p| p.id() == id)
            .map(|p| p.name().clone())
            .unwrap_or_else(|| id.to_string())
    }
}

impl fmt::Display for Narrative<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TRIVIA GAME REPORT")?;
        writeln!(f, "==================")?;
        writeln!(f)?;
        writeln!(f, "Case ID: {}", self.case_id)?;
        writeln!(f)?;
        let names: Vec<&str> = self.players.iter().map(|p| p.name().as_str()).collect();
        writeln!(f, "Players: {}", names.join(", "))?;
        writeln!(f)?;
        writeln!(f, "Gameplay Summary:")?;
        writeln!(f, "-----------------")?;

        for (turn, event) in self.events.iter().filter(|e| e.is_answer()).enumerate() {
            let player = self.name_of(event.actor());
            writeln!(
                f,
                "Turn {}: {} selected {} for {} pts",
                turn + 1,
                player,
                event.category().as_deref().unwrap_or_default(),
                event.question_value().unwrap_or_default()
            )?;
            writeln!(
                f,
                "Question: {}",
                event.question_text().as_deref().unwrap_or_default()
            )?;
            writeln!(
                f,
                "Answer: {} - {} ({:+} pts)",
                event.answer_given().as_deref().unwrap_or_default(),
                event.result().as_deref().unwrap_or_default(),
                event.points().unwrap_or_default()
            )?;
            writeln!(
                f,
                "Score after turn: {} = {}",
                player,
                event.score_after().unwrap_or_default()
            )?;
            writeln!(f)?;
        }

        writeln!(f, "Final Scores:")?;
        for player in self.players {
            writeln!(f, "{}: {}", player.name(), player.score())?;
        }

        let top = winners(self.players);
        if top.len() > 1 {
            let listed: Vec<String> = top
                .iter()
                .map(|p| format!("{} ({} points)", p.name(), p.score()))
                .collect();
            writeln!(f)?;
            writeln!(f, "It's a tie! Winners: {}", listed.join(", "))?;
        }
        Ok(())
    }
}

fn create_parent(path: &Path) -> Result<(), ReportError> {
    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => std::fs::create_dir_all(parent).map_err(|source| ReportError::Io {
            path: parent.to_path_buf(),
            source,
        }),
        None => Ok(()),
    }
}
