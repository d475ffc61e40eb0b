//! Engine configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Where the engine writes its log and report, and how it names sessions.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct EngineConfig {
    /// CSV event log destination.
    #[serde(default = "default_event_log_path")]
    event_log_path: PathBuf,

    /// Directory the report is written into.
    #[serde(default = "default_report_dir")]
    report_dir: PathBuf,

    /// Report file name inside `report_dir`.
    #[serde(default = "default_report_file_name")]
    report_file_name: String,

    /// Prefix of generated case ids.
    #[serde(default = "default_case_id_prefix")]
    case_id_prefix: String,
}

#[instrument]
fn default_event_log_path() -> PathBuf {
    PathBuf::from("logs/game_event_log.csv")
}

#[instrument]
fn default_report_dir() -> PathBuf {
    PathBuf::from("report")
}

#[instrument]
fn default_report_file_name() -> String {
    "summary_report.txt".to_string()
}

#[instrument]
fn default_case_id_prefix() -> String {
    "GAME".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            event_log_path: default_event_log_path(),
            report_dir: default_report_dir(),
            report_file_name: default_report_file_name(),
            case_id_prefix: default_case_id_prefix(),
        }
    }
}

impl EngineConfig {
    /// Creates a configuration with explicit destinations and the default prefix.
    pub fn new(event_log_path: impl Into<PathBuf>, report_dir: impl Into<PathBuf>) -> Self {
        Self {
            event_log_path: event_log_path.into(),
            report_dir: report_dir.into(),
            ..Self::default()
        }
    }

    /// Replaces the case id prefix.
    pub fn with_case_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.case_id_prefix = prefix.into();
        self
    }

    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            event_log = %config.event_log_path.display(),
            report_dir = %config.report_dir.display(),
            "Config loaded successfully"
        );
        Ok(config)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
