//! Command-line interface for strictly_trivia.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Trivia - turn-based multiple-choice trivia with an audit log
#[derive(Parser, Debug)]
#[command(name = "strictly_trivia")]
#[command(about = "Turn-based trivia engine with event-sourced reports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load and validate a question bank without playing
    Validate {
        /// Question bank (.csv, .json or .xml)
        file: PathBuf,
    },

    /// Play a game in the terminal
    Play {
        /// Question bank (.csv, .json or .xml)
        file: PathBuf,

        /// Player name, in turn order (repeat for each player)
        #[arg(short, long = "player", required = true)]
        players: Vec<String>,

        /// Path to engine config file
        #[arg(short, long, default_value = "strictly_trivia.toml")]
        config: PathBuf,
    },
}
