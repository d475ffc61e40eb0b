//! Strictly Trivia - terminal driver
//!
//! Loads a question bank and runs a game on stdin/stdout through the
//! [`TriviaEngine`] facade.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::io::{self, BufRead, Write};
use std::path::Path;
use strictly_trivia::{load, validate, EngineConfig, TriviaEngine};
use tracing::{info, instrument, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Validate { file } => run_validate(&file),
        Command::Play {
            file,
            players,
            config,
        } => run_play(&file, &players, &config),
    }
}

/// Logs go to stderr so they never mix with the game prompts.
fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,strictly_trivia=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Load and validate a question bank, printing a one-line verdict.
#[instrument(skip_all, fields(file = %file.display()))]
fn run_validate(file: &Path) -> Result<()> {
    let catalog = load(file)?;
    validate(&catalog)?;
    println!(
        "OK: {} categories, {} questions",
        catalog.total_categories(),
        catalog.total_questions()
    );
    Ok(())
}

#[instrument(skip_all, fields(file = %file.display()))]
fn run_play(file: &Path, players: &[String], config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let mut engine = TriviaEngine::new(config);
    engine.load_catalog(file)?;
    engine.start_session(players)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();

    while !engine.is_complete()? {
        if !play_turn(&mut engine, &mut input)? {
            info!("Operator ended the game");
            engine.force_finish()?;
            break;
        }
    }

    if let Some(session) = engine.session() {
        println!();
        println!("{}", session.summary());
        let winners: Vec<_> = engine.winners()?.iter().map(|p| p.name().clone()).collect();
        println!("Winners: {}", winners.join(", "));
        if session.log_failures() > 0 {
            warn!(failures = session.log_failures(), "Some events were not written to the log file");
        }
    }

    let path = engine.generate_report()?;
    println!("Report written to {}", path.display());
    Ok(())
}

/// Use the config file when present, defaults otherwise.
fn load_config(path: &Path) -> Result<EngineConfig> {
    if path.exists() {
        Ok(EngineConfig::from_file(path)?)
    } else {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        Ok(EngineConfig::default())
    }
}

/// Plays one turn. Returns false when the operator asks to quit.
fn play_turn(engine: &mut TriviaEngine, input: &mut impl BufRead) -> Result<bool> {
    let player = engine
        .current_player()?
        .map(|p| p.name().clone())
        .unwrap_or_default();

    println!();
    println!("Board:");
    for view in engine.list_categories()? {
        let values: Vec<String> = view.open_values().iter().map(i64::to_string).collect();
        println!("  {}: {}", view.name, values.join(" "));
    }

    let Some(category) = prompt(input, &format!("{}, pick a category (or 'quit'): ", player))?
    else {
        return Ok(false);
    };
    let Some(value) = prompt(input, "Value: ")? else {
        return Ok(false);
    };
    let Ok(value) = value.parse::<i64>() else {
        println!("'{}' is not a number", value);
        return Ok(true);
    };

    let question = engine
        .catalog()
        .and_then(|c| c.question(&category, value))
        .cloned();
    let Some(question) = question else {
        println!("No question at {} for {}", category, value);
        return Ok(true);
    };
    println!("{}", question.prompt());
    for (key, text) in question.options() {
        println!("  {}) {}", key, text);
    }

    let Some(given) = prompt(input, "Answer: ")? else {
        return Ok(false);
    };
    match engine.submit_answer(&category, value, &given) {
        Ok(true) => println!("Correct!"),
        Ok(false) => println!("Incorrect."),
        Err(e) => {
            println!("{}", e);
            return Ok(true);
        }
    }
    engine.advance_turn()?;
    Ok(true)
}

/// Reads one trimmed line. `None` on end of input or `quit`.
fn prompt(input: &mut impl BufRead, label: &str) -> Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    if input.read_line(&mut line).context("Failed to read input")? == 0 {
        return Ok(None);
    }
    let line = line.trim();
    if line.eq_ignore_ascii_case("quit") {
        Ok(None)
    } else {
        Ok(Some(line.to_string()))
    }
}
