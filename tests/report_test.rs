//! Tests for the end-of-game report.

mod common;

use std::sync::Arc;
use tempfile::TempDir;

use strictly_trivia::{
    EventLog, GameSession, ReportError, ReportGenerator, ScoringStrategy, SessionStatus,
};

/// Correct answers earn double; wrong answers cost nothing.
#[derive(Debug)]
struct DoubleOrNothing;

impl ScoringStrategy for DoubleOrNothing {
    fn points(&self, value: i64, correct: bool) -> i64 {
        if correct { value * 2 } else { 0 }
    }

    fn name(&self) -> &'static str {
        "Double or Nothing"
    }
}

fn finished_tie() -> GameSession {
    let mut session = GameSession::new("GAME-42", Arc::new(EventLog::in_memory()));
    session
        .initialize(&["Alice", "Bob"], common::validated())
        .expect("Initialize failed");
    session.answer("Science", 100, "a").expect("Answer failed");
    session.advance_turn();
    session.answer("Math", 100, "A").expect("Answer failed");
    session.advance_turn();
    session.force_finish();
    session
}

fn render(generator: &ReportGenerator, session: &GameSession) -> String {
    generator
        .render(
            session.case_id(),
            session.status(),
            &session.events(),
            session.players(),
        )
        .expect("Render failed")
}

#[test]
fn test_report_layout() {
    let session = finished_tie();
    let text = render(&ReportGenerator::new("report", "summary.txt"), &session);

    let expected = "\
TRIVIA GAME REPORT
==================

Case ID: GAME-42

Players: Alice, Bob

Gameplay Summary:
-----------------
Turn 1: Alice selected Science for 100 pts
Question: Science for 100?
Answer: Science 100 A - Correct (+100 pts)
Score after turn: Alice = 100

Turn 2: Bob selected Math for 100 pts
Question: Math for 100?
Answer: Math 100 A - Correct (+100 pts)
Score after turn: Bob = 100

Final Scores:
Alice: 100
Bob: 100

It's a tie! Winners: Alice (100 points), Bob (100 points)
";
    assert_eq!(text, expected);
}

#[test]
fn test_report_is_deterministic() {
    let session = finished_tie();
    let generator = ReportGenerator::new("report", "summary.txt");
    assert_eq!(render(&generator, &session), render(&generator, &session));
}

#[test]
fn test_unfinished_session_refused() {
    let mut session = GameSession::new("GAME-43", Arc::new(EventLog::in_memory()));
    session
        .initialize(&["Alice"], common::validated())
        .expect("Initialize failed");

    let generator = ReportGenerator::new("report", "summary.txt");
    let err = generator
        .render(
            session.case_id(),
            session.status(),
            &session.events(),
            session.players(),
        )
        .expect_err("in-progress session");
    assert!(matches!(
        err,
        ReportError::NotFinished(SessionStatus::InProgress)
    ));
}

#[test]
fn test_write_creates_directory() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let generator = ReportGenerator::new(dir.path().join("nested").join("report"), "summary.txt");
    let session = finished_tie();

    let path = generator
        .write(
            session.case_id(),
            session.status(),
            &session.events(),
            session.players(),
        )
        .expect("Write failed");
    assert_eq!(path, generator.destination());

    let text = std::fs::read_to_string(&path).expect("Report readable");
    assert!(text.starts_with("TRIVIA GAME REPORT\n"));
}

#[test]
fn test_report_shows_points_the_strategy_applied() {
    let mut session = GameSession::new("GAME-44", Arc::new(EventLog::in_memory()))
        .with_scoring(Arc::new(DoubleOrNothing));
    session
        .initialize(&["Alice"], common::validated())
        .expect("Initialize failed");
    session.answer("Science", 100, "A").expect("Answer failed");
    session.answer("Science", 200, "B").expect("Answer failed");
    session.force_finish();

    let text = render(&ReportGenerator::new("report", "summary.txt"), &session);
    assert!(text.contains("Answer: Science 100 A - Correct (+200 pts)\nScore after turn: Alice = 200"));
    assert!(text.contains("Answer: Science 200 B - Incorrect (+0 pts)\nScore after turn: Alice = 200"));
}
