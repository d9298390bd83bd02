//! Testing utilities for the game engine.
//!
//! This module provides tools for integration testing:
//! - `MockSource` for deterministic year selection without API calls
//! - `TestHarness` for scripted rounds against a known secret
//! - Assertion helpers for verifying game state

use crate::digits::DIGITS;
use crate::game::{GameState, GameStatus, GuessOutcome, SecretYear};
use crate::source::{FactSource, SourceUnavailable};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A fact source that replays scripted responses.
///
/// Responses are returned in queue order regardless of the requested
/// year; an exhausted queue answers with `SourceUnavailable`, which makes
/// accidental extra lookups loud in tests.
#[derive(Debug, Default)]
pub struct MockSource {
    responses: Mutex<VecDeque<Result<Vec<String>, SourceUnavailable>>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful lookup.
    pub fn with_events(self, events: Vec<String>) -> Self {
        self.responses
            .lock()
            .expect("mock queue poisoned")
            .push_back(Ok(events));
        self
    }

    /// Queue a failed lookup.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.responses
            .lock()
            .expect("mock queue poisoned")
            .push_back(Err(SourceUnavailable(message.into())));
        self
    }
}

#[async_trait]
impl FactSource for MockSource {
    async fn events_for(&self, _year: u16) -> Result<Vec<String>, SourceUnavailable> {
        self.responses
            .lock()
            .expect("mock queue poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(SourceUnavailable("mock source exhausted".to_string())))
    }
}

/// Six events for the default test secret, 1969.
pub fn sample_events() -> Vec<String> {
    [
        "Apollo 11 lands the first humans on the Moon.",
        "The Woodstock festival opens in Bethel, New York.",
        "The first ARPANET message is sent between UCLA and Stanford.",
        "Concorde makes its maiden flight from Toulouse.",
        "The Beatles give their final public performance on a London rooftop.",
        "The Boeing 747 flies for the first time.",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Test harness for scripted rounds against a known secret.
pub struct TestHarness {
    /// The round under test.
    pub game: GameState,
}

impl TestHarness {
    /// Create a harness with the default secret, 1969.
    pub fn new() -> Self {
        Self::with_secret(1969)
    }

    /// Create a harness around a specific secret year.
    pub fn with_secret(year: u16) -> Self {
        let secret = SecretYear::new(year, sample_events()).expect("test secret is valid");
        Self {
            game: GameState::new(secret),
        }
    }

    /// Enter and submit a guess in one step.
    pub fn guess(&mut self, raw: &str) -> GuessOutcome {
        self.game.set_guess(raw).expect("test guess is valid");
        self.game.submit()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the round has the expected status.
#[track_caller]
pub fn assert_status(harness: &TestHarness, expected: GameStatus) {
    let actual = harness.game.status();
    assert_eq!(actual, expected, "Expected status {expected:?}, got {actual:?}");
}

/// Assert the accumulated per-digit feedback.
#[track_caller]
pub fn assert_feedback(harness: &TestHarness, expected: [bool; DIGITS]) {
    let actual = harness.game.feedback().as_array();
    assert_eq!(
        actual, expected,
        "Expected feedback {expected:?}, got {actual:?}"
    );
}

/// Assert how many events are currently revealed.
#[track_caller]
pub fn assert_revealed(harness: &TestHarness, count: usize) {
    let actual = harness.game.revealed_events().len();
    assert_eq!(actual, count, "Expected {count} revealed events, got {actual}");
}
