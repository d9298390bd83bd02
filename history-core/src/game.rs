//! Game state for a single guess-the-year round.
//!
//! A [`GameState`] owns everything mutable about one round: the secret
//! year, the in-progress guess, per-digit feedback, and the miss list.
//! Each round is a fresh instance; there is no in-place reset that could
//! carry stale feedback into the next game.

use crate::digits::{match_digits, pad_year, DigitFeedback, DigitPlace};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Earliest selectable year.
pub const MIN_YEAR: u16 = 1;
/// Latest selectable year.
pub const MAX_YEAR: u16 = 2023;
/// The miss that ends the game: the 5th recorded miss loses.
pub const MAX_MISSES: usize = 5;
/// Minimum number of events a year needs before it can become the secret.
pub const MIN_EVENTS: usize = 6;
/// At most this many events are ever revealed during play.
pub const MAX_REVEALED: usize = 5;

/// Errors from game-state operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("guess must be 1-4 decimal digits, got {0:?}")]
    InvalidGuess(String),

    #[error("year {0} is outside {MIN_YEAR}..={MAX_YEAR}")]
    YearOutOfRange(u16),

    #[error("a secret year needs at least {MIN_EVENTS} events, got {0}")]
    NotEnoughEvents(usize),
}

/// Unique identifier for a game round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(pub Uuid);

impl GameId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A committed secret year together with its historical events.
///
/// Construction enforces the commit invariant: the year is in range and
/// has more than 5 events, so every `SecretYear` in existence is playable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretYear {
    year: String,
    number: u16,
    events: Vec<String>,
}

impl SecretYear {
    /// Commit a candidate year with its event descriptions.
    pub fn new(year: u16, events: Vec<String>) -> Result<Self, GameError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(GameError::YearOutOfRange(year));
        }
        if events.len() < MIN_EVENTS {
            return Err(GameError::NotEnoughEvents(events.len()));
        }
        Ok(Self {
            year: format!("{year:04}"),
            number: year,
            events,
        })
    }

    /// The zero-padded 4-digit year, e.g. `"0476"`.
    pub fn as_str(&self) -> &str {
        &self.year
    }

    /// The year as a number.
    pub fn number(&self) -> u16 {
        self.number
    }

    /// The full ordered event list (always more than 5 entries).
    pub fn events(&self) -> &[String] {
        &self.events
    }

    /// Wikipedia page for this year.
    pub fn wiki_url(&self) -> String {
        format!("https://en.wikipedia.org/wiki/AD_{}", self.number)
    }
}

impl fmt::Display for SecretYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.year)
    }
}

/// Status of a game round. `Won` and `Lost` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Active,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Active)
    }
}

/// Directional hint for a miss, from numeric comparison with the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hint {
    TooOld,
    TooRecent,
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::TooOld => write!(f, "too old"),
            Hint::TooRecent => write!(f, "too recent"),
        }
    }
}

/// Why a submission was ignored rather than scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The game has already been won or lost.
    GameOver,
    /// No guess has been entered.
    EmptyGuess,
    /// The guess is already on the miss list.
    DuplicateGuess,
}

/// Result of submitting a guess.
///
/// `confirmed` carries the digit places newly confirmed by this guess, so
/// an embedder can notify on each ("Century is correct!") without the
/// state machine owning notification policy.
#[derive(Debug, Clone, PartialEq)]
pub enum GuessOutcome {
    /// The submission had no effect.
    Ignored(IgnoreReason),
    /// The guess matched the secret exactly; the game is won.
    Won { confirmed: Vec<DigitPlace> },
    /// The guess missed. `status` is `Lost` on the 5th recorded miss,
    /// `Active` otherwise.
    Miss {
        hint: Hint,
        confirmed: Vec<DigitPlace>,
        status: GameStatus,
    },
}

impl GuessOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, GuessOutcome::Ignored(_))
    }
}

/// All mutable state for one round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    id: GameId,
    secret: SecretYear,
    status: GameStatus,
    guess: String,
    feedback: DigitFeedback,
    misses: Vec<String>,
}

impl GameState {
    /// Start a fresh round around a committed secret.
    pub fn new(secret: SecretYear) -> Self {
        Self {
            id: GameId::new(),
            secret,
            status: GameStatus::Active,
            guess: String::new(),
            feedback: DigitFeedback::new(),
            misses: Vec::new(),
        }
    }

    /// Store the player's in-progress input.
    ///
    /// Accepts only strings of up to 4 decimal digits (the empty string
    /// clears the input). Rejected input leaves the stored guess
    /// untouched. Range is not checked until submission.
    pub fn set_guess(&mut self, raw: &str) -> Result<(), GameError> {
        if raw.len() > crate::digits::DIGITS || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GameError::InvalidGuess(raw.to_string()));
        }
        self.guess = raw.to_string();
        Ok(())
    }

    /// The in-progress guess as entered.
    pub fn guess(&self) -> &str {
        &self.guess
    }

    /// Submit the current guess.
    ///
    /// Ignored when the game is over, the guess is empty, or the guess is
    /// already an exhausted miss. Otherwise feedback is merged (index-wise
    /// OR, so it never regresses), and the round either ends in a win,
    /// records a miss, or ends in a loss on the 5th recorded miss.
    pub fn submit(&mut self) -> GuessOutcome {
        if self.status.is_terminal() {
            return GuessOutcome::Ignored(IgnoreReason::GameOver);
        }
        if self.guess.is_empty() {
            return GuessOutcome::Ignored(IgnoreReason::EmptyGuess);
        }

        let padded = pad_year(&self.guess);
        if self.misses.contains(&padded) {
            return GuessOutcome::Ignored(IgnoreReason::DuplicateGuess);
        }

        let confirmed = self.feedback.merge(match_digits(&padded, self.secret.as_str()));

        if padded == self.secret.as_str() {
            self.status = GameStatus::Won;
            return GuessOutcome::Won { confirmed };
        }

        let hint = self.hint_for(&padded);
        self.misses.push(padded);
        if self.misses.len() >= MAX_MISSES {
            self.status = GameStatus::Lost;
        }

        GuessOutcome::Miss {
            hint,
            confirmed,
            status: self.status,
        }
    }

    fn hint_for(&self, padded: &str) -> Hint {
        // set_guess guarantees up to 4 ascii digits, which always fits u16.
        let value: u16 = padded.parse().expect("guess validated as digits");
        if value < self.secret.number() {
            Hint::TooOld
        } else {
            Hint::TooRecent
        }
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    /// The secret for this round. Intended for end-of-game display.
    pub fn secret(&self) -> &SecretYear {
        &self.secret
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Per-digit feedback accumulated so far.
    pub fn feedback(&self) -> DigitFeedback {
        self.feedback
    }

    /// Prior misses, zero-padded, in submission order. At most 5 entries.
    pub fn misses(&self) -> &[String] {
        &self.misses
    }

    /// Directional hints for each miss, parallel to [`Self::misses`].
    pub fn hints(&self) -> Vec<Hint> {
        self.misses.iter().map(|m| self.hint_for(m)).collect()
    }

    /// The events visible to the player: one is revealed up front and one
    /// more after each miss, capped at 5.
    pub fn revealed_events(&self) -> &[String] {
        let visible = (self.misses.len() + 1).min(MAX_REVEALED);
        &self.secret.events()[..visible]
    }

    /// Events never revealed during play, for end-of-game display.
    pub fn remaining_events(&self) -> &[String] {
        let visible = (self.misses.len() + 1).min(MAX_REVEALED);
        &self.secret.events()[visible..]
    }

    /// The secret with unconfirmed digits masked, e.g. `"1X6X"`.
    pub fn masked_year(&self) -> String {
        self.secret
            .as_str()
            .chars()
            .enumerate()
            .map(|(i, c)| if self.feedback.confirmed(i) { c } else { 'X' })
            .collect()
    }

    /// How many misses remain before the game is lost.
    pub fn attempts_left(&self) -> usize {
        MAX_MISSES - self.misses.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("event {i}")).collect()
    }

    fn game(year: u16) -> GameState {
        GameState::new(SecretYear::new(year, events(8)).unwrap())
    }

    #[test]
    fn test_secret_year_requires_events() {
        assert_eq!(
            SecretYear::new(1969, events(5)).unwrap_err(),
            GameError::NotEnoughEvents(5)
        );
        assert!(SecretYear::new(1969, events(6)).is_ok());
    }

    #[test]
    fn test_secret_year_range() {
        assert_eq!(
            SecretYear::new(0, events(6)).unwrap_err(),
            GameError::YearOutOfRange(0)
        );
        assert_eq!(
            SecretYear::new(2024, events(6)).unwrap_err(),
            GameError::YearOutOfRange(2024)
        );
        let secret = SecretYear::new(476, events(6)).unwrap();
        assert_eq!(secret.as_str(), "0476");
        assert_eq!(secret.wiki_url(), "https://en.wikipedia.org/wiki/AD_476");
    }

    #[test]
    fn test_winning_guess() {
        let mut game = game(1969);
        game.set_guess("1969").unwrap();

        match game.submit() {
            GuessOutcome::Won { confirmed } => {
                assert_eq!(confirmed.len(), 4);
            }
            other => panic!("expected win, got {other:?}"),
        }
        assert_eq!(game.status(), GameStatus::Won);
        assert!(game.feedback().all_confirmed());
        assert!(game.misses().is_empty());
    }

    #[test]
    fn test_miss_with_hint_and_feedback() {
        let mut game = game(1500);
        game.set_guess("1962").unwrap();

        match game.submit() {
            GuessOutcome::Miss {
                hint,
                confirmed,
                status,
            } => {
                assert_eq!(hint, Hint::TooRecent);
                assert_eq!(confirmed, vec![DigitPlace::Millennium]);
                assert_eq!(status, GameStatus::Active);
            }
            other => panic!("expected miss, got {other:?}"),
        }
        assert_eq!(game.feedback().as_array(), [true, false, false, false]);
        assert_eq!(game.misses(), ["1962"]);
        assert_eq!(game.hints(), vec![Hint::TooRecent]);
    }

    #[test]
    fn test_lost_on_fifth_miss() {
        let mut game = game(1066);

        for (i, guess) in ["1000", "1100", "1200", "1300"].iter().enumerate() {
            game.set_guess(guess).unwrap();
            assert!(!game.submit().is_ignored());
            assert_eq!(game.status(), GameStatus::Active, "active after miss {}", i + 1);
        }

        game.set_guess("1400").unwrap();
        match game.submit() {
            GuessOutcome::Miss { status, .. } => assert_eq!(status, GameStatus::Lost),
            other => panic!("expected miss, got {other:?}"),
        }
        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(game.misses().len(), 5);
        assert_eq!(game.revealed_events().len(), 5);
    }

    #[test]
    fn test_submit_after_game_over_is_ignored() {
        let mut game = game(1969);
        game.set_guess("1969").unwrap();
        game.submit();

        game.set_guess("1970").unwrap();
        assert_eq!(
            game.submit(),
            GuessOutcome::Ignored(IgnoreReason::GameOver)
        );
        assert_eq!(game.status(), GameStatus::Won);
        assert!(game.misses().is_empty());
    }

    #[test]
    fn test_empty_guess_is_ignored() {
        let mut game = game(1969);
        assert_eq!(
            game.submit(),
            GuessOutcome::Ignored(IgnoreReason::EmptyGuess)
        );
    }

    #[test]
    fn test_duplicate_guess_is_ignored() {
        let mut game = game(1969);
        game.set_guess("1900").unwrap();
        game.submit();

        game.set_guess("1900").unwrap();
        assert_eq!(
            game.submit(),
            GuessOutcome::Ignored(IgnoreReason::DuplicateGuess)
        );
        assert_eq!(game.misses().len(), 1);
    }

    #[test]
    fn test_duplicate_detected_after_padding() {
        let mut game = game(1969);
        game.set_guess("7").unwrap();
        game.submit();
        assert_eq!(game.misses(), ["0007"]);

        // "0007" and "7" are the same exhausted guess.
        game.set_guess("0007").unwrap();
        assert_eq!(
            game.submit(),
            GuessOutcome::Ignored(IgnoreReason::DuplicateGuess)
        );
    }

    #[test]
    fn test_invalid_guess_leaves_input_unchanged() {
        let mut game = game(1969);
        game.set_guess("196").unwrap();

        assert!(game.set_guess("12345").is_err());
        assert!(game.set_guess("19a0").is_err());
        assert_eq!(game.guess(), "196");
    }

    #[test]
    fn test_feedback_is_monotonic_across_submissions() {
        let mut game = game(1969);

        game.set_guess("1961").unwrap();
        game.submit();
        assert_eq!(game.feedback().as_array(), [true, true, true, false]);

        // A far worse guess afterwards never regresses the feedback.
        game.set_guess("2000").unwrap();
        game.submit();
        assert_eq!(game.feedback().as_array(), [true, true, true, false]);
    }

    #[test]
    fn test_reveal_progression() {
        let mut game = game(1969);
        assert_eq!(game.revealed_events().len(), 1);
        assert_eq!(game.remaining_events().len(), 7);

        game.set_guess("1000").unwrap();
        game.submit();
        assert_eq!(game.revealed_events().len(), 2);

        for guess in ["1100", "1200", "1300", "1398"] {
            game.set_guess(guess).unwrap();
            game.submit();
        }
        // Capped at 5 even though 5 misses would otherwise reveal a 6th.
        assert_eq!(game.revealed_events().len(), 5);
        assert_eq!(game.remaining_events().len(), 3);
    }

    #[test]
    fn test_masked_year() {
        let mut game = game(1969);
        assert_eq!(game.masked_year(), "XXXX");

        game.set_guess("1955").unwrap();
        game.submit();
        assert_eq!(game.masked_year(), "19XX");
    }

    #[test]
    fn test_attempts_left() {
        let mut game = game(1969);
        assert_eq!(game.attempts_left(), 5);
        game.set_guess("1000").unwrap();
        game.submit();
        assert_eq!(game.attempts_left(), 4);
    }

    #[test]
    fn test_too_old_hint() {
        let mut game = game(1969);
        game.set_guess("1800").unwrap();
        match game.submit() {
            GuessOutcome::Miss { hint, .. } => assert_eq!(hint, Hint::TooOld),
            other => panic!("expected miss, got {other:?}"),
        }
    }
}
