//! GameSession - the primary public API for playing rounds.
//!
//! A session owns a fact source, the picker configuration, and at most one
//! round at a time. Sessions are plain owned values: one logical player
//! per session, no internal locking, and concurrent sessions are simply
//! independent instances.

use crate::game::{GameError, GameState, GameStatus, GuessOutcome};
use crate::picker::{pick_year, PickError, PickerConfig};
use crate::source::FactSource;
use thiserror::Error;
use tracing::info;

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("year selection failed: {0}")]
    Pick(#[from] PickError),

    #[error("a game is already in progress")]
    GameInProgress,

    #[error("no game has been started")]
    NoGame,

    #[error(transparent)]
    Game(#[from] GameError),

    #[error("No API key configured - set API_NINJAS_KEY environment variable")]
    NoApiKey,
}

/// A player session: fact source plus the current round, if any.
pub struct GameSession<S: FactSource> {
    source: S,
    picker: PickerConfig,
    game: Option<GameState>,
}

impl<S: FactSource> GameSession<S> {
    /// Create a session with the default picker configuration.
    pub fn new(source: S) -> Self {
        Self {
            source,
            picker: PickerConfig::default(),
            game: None,
        }
    }

    /// Override the picker configuration.
    pub fn with_picker(mut self, picker: PickerConfig) -> Self {
        self.picker = picker;
        self
    }

    /// Select a secret year and start a fresh round.
    ///
    /// Errors with [`SessionError::GameInProgress`] while a round is
    /// still active; finish it or call [`Self::new_game`] first. The
    /// session is only mutated after selection completes, so dropping the
    /// returned future cancels selection without touching session state.
    pub async fn start_game(&mut self) -> Result<&GameState, SessionError> {
        if self.status() == Some(GameStatus::Active) {
            return Err(SessionError::GameInProgress);
        }

        let secret = pick_year(&self.source, &self.picker).await?;
        let game = GameState::new(secret);
        info!(id = %game.id(), "game started");
        Ok(self.game.insert(game))
    }

    /// Discard the current round entirely.
    ///
    /// The next [`Self::start_game`] selects a fresh secret; nothing from
    /// the discarded round carries over.
    pub fn new_game(&mut self) {
        self.game = None;
    }

    /// The current round, if one has been started.
    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    /// Status of the current round.
    pub fn status(&self) -> Option<GameStatus> {
        self.game.as_ref().map(GameState::status)
    }

    /// Store the player's in-progress input on the current round.
    pub fn set_guess(&mut self, raw: &str) -> Result<(), SessionError> {
        self.game_mut()?.set_guess(raw)?;
        Ok(())
    }

    /// Submit the current guess on the current round.
    pub fn submit(&mut self) -> Result<GuessOutcome, SessionError> {
        let outcome = self.game_mut()?.submit();
        match &outcome {
            GuessOutcome::Won { .. } => info!("game won"),
            GuessOutcome::Miss {
                status: GameStatus::Lost,
                ..
            } => info!("game lost"),
            _ => {}
        }
        Ok(outcome)
    }

    /// Step the in-progress guess up by one year, clamped to the range.
    ///
    /// An empty input starts from the bottom of the range.
    pub fn increment_guess(&mut self) -> Result<(), SessionError> {
        self.step_guess(1)
    }

    /// Step the in-progress guess down by one year, clamped to the range.
    pub fn decrement_guess(&mut self) -> Result<(), SessionError> {
        self.step_guess(-1)
    }

    fn step_guess(&mut self, delta: i32) -> Result<(), SessionError> {
        let (min, max) = (self.picker.min_year, self.picker.max_year);
        let game = self.game_mut()?;

        let current: i32 = match game.guess() {
            "" => min as i32 - delta,
            guess => guess.parse().expect("stored guess is digits"),
        };
        let stepped = (current + delta).clamp(min as i32, max as i32) as u16;
        game.set_guess(&stepped.to_string())?;
        Ok(())
    }

    fn game_mut(&mut self) -> Result<&mut GameState, SessionError> {
        self.game.as_mut().ok_or(SessionError::NoGame)
    }
}

impl GameSession<ninjas::Client> {
    /// Create a session backed by the real API, keyed from the
    /// `API_NINJAS_KEY` environment variable.
    pub fn from_env() -> Result<Self, SessionError> {
        let client = ninjas::Client::from_env().map_err(|_| SessionError::NoApiKey)?;
        Ok(Self::new(client))
    }
}
