//! Guess-the-year game engine.
//!
//! This crate provides:
//! - Per-digit guess matching with prefix-break semantics
//! - The game state machine (5 misses, one revealed event per miss)
//! - Bounded secret-year selection against a historical events source
//! - A session API tying the pieces together
//!
//! # Quick Start
//!
//! ```ignore
//! use history_core::GameSession;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = GameSession::from_env()?;
//!     session.start_game().await?;
//!
//!     println!("Which year? {:?}", session.game().unwrap().revealed_events());
//!
//!     session.set_guess("1969")?;
//!     let outcome = session.submit()?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```

pub mod digits;
pub mod game;
pub mod picker;
pub mod session;
pub mod source;
pub mod testing;

// Primary public API
pub use digits::{match_digits, pad_year, DigitFeedback, DigitPlace, DIGITS};
pub use game::{
    GameError, GameId, GameState, GameStatus, GuessOutcome, Hint, IgnoreReason, SecretYear,
    MAX_MISSES, MAX_REVEALED, MAX_YEAR, MIN_EVENTS, MIN_YEAR,
};
pub use picker::{pick_year, PickError, PickerConfig};
pub use session::{GameSession, SessionError};
pub use source::{FactSource, SourceUnavailable};
pub use testing::{MockSource, TestHarness};
