//! Secret year selection.
//!
//! Samples candidate years uniformly at random and commits the first one
//! the fact source knows more than 5 events for. Selection is bounded:
//! after a fixed number of sparse candidates it fails observably instead
//! of looping forever.

use crate::game::{GameError, SecretYear, MAX_YEAR, MIN_EVENTS, MIN_YEAR};
use crate::source::{FactSource, SourceUnavailable};
use rand::Rng;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Default number of candidate years tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 25;

/// Errors from year selection.
#[derive(Debug, Error)]
pub enum PickError {
    /// The fact source failed; selection stops immediately.
    #[error(transparent)]
    Source(#[from] SourceUnavailable),

    /// Every sampled candidate had too few events.
    #[error("no year with at least {MIN_EVENTS} events after {attempts} attempts")]
    Exhausted { attempts: u32 },

    /// A committed candidate failed validation (misconfigured year range).
    #[error("invalid candidate year: {0}")]
    Invalid(#[from] GameError),
}

/// Configuration for year selection.
#[derive(Debug, Clone)]
pub struct PickerConfig {
    /// Lowest candidate year, inclusive.
    pub min_year: u16,
    /// Highest candidate year, inclusive.
    pub max_year: u16,
    /// Candidate years tried before selection fails.
    pub max_attempts: u32,
    /// Base delay between resamples, doubled each attempt (capped).
    /// `None` resamples immediately.
    pub backoff: Option<Duration>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            min_year: MIN_YEAR,
            max_year: MAX_YEAR,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: None,
        }
    }
}

impl PickerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the candidate range (inclusive on both ends).
    pub fn with_year_range(mut self, min_year: u16, max_year: u16) -> Self {
        self.min_year = min_year;
        self.max_year = max_year;
        self
    }

    /// Set the retry budget.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Enable exponential backoff between resamples.
    pub fn with_backoff(mut self, base: Duration) -> Self {
        self.backoff = Some(base);
        self
    }
}

/// Select a secret year from the fact source.
///
/// Each attempt samples a year uniformly from the configured range and
/// asks the source for its events. A year with more than 5 events is
/// committed as the secret; a sparse year consumes one attempt from the
/// budget. A source failure ends selection immediately.
///
/// Cancellation is dropping the returned future: the picker applies no
/// state itself, so a response arriving after the drop is discarded with
/// it.
pub async fn pick_year<S: FactSource>(
    source: &S,
    config: &PickerConfig,
) -> Result<SecretYear, PickError> {
    for attempt in 1..=config.max_attempts {
        let year = {
            let mut rng = rand::thread_rng();
            rng.gen_range(config.min_year..=config.max_year)
        };

        let events = source.events_for(year).await?;

        if events.len() >= MIN_EVENTS {
            debug!(year, attempt, events = events.len(), "committed secret year");
            return Ok(SecretYear::new(year, events)?);
        }

        debug!(year, attempt, events = events.len(), "too few events, resampling");

        if let Some(base) = config.backoff {
            let exp = (attempt - 1).min(6);
            tokio::time::sleep(base.saturating_mul(1 << exp)).await;
        }
    }

    warn!(attempts = config.max_attempts, "year selection exhausted");
    Err(PickError::Exhausted {
        attempts: config.max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockSource;

    fn events(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("event {i}")).collect()
    }

    #[tokio::test]
    async fn test_commits_first_rich_year() {
        let source = MockSource::new().with_events(events(6));
        let config = PickerConfig::new().with_year_range(1960, 1970);

        let secret = pick_year(&source, &config).await.unwrap();
        assert!((1960..=1970).contains(&secret.number()));
        assert_eq!(secret.events().len(), 6);
    }

    #[tokio::test]
    async fn test_resamples_past_sparse_years() {
        let source = MockSource::new()
            .with_events(events(2))
            .with_events(events(0))
            .with_events(events(9));

        let secret = pick_year(&source, &PickerConfig::default()).await.unwrap();
        assert_eq!(secret.events().len(), 9);
    }

    #[tokio::test]
    async fn test_exhausts_bounded_budget() {
        let mut source = MockSource::new();
        for _ in 0..3 {
            source = source.with_events(events(5));
        }
        let config = PickerConfig::new().with_max_attempts(3);

        match pick_year(&source, &config).await {
            Err(PickError::Exhausted { attempts: 3 }) => {}
            other => panic!("expected exhaustion, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_source_failure_stops_selection() {
        // A failure on the second attempt ends selection with attempts
        // still left in the budget.
        let source = MockSource::new()
            .with_events(events(1))
            .with_failure("boom");

        match pick_year(&source, &PickerConfig::default()).await {
            Err(PickError::Source(SourceUnavailable(msg))) => assert_eq!(msg, "boom"),
            other => panic!("expected source failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_out_of_range_config_is_an_error() {
        let source = MockSource::new().with_events(events(6));
        let config = PickerConfig::new().with_year_range(3000, 3001);

        match pick_year(&source, &config).await {
            Err(PickError::Invalid(GameError::YearOutOfRange(_))) => {}
            other => panic!("expected range error, got {other:?}"),
        }
    }
}
