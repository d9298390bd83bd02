//! The fact-source contract: where historical events come from.
//!
//! The engine only ever asks one question of the outside world: "which
//! events happened in year Y?". Everything that can go wrong on the way
//! (network failure, non-2xx status, malformed payload) collapses into a
//! single [`SourceUnavailable`] condition; callers retry or give up, they
//! never handle partial results.

use async_trait::async_trait;
use thiserror::Error;

/// The single failure condition for fact-source lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("fact source unavailable: {0}")]
pub struct SourceUnavailable(pub String);

/// Provider of historical events for a given year.
#[async_trait]
pub trait FactSource: Send + Sync {
    /// Fetch the event descriptions recorded for `year`.
    ///
    /// An empty list is a valid answer (the year is just not selectable);
    /// only transport-level trouble is an error.
    async fn events_for(&self, year: u16) -> Result<Vec<String>, SourceUnavailable>;
}

#[async_trait]
impl FactSource for ninjas::Client {
    async fn events_for(&self, year: u16) -> Result<Vec<String>, SourceUnavailable> {
        let records = self
            .historical_events(year)
            .await
            .map_err(|e| SourceUnavailable(e.to_string()))?;
        Ok(records.into_iter().map(|r| r.event).collect())
    }
}
