//! Minimal API Ninjas client.
//!
//! This crate provides a focused client for the Historical Events API:
//! - Year-based event lookups
//! - API-key authentication via the `X-Api-Key` header
//! - A small, explicit error taxonomy

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::Deserialize;

use thiserror::Error;

const API_BASE: &str = "https://api.api-ninjas.com/v1";

/// Environment variable holding the API Ninjas key.
pub const API_KEY_VAR: &str = "API_NINJAS_KEY";

/// Errors that can occur when using the API Ninjas client.
#[derive(Debug, Error)]
pub enum Error {
    #[error("API key not configured")]
    NoApiKey,

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// API Ninjas client.
#[derive(Clone)]
pub struct Client {
    client: reqwest::Client,
    api_key: String,
}

impl Client {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .connect_timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client"),
            api_key: api_key.into(),
        }
    }

    /// Create a client from the `API_NINJAS_KEY` environment variable.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var(API_KEY_VAR).map_err(|_| Error::NoApiKey)?;
        Ok(Self::new(api_key))
    }

    /// Fetch the historical events recorded for a given year.
    ///
    /// Returns the full list the API knows for that year; the list may be
    /// empty for years with no recorded events.
    pub async fn historical_events(&self, year: u16) -> Result<Vec<HistoricalEvent>, Error> {
        let headers = self.build_headers()?;

        let response = self
            .client
            .get(format!("{API_BASE}/historicalevents"))
            .headers(headers)
            .query(&[("year", year)])
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status,
                message: body,
            });
        }

        let records: Vec<ApiEvent> = response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))?;

        Ok(records.into_iter().map(HistoricalEvent::from).collect())
    }

    fn build_headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            "X-Api-Key",
            HeaderValue::from_str(&self.api_key)
                .map_err(|e| Error::Config(format!("Invalid API key: {e}")))?,
        );
        Ok(headers)
    }
}

/// A single historical event record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoricalEvent {
    /// Description of the event.
    pub event: String,
    /// Year of the event, as reported by the API.
    pub year: String,
    /// Month of the event ("01".."12", may be empty).
    pub month: String,
    /// Day of the event, may be empty.
    pub day: String,
}

impl From<ApiEvent> for HistoricalEvent {
    fn from(api: ApiEvent) -> Self {
        Self {
            event: api.event,
            year: api.year,
            month: api.month,
            day: api.day,
        }
    }
}

// ============================================================================
// Internal API types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ApiEvent {
    #[serde(default)]
    event: String,
    #[serde(default)]
    year: String,
    #[serde(default)]
    month: String,
    #[serde(default)]
    day: String,
}
