//! Search gateway for the remote movie database API.
//!
//! This crate provides the widget's one outbound integration: turning a
//! free-text search term into a list of movie summaries by querying an
//! OMDb-compatible HTTP endpoint. It handles:
//! - Building the HTTP client (timeout, user agent)
//! - Query assembly (`apikey`, `s`, and the fixed `type=movie`)
//! - Decoding the response envelope, including the remote's
//!   "no matches" shape
//! - Error classification, plus a lenient wrapper that collapses every
//!   failure into an empty result list

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, instrument, warn};

/// Default endpoint of the public movie database API.
pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Default per-request timeout. Each search is a single attempt; there
/// is no retry loop to multiply it.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("reel-shelf/", env!("CARGO_PKG_VERSION"));

/// Static configuration for the search gateway.
#[derive(Debug, Clone)]
pub struct OmdbConfig {
    /// Credential sent as the `apikey` query parameter on every request.
    pub api_key: String,
    /// Endpoint to query; overridable so tests can point at a local mock.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl OmdbConfig {
    /// Configuration against the public endpoint with the default
    /// timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the endpoint (tests, self-hosted mirrors).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Errors that can occur when talking to the search service
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Failed to reach search service: {0}")]
    Transport(String),

    #[error("Search service returned HTTP {0}")]
    Status(u16),

    #[error("Search request rejected: {0}")]
    Rejected(String),

    #[error("Invalid response from search service: {0}")]
    InvalidResponse(String),
}

/// One raw movie summary from the remote's `Search` array.
///
/// Field names mirror the remote's PascalCase keys and everything stays
/// free-form text the way the API sends it, incomplete entries included
/// (`Poster` is often the literal string "N/A").
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MovieSummary {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type", default)]
    pub kind: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
}

/// Response envelope of the search endpoint.
///
/// Successful lookups carry `Search`. The remote signals both "nothing
/// matched" and hard rejections through `Response: "False"` plus an
/// `Error` message, distinguishable only by the message text.
#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(rename = "Search")]
    search: Option<Vec<MovieSummary>>,
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

/// Client for the remote movie search service.
///
/// Wraps a connection-pooling HTTP client; cheap to clone and safe to
/// share across tasks.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    config: OmdbConfig,
}

impl SearchClient {
    /// Build a client from the given configuration.
    ///
    /// # Arguments
    /// * `config` - API key, endpoint, and timeout to use
    pub fn new(config: OmdbConfig) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SearchError::ClientBuild(e.to_string()))?;

        Ok(SearchClient { http, config })
    }

    /// Search the remote API for movies matching `term`.
    ///
    /// Issues exactly one GET with the query parameters `apikey`, `s`,
    /// and `type=movie`. A well-formed response without a `Search` array
    /// (the remote's "nothing matched" shape) is `Ok` with an empty
    /// list; transport failures, non-success statuses, undecodable
    /// payloads, and hard rejections (bad credential, rate limit)
    /// surface as [`SearchError`] variants.
    ///
    /// # Returns
    /// The raw summaries in the order the remote ranked them
    #[instrument(skip(self))]
    pub async fn search(&self, term: &str) -> Result<Vec<MovieSummary>, SearchError> {
        let response = self
            .http
            .get(self.config.base_url.as_str())
            .query(&[
                ("apikey", self.config.api_key.as_str()),
                ("s", term),
                ("type", "movie"),
            ])
            .send()
            .await
            .map_err(|e| {
                error!("Search request failed: {}", e);
                SearchError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Search service answered HTTP {}", status);
            return Err(SearchError::Status(status.as_u16()));
        }

        let envelope: SearchEnvelope = response.json().await.map_err(|e| {
            error!("Undecodable search payload: {}", e);
            SearchError::InvalidResponse(e.to_string())
        })?;

        if let Some(hits) = envelope.search {
            debug!(
                "Search for {:?} returned {} of {} hits",
                term,
                hits.len(),
                envelope.total_results.as_deref().unwrap_or("?")
            );
            return Ok(hits);
        }

        // `Response: "False"` covers both "nothing matched" and hard
        // rejections; only the message text tells them apart.
        if envelope.response.as_deref() == Some("False") {
            let message = envelope
                .error
                .unwrap_or_else(|| "unknown error".to_string());
            if message.to_ascii_lowercase().contains("not found") {
                debug!("Search for {:?} matched nothing", term);
                return Ok(Vec::new());
            }
            return Err(SearchError::Rejected(message));
        }

        // No Search field and no rejection marker: treat as empty.
        debug!("Search response carried no hits for {:?}", term);
        Ok(Vec::new())
    }

    /// Lenient variant of [`search`](Self::search): every failure is
    /// logged and collapsed into an empty list, so callers cannot tell
    /// "service down" from "nothing matched". This is the fail-soft path
    /// the browsing session uses.
    pub async fn search_or_empty(&self, term: &str) -> Vec<MovieSummary> {
        match self.search(term).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!("Swallowing search failure for {:?}: {}", term, e);
                Vec::new()
            }
        }
    }

    /// The endpoint this client queries.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}
