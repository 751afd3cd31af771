#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dispatch feed loading.
//!
//! One network call returns the combined fire + service payload as a JSON
//! object with two feature collections. The call happens exactly once per
//! session load; there is no pagination, streaming, retry, or background
//! refresh. A failed fetch is fatal to the session.

use async_trait::async_trait;
use dispatch_radar_feed_models::FeedSnapshot;

/// Default combined feed endpoint (worker fronting both upstream dispatch
/// datasets).
pub const DEFAULT_FEED_URL: &str = "https://purple-hall-7383.henry-walen.workers.dev/";

/// Errors that can occur while loading the feed snapshot.
///
/// Any of these is fatal to the session: there is no retry and no
/// partial payload to fall back to.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed endpoint answered with a non-success status.
    #[error("Feed request failed with status {status}")]
    Status {
        /// The non-success status returned by the endpoint.
        status: reqwest::StatusCode,
    },

    /// Payload parsing failed.
    #[error("Feed parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Anything that can supply one combined feed snapshot.
///
/// The session controller performs exactly one fetch per load; tests
/// substitute an in-memory implementation.
#[async_trait]
pub trait FeedLoader: Send + Sync {
    /// Fetches the combined fire + service snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError`] if the request or payload parsing fails.
    async fn fetch_snapshot(&self) -> Result<FeedSnapshot, FeedError>;
}

/// HTTP implementation of [`FeedLoader`].
pub struct HttpFeedLoader {
    client: reqwest::Client,
    url: String,
}

impl HttpFeedLoader {
    /// Creates a loader for the given endpoint URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// The endpoint URL this loader fetches from.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpFeedLoader {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_URL)
    }
}

#[async_trait]
impl FeedLoader for HttpFeedLoader {
    async fn fetch_snapshot(&self) -> Result<FeedSnapshot, FeedError> {
        log::info!("Fetching dispatch snapshot from {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::Status {
                status: response.status(),
            });
        }

        let body = response.text().await?;
        let snapshot = parse_snapshot(&body)?;

        log::info!(
            "Snapshot loaded: {} fire features, {} service features",
            snapshot.fire_count(),
            snapshot.service_count()
        );
        Ok(snapshot)
    }
}

/// Parses the combined payload body.
///
/// # Errors
///
/// Returns [`FeedError::Parse`] if the body is not the expected
/// `{ "fire": ..., "service": ... }` object. Both keys are required —
/// the upstream always ships them together.
pub fn parse_snapshot(body: &str) -> Result<FeedSnapshot, FeedError> {
    Ok(serde_json::from_str(body)?)
}
