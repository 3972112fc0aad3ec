//! reqwest-based client for the dashboard backend.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, warn};
use url::Url;

use super::service::{FetchError, OverviewApi};
use crate::domain::entities::{Overview, OverviewEnvelope};

/// Path of the overview resource, relative to the API base URL.
pub const OVERVIEW_PATH: &str = "api/dashboard/overview/";

/// HTTP client for `GET /api/dashboard/overview/`.
///
/// Transient failures (connection errors, 5xx) are retried with exponential
/// backoff up to `retry_attempts` extra times. Authentication failures and
/// malformed bodies are returned immediately.
#[derive(Clone)]
pub struct HttpOverviewClient {
    client: reqwest::Client,
    base_url: Url,
    retry_attempts: usize,
}

impl HttpOverviewClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// A missing trailing slash is added so the base path is preserved when
    /// the overview path is joined.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Url`] if `base_url` is not absolute, or
    /// [`FetchError::Network`] if the TLS backend cannot be initialized.
    pub fn new(base_url: &str, timeout: Duration, retry_attempts: usize) -> Result<Self, FetchError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("admin-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            retry_attempts,
        })
    }

    /// Full overview URL, optionally filtered by year.
    pub fn overview_url(&self, year: Option<i32>) -> Result<Url, FetchError> {
        let mut url = self.base_url.join(OVERVIEW_PATH)?;
        if let Some(year) = year {
            url.query_pairs_mut().append_pair("year", &year.to_string());
        }
        Ok(url)
    }

    async fn fetch_once(&self, url: Url, headers: HeaderMap) -> Result<Overview, FetchError> {
        let response = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::from_status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let envelope: OverviewEnvelope =
            serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok(envelope.data)
    }
}

#[async_trait]
impl OverviewApi for HttpOverviewClient {
    async fn fetch_overview(
        &self,
        year: Option<i32>,
        headers: HeaderMap,
    ) -> Result<Overview, FetchError> {
        let url = self.overview_url(year)?;
        debug!(%url, "Fetching dashboard overview");

        let strategy = ExponentialBackoff::from_millis(10)
            .factor(20)
            .max_delay(Duration::from_secs(2))
            .map(jitter)
            .take(self.retry_attempts);

        RetryIf::start(
            strategy,
            || self.fetch_once(url.clone(), headers.clone()),
            |e: &FetchError| {
                let retry = e.is_transient();
                if retry {
                    warn!("Overview fetch failed, retrying: {}", e);
                }
                retry
            },
        )
        .await
    }
}
