//! HTTP client for the Niconico upstreams
//!
//! Issues single-attempt requests against one host at a time and classifies
//! the result. Fallback across hosts lives in [`crate::NicoRelay`].

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, ORIGIN, REFERER, USER_AGENT,
};
use tracing::debug;

use crate::error::{NicoError, Result};
use crate::types::SnapshotResponse;
use crate::url::{build_search_url, build_watch_info_url};

/// Primary snapshot search host
pub const PRIMARY_SEARCH_HOST: &str = "https://api.search.nicovideo.jp";
/// Fallback snapshot search mirror
pub const MIRROR_SEARCH_HOST: &str = "https://snapshot.search.nicovideo.jp";
/// Watch-info API base
pub const WATCH_API_BASE: &str = "https://api.nicovideo.jp";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X) AppleWebKit/537.36 (KHTML, like Gecko) Chrome Safari";
const SITE_REFERER: &str = "https://www.nicovideo.jp/";
const SITE_ORIGIN: &str = "https://www.nicovideo.jp";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Per-attempt timeout in seconds (default: 5)
    pub timeout_secs: u64,
    /// Search hosts in preference order
    pub search_hosts: Vec<String>,
    /// Base URL of the watch-info API
    pub watch_api_base: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            search_hosts: vec![
                PRIMARY_SEARCH_HOST.to_string(),
                MIRROR_SEARCH_HOST.to_string(),
            ],
            watch_api_base: WATCH_API_BASE.to_string(),
        }
    }
}

/// Result of one request against one search host
#[derive(Debug)]
pub enum AttemptOutcome {
    /// 2xx with a decodable body
    Success(SnapshotResponse),
    /// 403, 429 or 503: the host is blocking or overloaded, try the next one
    Retryable(u16),
    /// Any other non-success status; trying elsewhere won't help
    Fatal(u16),
    /// No usable response (timeout, DNS, refused, undecodable body)
    NetworkError(String),
}

/// Whether a non-success status should move on to the next mirror
pub fn is_retryable_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE
    )
}

/// HTTP client wrapper for the search mirrors and the watch-info API
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct NicoClient {
    client: reqwest::Client,
    search_hosts: Vec<String>,
    watch_api_base: String,
}

impl NicoClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(NicoError::HttpError)?;

        Ok(Self {
            client,
            search_hosts: config.search_hosts,
            watch_api_base: config.watch_api_base,
        })
    }

    /// Search hosts in the order they should be tried
    pub fn search_hosts(&self) -> &[String] {
        &self.search_hosts
    }

    /// Perform a single search request against `host`
    ///
    /// Never returns an error: every failure mode is folded into the outcome
    /// so the caller can decide whether to move on.
    pub async fn search_once(&self, host: &str, params: &[(&str, String)]) -> AttemptOutcome {
        let url = build_search_url(host, params);
        debug!(url = %url, "querying search mirror");

        let response = match self
            .client
            .get(&url)
            .headers(browser_headers())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return AttemptOutcome::NetworkError(e.to_string()),
        };

        let status = response.status();
        if !status.is_success() {
            return if is_retryable_status(status) {
                AttemptOutcome::Retryable(status.as_u16())
            } else {
                AttemptOutcome::Fatal(status.as_u16())
            };
        }

        match response.json::<SnapshotResponse>().await {
            Ok(body) => AttemptOutcome::Success(body),
            Err(e) => AttemptOutcome::NetworkError(e.to_string()),
        }
    }

    /// Fetch the raw guest watch-info response for `id`
    ///
    /// # Returns
    /// Upstream status and full body text, whatever the status
    ///
    /// # Errors
    /// `HttpError` when no response could be read
    pub async fn fetch_watch_info(&self, id: &str) -> Result<(StatusCode, String)> {
        let url = build_watch_info_url(&self.watch_api_base, id);
        debug!(url = %url, "querying watch info");

        let response = self
            .client
            .get(&url)
            .headers(minimal_headers())
            .send()
            .await
            .map_err(NicoError::HttpError)?;

        let status = response.status();
        let body = response.text().await.map_err(NicoError::HttpError)?;
        Ok((status, body))
    }
}

/// Headers the search API expects from its own web front end
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("ja,en;q=0.8"));
    headers.insert(REFERER, HeaderValue::from_static(SITE_REFERER));
    headers.insert(ORIGIN, HeaderValue::from_static(SITE_ORIGIN));
    headers
}

fn minimal_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(REFERER, HeaderValue::from_static(SITE_REFERER));
    headers
}
