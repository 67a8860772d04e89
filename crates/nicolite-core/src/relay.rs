//! Main relay API for Niconico
//!
//! Combines the HTTP client with id extraction and result reshaping.

use tracing::{error, info, warn};

use crate::client::{AttemptOutcome, ClientConfig, NicoClient};
use crate::error::{NicoError, Result};
use crate::id::{contains_video_id, extract_video_id};
use crate::query::SearchQuery;
use crate::types::{DiagReport, MirrorAttempt, SearchPage};
use crate::url::{EmbedLinks, PlayerSize};

/// Number of characters of the watch-info body echoed back by [`NicoRelay::diagnose`]
pub const DIAG_SAMPLE_CHARS: usize = 500;

/// Main relay API
///
/// Holds no per-request state; share one instance across handlers.
#[derive(Debug, Clone)]
pub struct NicoRelay {
    client: NicoClient,
}

impl NicoRelay {
    /// Create a new relay with default configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new() -> Result<Self> {
        let client = NicoClient::new()?;
        Ok(Self { client })
    }

    /// Create a new relay with custom client configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = NicoClient::with_config(config)?;
        Ok(Self { client })
    }

    /// Build embed links for whatever identifier `input` contains
    ///
    /// No network call is made.
    ///
    /// # Errors
    /// `MissingVideoId` if `input` holds no identifier
    ///
    /// # Example
    /// ```
    /// # fn example() -> nicolite_core::Result<()> {
    /// use nicolite_core::{NicoRelay, url::PlayerSize};
    /// let relay = NicoRelay::new()?;
    /// let links = relay.embed_links("https://www.nicovideo.jp/watch/sm9", PlayerSize::default())?;
    /// assert_eq!(links.watch, "https://www.nicovideo.jp/watch/sm9");
    /// # Ok(())
    /// # }
    /// ```
    pub fn embed_links(&self, input: &str, size: PlayerSize) -> Result<EmbedLinks> {
        let id = extract_video_id(input).ok_or(NicoError::MissingVideoId)?;
        Ok(EmbedLinks::new(id, size))
    }

    /// Run a search, falling back across mirrors in order
    ///
    /// Hosts are tried one at a time. 403/429/503 and transport failures move
    /// on to the next host; any other non-success status stops immediately.
    ///
    /// # Errors
    /// - `UpstreamStatus` when a mirror answers with a non-retryable status
    /// - `MirrorsExhausted` when every mirror failed, carrying the last attempt
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> nicolite_core::Result<()> {
    /// use nicolite_core::{NicoRelay, SearchQuery};
    /// let relay = NicoRelay::new()?;
    /// let query = SearchQuery::from_params("初音ミク", Some("10"), None, Some("new"))?;
    /// let page = relay.search(&query).await?;
    /// println!("{} hits, next page at {}", page.total_count, page.next_offset);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchPage> {
        let params = query.to_params();
        let mut last_attempt: Option<MirrorAttempt> = None;

        for host in self.client.search_hosts() {
            match self.client.search_once(host, &params).await {
                AttemptOutcome::Success(body) => {
                    let page = body.into_page(query.offset);
                    info!(
                        host = %host,
                        items = page.items.len(),
                        total = page.total_count,
                        "search served"
                    );
                    return Ok(page);
                }
                AttemptOutcome::Retryable(status) => {
                    warn!(host = %host, status, "search mirror refused request");
                    last_attempt = Some(MirrorAttempt {
                        host: host.clone(),
                        status: Some(status),
                        error: None,
                    });
                }
                AttemptOutcome::Fatal(status) => {
                    error!(host = %host, status, "search mirror returned non-retryable status");
                    return Err(NicoError::UpstreamStatus {
                        status,
                        host: host.clone(),
                    });
                }
                AttemptOutcome::NetworkError(message) => {
                    warn!(host = %host, error = %message, "search mirror unreachable");
                    last_attempt = Some(MirrorAttempt {
                        host: host.clone(),
                        status: None,
                        error: Some(message),
                    });
                }
            }
        }

        Err(NicoError::MirrorsExhausted(last_attempt))
    }

    /// Fetch a preview of the raw watch-info response for `raw_id`
    ///
    /// `raw_id` is forwarded as given once it is known to contain an
    /// identifier.
    ///
    /// # Errors
    /// - `BadId` if `raw_id` holds no identifier; no request is made
    /// - `HttpError` for transport failures
    pub async fn diagnose(&self, raw_id: &str) -> Result<DiagReport> {
        if !contains_video_id(raw_id) {
            return Err(NicoError::BadId);
        }

        let (status, body) = self.client.fetch_watch_info(raw_id).await?;

        Ok(DiagReport {
            ok: status.is_success(),
            status: status.as_u16(),
            sample: body.chars().take(DIAG_SAMPLE_CHARS).collect(),
        })
    }
}
