//! Core data types for the Niconico relay
//!
//! Upstream records are deserialized into `Snapshot*` structs and projected
//! into the shapes the relay hands back to its callers.

use serde::{Deserialize, Serialize};

/// One search hit as returned to callers
///
/// Every field is optional; upstream omissions serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    /// Content id (e.g., "sm9")
    pub id: Option<String>,

    /// Video title
    pub title: Option<String>,

    /// Thumbnail image URL
    pub thumbnail_url: Option<String>,

    /// Play count
    pub view_count: Option<u64>,

    /// Comment count
    pub comment_count: Option<u64>,

    /// Upload time as sent by upstream (ISO 8601 with offset)
    pub start_time: Option<String>,

    /// Duration in seconds
    pub length_seconds: Option<u64>,
}

/// A page of search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    /// Total number of hits upstream reports, or the item count when it doesn't
    pub total_count: u64,

    /// Reshaped results
    pub items: Vec<SearchResultItem>,

    /// Offset to request for the following page
    pub next_offset: u64,
}

/// Last failed mirror, reported back when every mirror is exhausted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorAttempt {
    /// Base URL of the mirror
    pub host: String,

    /// HTTP status, absent when the request never got a response
    pub status: Option<u16>,

    /// Transport or decoding error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of a diagnostic watch-info lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagReport {
    /// Whether upstream answered with a 2xx status
    pub ok: bool,

    /// Upstream HTTP status
    pub status: u16,

    /// Leading slice of the raw body
    pub sample: String,
}

/// Snapshot search API response envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotResponse {
    #[serde(default)]
    pub meta: Option<SnapshotMeta>,
    #[serde(default)]
    pub data: Option<Vec<SnapshotVideo>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMeta {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

/// A single record in the snapshot search API response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotVideo {
    #[serde(default)]
    pub content_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub view_counter: Option<u64>,
    #[serde(default)]
    pub comment_counter: Option<u64>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub length_seconds: Option<u64>,
}

impl From<SnapshotVideo> for SearchResultItem {
    fn from(video: SnapshotVideo) -> Self {
        Self {
            id: video.content_id,
            title: video.title,
            thumbnail_url: video.thumbnail_url,
            view_count: video.view_counter,
            comment_count: video.comment_counter,
            start_time: video.start_time,
            length_seconds: video.length_seconds,
        }
    }
}

impl SnapshotResponse {
    /// Reshape into a [`SearchPage`] starting at `offset`
    pub fn into_page(self, offset: u64) -> SearchPage {
        let items: Vec<SearchResultItem> = self
            .data
            .unwrap_or_default()
            .into_iter()
            .map(SearchResultItem::from)
            .collect();

        let returned = items.len() as u64;
        let total_count = self
            .meta
            .and_then(|meta| meta.total_count)
            .unwrap_or(returned);

        SearchPage {
            total_count,
            items,
            next_offset: offset + returned,
        }
    }
}
