//! URL helper functions for Niconico
//!
//! Provides functions for building watch, embed, search and watch-info URLs.

use serde::Serialize;

use crate::id::VideoId;

const WATCH_BASE_URL: &str = "https://www.nicovideo.jp/watch";
const EMBED_BASE_URL: &str = "https://embed.nicovideo.jp/watch";

/// Path of the snapshot search endpoint on every mirror
pub const SEARCH_PATH: &str = "/api/v2/snapshot/video/contents/search";

/// Path prefix of the guest watch-info endpoint
pub const WATCH_INFO_PATH: &str = "/api/watch/v3_guest";

/// Default player width in pixels
pub const DEFAULT_PLAYER_WIDTH: u32 = 1280;
/// Default player height in pixels
pub const DEFAULT_PLAYER_HEIGHT: u32 = 720;

const MAX_PLAYER_WIDTH: u32 = 3840;
const MAX_PLAYER_HEIGHT: u32 = 2160;

/// Player dimensions used in embed URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerSize {
    pub width: u32,
    pub height: u32,
}

impl Default for PlayerSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_PLAYER_WIDTH,
            height: DEFAULT_PLAYER_HEIGHT,
        }
    }
}

impl PlayerSize {
    /// Builds a size from raw query values
    ///
    /// Missing, non-numeric or zero values fall back to 1280x720; oversized
    /// values are capped at 3840x2160.
    pub fn from_params(width: Option<&str>, height: Option<&str>) -> Self {
        Self {
            width: parse_dimension(width, DEFAULT_PLAYER_WIDTH, MAX_PLAYER_WIDTH),
            height: parse_dimension(height, DEFAULT_PLAYER_HEIGHT, MAX_PLAYER_HEIGHT),
        }
    }
}

fn parse_dimension(raw: Option<&str>, default: u32, max: u32) -> u32 {
    match raw.and_then(|v| v.trim().parse::<u32>().ok()) {
        Some(0) | None => default,
        Some(v) => v.min(max),
    }
}

/// Ready-to-embed links for one video
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedLinks {
    pub id: VideoId,
    pub script: String,
    pub iframe: String,
    pub watch: String,
}

impl EmbedLinks {
    /// Builds every link for `id` at the given player size
    pub fn new(id: VideoId, size: PlayerSize) -> Self {
        Self {
            script: build_script_embed_url(id.as_str(), size),
            iframe: build_iframe_embed_url(id.as_str(), size),
            watch: build_watch_url(id.as_str()),
            id,
        }
    }
}

/// Builds the canonical watch-page URL
///
/// # Example
/// ```
/// use nicolite_core::url::build_watch_url;
/// assert_eq!(build_watch_url("sm9"), "https://www.nicovideo.jp/watch/sm9");
/// ```
pub fn build_watch_url(id: &str) -> String {
    format!("{}/{}", WATCH_BASE_URL, id)
}

/// Builds the script-tag embed URL
///
/// # Example
/// ```
/// use nicolite_core::url::{build_script_embed_url, PlayerSize};
/// let url = build_script_embed_url("sm9", PlayerSize::default());
/// assert_eq!(url, "https://embed.nicovideo.jp/watch/sm9/script?w=1280&h=720");
/// ```
pub fn build_script_embed_url(id: &str, size: PlayerSize) -> String {
    format!(
        "{}/{}/script?w={}&h={}",
        EMBED_BASE_URL, id, size.width, size.height
    )
}

/// Builds the iframe embed URL
pub fn build_iframe_embed_url(id: &str, size: PlayerSize) -> String {
    format!("{}/{}?w={}&h={}", EMBED_BASE_URL, id, size.width, size.height)
}

/// Builds a snapshot search URL on `host` with encoded query parameters
///
/// # Example
/// ```
/// use nicolite_core::url::build_search_url;
/// let url = build_search_url("https://api.search.nicovideo.jp", &[("q", "初音 ミク".to_string())]);
/// assert_eq!(
///     url,
///     "https://api.search.nicovideo.jp/api/v2/snapshot/video/contents/search?q=%E5%88%9D%E9%9F%B3%20%E3%83%9F%E3%82%AF"
/// );
/// ```
pub fn build_search_url(host: &str, params: &[(&str, String)]) -> String {
    let query = params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    format!("{}{}?{}", host.trim_end_matches('/'), SEARCH_PATH, query)
}

/// Builds the guest watch-info URL for a raw identifier
///
/// The identifier is percent-encoded as a single path segment.
pub fn build_watch_info_url(api_base: &str, id: &str) -> String {
    format!(
        "{}{}/{}",
        api_base.trim_end_matches('/'),
        WATCH_INFO_PATH,
        urlencoding::encode(id)
    )
}
