//! Video identifier extraction
//!
//! Niconico identifiers are a two-letter prefix (`sm`, `so` or `nm`)
//! followed by digits. They show up bare, inside watch URLs, inside embed
//! snippets or in arbitrary pasted text.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static VIDEO_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i-u:sm|so|nm)[0-9]+").expect("video id pattern is valid"));

/// A video identifier exactly as it appeared in the input
///
/// Case of the prefix is preserved (`SM9` stays `SM9`). Existence is not
/// checked against any upstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extracts the first video identifier from free-form text
///
/// # Arguments
/// * `input` - URL, bare ID or any text
///
/// # Returns
/// `Some(VideoId)` with the first match, `None` when nothing matches
///
/// # Example
/// ```
/// use nicolite_core::extract_video_id;
/// let id = extract_video_id("https://www.nicovideo.jp/watch/sm9?ref=top");
/// assert_eq!(id.unwrap().as_str(), "sm9");
/// assert!(extract_video_id("no id here").is_none());
/// ```
pub fn extract_video_id(input: &str) -> Option<VideoId> {
    VIDEO_ID_RE
        .find(input)
        .map(|m| VideoId(m.as_str().to_string()))
}

/// Checks whether an identifier occurs anywhere in `input`
pub fn contains_video_id(input: &str) -> bool {
    VIDEO_ID_RE.is_match(input)
}
