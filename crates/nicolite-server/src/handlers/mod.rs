//! HTTP request handlers.

pub mod diag;
pub mod parse;
pub mod search;

use serde::Serialize;

pub use diag::diagnose;
pub use parse::parse_input;
pub use search::search_videos;

/// Raw query string as ordered key/value pairs.
///
/// Repeated keys are kept; lookups take the first occurrence, so
/// `?q=sm9&q=other` reads as `q=sm9` instead of being rejected.
#[derive(Debug, Default)]
pub struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl From<Vec<(String, String)>> for QueryPairs {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

/// Success body: `{ "ok": true, ...fields of T }`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub ok: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self { ok: true, data }
    }
}
