//! Search request model
//!
//! Validates caller input and maps it onto snapshot API parameters.

use crate::error::{NicoError, Result};

/// Default page size
pub const DEFAULT_LIMIT: u64 = 24;
/// Upper bound on page size
pub const MAX_LIMIT: u64 = 50;
/// Records below this play count are filtered upstream to keep queries cheap
pub const MIN_VIEW_COUNT: u64 = 50;

const TARGETS: &str = "title,description,tags";
const FIELDS: &str =
    "contentId,title,thumbnailUrl,viewCounter,commentCounter,startTime,lengthSeconds";
const CONTEXT: &str = "nico-lite-viewer";

/// Caller-facing sort order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Popular,
    New,
    Comments,
}

impl SortKey {
    /// Parses a sort name; anything unrecognized is `Popular`
    pub fn from_param(raw: &str) -> Self {
        match raw.trim() {
            "new" => SortKey::New,
            "comments" => SortKey::Comments,
            _ => SortKey::Popular,
        }
    }

    /// Upstream `_sort` token
    pub fn upstream_field(self) -> &'static str {
        match self {
            SortKey::Popular => "-viewCounter",
            SortKey::New => "-startTime",
            SortKey::Comments => "-commentCounter",
        }
    }
}

/// A validated search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keywords: String,
    pub limit: u64,
    pub offset: u64,
    pub sort: SortKey,
}

impl SearchQuery {
    /// Builds a query from raw request parameters
    ///
    /// # Arguments
    /// * `keywords` - Search text, trimmed
    /// * `limit` - Page size, default 24, clamped to `0..=50`
    /// * `offset` - Start offset, default 0, negative values become 0
    /// * `sort` - `popular`, `new` or `comments`
    ///
    /// Non-numeric `limit`/`offset` fall back to their defaults.
    ///
    /// # Errors
    /// `EmptyQuery` if keywords are empty or whitespace only
    pub fn from_params(
        keywords: &str,
        limit: Option<&str>,
        offset: Option<&str>,
        sort: Option<&str>,
    ) -> Result<Self> {
        let trimmed = keywords.trim();
        if trimmed.is_empty() {
            return Err(NicoError::EmptyQuery);
        }

        let limit = parse_int(limit)
            .map(|v| v.clamp(0, MAX_LIMIT as i64) as u64)
            .unwrap_or(DEFAULT_LIMIT);
        let offset = parse_int(offset).map(|v| v.max(0) as u64).unwrap_or(0);
        let sort = sort.map(SortKey::from_param).unwrap_or_default();

        Ok(Self {
            keywords: trimmed.to_string(),
            limit,
            offset,
            sort,
        })
    }

    /// Snapshot API query parameters, in a stable order
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.keywords.clone()),
            ("targets", TARGETS.to_string()),
            ("fields", FIELDS.to_string()),
            ("_sort", self.sort.upstream_field().to_string()),
            ("_offset", self.offset.to_string()),
            ("_limit", self.limit.to_string()),
            ("_context", CONTEXT.to_string()),
            ("filters[viewCounter][gte]", MIN_VIEW_COUNT.to_string()),
        ]
    }
}

fn parse_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
}
