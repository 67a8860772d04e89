//! Error types for the Niconico relay
//!
//! One enum covers input validation, upstream failures and decoding.
//! Serializes as its display string so it can be embedded in JSON bodies.

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::types::MirrorAttempt;

/// Error type for all relay operations
#[derive(Error, Debug)]
pub enum NicoError {
    /// Free-form input contained no `sm`/`so`/`nm` identifier
    #[error("no video id found")]
    MissingVideoId,

    /// Diagnostic probe received something that is not an identifier
    #[error("bad id")]
    BadId,

    /// Search keywords were empty or whitespace only
    #[error("search keywords are empty")]
    EmptyQuery,

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Upstream body could not be decoded
    #[error("Failed to parse upstream response: {0}")]
    ParseError(String),

    /// A mirror answered with a status that is not worth retrying elsewhere
    #[error("search api {status}")]
    UpstreamStatus { status: u16, host: String },

    /// Every mirror failed with a retryable condition
    #[error("search failed")]
    MirrorsExhausted(Option<MirrorAttempt>),
}

impl Serialize for NicoError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for relay operations
pub type Result<T> = std::result::Result<T, NicoError>;
