//! Niconico Relay Core Library
//!
//! Turns free-form video references into embed links and relays snapshot
//! search queries across mirror hosts.
//!
//! # Overview
//!
//! This crate provides:
//! - Identifier extraction for `sm`/`so`/`nm` video ids
//! - Script, iframe and watch-page URL builders
//! - A search client that tries each mirror in order until one answers
//! - A diagnostic probe against the guest watch-info API
//!
//! # Example
//!
//! ```no_run
//! use nicolite_core::{NicoRelay, Result, SearchQuery};
//! use nicolite_core::url::PlayerSize;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let relay = NicoRelay::new()?;
//!
//!     // Embed links, no network involved
//!     let links = relay.embed_links("https://nico.ms/sm9", PlayerSize::default())?;
//!     println!("{}", links.script);
//!
//!     // Search with mirror fallback
//!     let query = SearchQuery::from_params("ボーカロイド", None, None, Some("new"))?;
//!     let page = relay.search(&query).await?;
//!     for item in &page.items {
//!         println!("{:?}: {:?}", item.id, item.title);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Mirrors
//!
//! The snapshot API answers unbranded or bursty traffic with 403/429/503.
//! [`NicoRelay::search`] treats those as a signal to try the next host and
//! stops on any other error status.

mod client;
mod error;
pub mod id;
mod query;
mod relay;
mod types;
pub mod url;

// Re-export client types
pub use client::{AttemptOutcome, ClientConfig, NicoClient, is_retryable_status};

// Re-export error types
pub use error::{NicoError, Result};

// Re-export id helpers
pub use id::{VideoId, contains_video_id, extract_video_id};

// Re-export search request model
pub use query::{SearchQuery, SortKey};

// Re-export main relay API
pub use relay::{DIAG_SAMPLE_CHARS, NicoRelay};

// Re-export data types
pub use types::{DiagReport, MirrorAttempt, SearchPage, SearchResultItem, SnapshotResponse};

// Re-export URL helpers for convenience
pub use url::{EmbedLinks, PlayerSize};
