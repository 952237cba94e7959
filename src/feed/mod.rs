//! Feed module for feedmail.
//!
//! This module provides the feed data model and fetching:
//! - Decoded document and normalized entry types
//! - The per-feed synchronization watermark
//! - HTTP fetching and feed-rs decoding behind the [`FeedSource`] capability

mod fetcher;
mod types;
mod watermark;

pub use fetcher::{parse_document, validate_url, FeedSource, HttpFeedFetcher};
pub use types::{EntryRecord, FeedDocument, FeedSnapshot, RawEntry};
pub use watermark::Watermark;
