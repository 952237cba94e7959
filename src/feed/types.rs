//! Feed types for feedmail.

use chrono::{DateTime, Utc};

/// A decoded feed document as returned by a [`FeedSource`](super::FeedSource).
///
/// Entries are kept in the feed's native delivery order, which by convention
/// is newest-first. The engine relies on that convention for its short-circuit
/// scan; it does not reorder entries itself.
#[derive(Debug, Clone)]
pub struct FeedDocument {
    /// Feed-level title, used as the subject-line prefix.
    pub title: String,
    /// Raw entries in native feed order.
    pub entries: Vec<RawEntry>,
}

/// One raw entry from a decoded feed document.
///
/// Feeds date their entries with either `updated` or `published`; one of the
/// two is selected per document as the canonical ordering field.
#[derive(Debug, Clone)]
pub struct RawEntry {
    /// Stable identifier/URL of the entry.
    pub link: String,
    /// Entry title.
    pub title: String,
    /// "Updated" timestamp, if the feed reports one.
    pub updated: Option<DateTime<Utc>>,
    /// "Published" timestamp, if the feed reports one.
    pub published: Option<DateTime<Utc>>,
    /// Full content body, if available.
    pub content: Option<String>,
    /// Short summary, if available.
    pub summary: Option<String>,
}

/// A normalized feed entry selected for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRecord {
    /// Stable identifier/URL of the entry.
    pub link: String,
    /// Entry title.
    pub title: String,
    /// The feed's canonical timestamp for this entry. Always populated.
    pub published_at: DateTime<Utc>,
    /// Full body, else summary, else empty string.
    pub content: String,
}

/// The new entries of one feed, ready for dispatch.
///
/// Entries are ordered oldest-first so that an interrupted send leaves the
/// oldest entries delivered and the watermark can stop just before the first
/// failure.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    /// Feed-level title.
    pub title: String,
    /// The feed's identifying URL; matches its watermark key in the config.
    pub source_url: String,
    /// New entries, oldest-first.
    pub entries: Vec<EntryRecord>,
}
