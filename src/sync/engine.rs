//! Incremental new-entry detection.
//!
//! [`diff`] is a pure function of a decoded feed document and the feed's last
//! watermark. It performs no I/O and never mutates shared state; it returns
//! the new entries and a proposed watermark for the runner to commit after
//! delivery is confirmed.

use chrono::{DateTime, Utc};

use crate::error::{FeedmailError, Result};
use crate::feed::{EntryRecord, FeedDocument, FeedSnapshot, RawEntry, Watermark};

/// Which timestamp field a feed uses to date its entries.
///
/// Feeds are assumed internally consistent: the field is selected once per
/// document from the first entry, preferring `updated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CanonicalField {
    Updated,
    Published,
}

impl CanonicalField {
    fn select(first: &RawEntry) -> Self {
        if first.updated.is_some() {
            CanonicalField::Updated
        } else {
            CanonicalField::Published
        }
    }

    fn get(self, entry: &RawEntry) -> Option<DateTime<Utc>> {
        match self {
            CanonicalField::Updated => entry.updated,
            CanonicalField::Published => entry.published,
        }
    }
}

/// Result of diffing one feed document against its watermark.
#[derive(Debug, Clone)]
pub struct FeedDiff {
    /// New entries, oldest-first.
    pub snapshot: FeedSnapshot,
    /// Canonical timestamp of the newest qualifying entry, or the unchanged
    /// input watermark if nothing qualified.
    pub proposed_watermark: Option<Watermark>,
}

/// Determine which entries of `document` are newer than `last_watermark`.
///
/// Entries are scanned in the document's native newest-first order and the
/// scan stops at the first entry at or before the watermark; the engine does
/// not reorder entries, so a feed that violates the newest-first convention is
/// the feed's own responsibility. An absent watermark qualifies every entry.
///
/// Returns [`FeedmailError::MalformedFeed`] if a scanned entry lacks the
/// feed's canonical timestamp field. An empty document is a no-op, not an
/// error.
pub fn diff(
    document: &FeedDocument,
    source_url: &str,
    last_watermark: Option<Watermark>,
) -> Result<FeedDiff> {
    let mut snapshot = FeedSnapshot {
        title: document.title.clone(),
        source_url: source_url.to_string(),
        entries: Vec::new(),
    };

    let Some(first) = document.entries.first() else {
        return Ok(FeedDiff {
            snapshot,
            proposed_watermark: last_watermark,
        });
    };

    let field = CanonicalField::select(first);

    for raw in &document.entries {
        let timestamp = field.get(raw).ok_or_else(|| {
            FeedmailError::MalformedFeed(format!(
                "{source_url}: entry '{}' has no usable timestamp",
                raw.title
            ))
        })?;

        // Watermark comparison happens at second granularity.
        if let Some(last) = last_watermark {
            if Watermark::from(timestamp) <= last {
                break;
            }
        }

        let content = raw
            .content
            .clone()
            .or_else(|| raw.summary.clone())
            .unwrap_or_default();

        snapshot.entries.push(EntryRecord {
            link: raw.link.clone(),
            title: raw.title.clone(),
            published_at: timestamp,
            content,
        });
    }

    // Oldest-first, so an interrupted dispatch leaves the oldest entries
    // delivered and the watermark can stop just before the first failure.
    snapshot.entries.reverse();

    let proposed_watermark = snapshot
        .entries
        .last()
        .map(|entry| Watermark::from(entry.published_at))
        .or(last_watermark);

    Ok(FeedDiff {
        snapshot,
        proposed_watermark,
    })
}
