//! Test helpers for feedmail integration tests.
//!
//! Provides in-memory `FeedSource` and `Mailer` fakes plus fixture builders.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use feedmail::config::FeedConfig;
use feedmail::error::{FeedmailError, Result};
use feedmail::{Config, FeedDocument, FeedSource, Mailer, OutboundMessage, RawEntry};

/// Feed source serving fixed documents from memory.
///
/// URLs registered as broken return a fetch error; unknown URLs do too.
#[derive(Default)]
pub struct StaticFeedSource {
    documents: HashMap<String, FeedDocument>,
    broken: Vec<String>,
}

impl StaticFeedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, url: &str, document: FeedDocument) -> Self {
        self.documents.insert(url.to_string(), document);
        self
    }

    pub fn with_broken(mut self, url: &str) -> Self {
        self.broken.push(url.to_string());
        self
    }
}

impl FeedSource for StaticFeedSource {
    async fn fetch(&self, url: &str) -> Result<FeedDocument> {
        if self.broken.iter().any(|b| b == url) {
            return Err(FeedmailError::Fetch(format!("{url}: connection refused")));
        }
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| FeedmailError::Fetch(format!("{url}: not found")))
    }
}

/// Mailer that records every delivered message.
///
/// Cloning shares the underlying record, so tests can keep a handle while the
/// runner owns the mailer. Optionally fails one entry/recipient pair.
#[derive(Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
    fail_on: Option<(String, String)>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail delivery of the entry whose subject contains `entry_title` when
    /// addressed to `recipient`.
    pub fn failing_on(entry_title: &str, recipient: &str) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_on: Some((entry_title.to_string(), recipient.to_string())),
        }
    }

    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl Mailer for RecordingMailer {
    async fn send(&self, message: &OutboundMessage) -> Result<()> {
        if let Some((title, recipient)) = &self.fail_on {
            if message.subject.contains(title.as_str()) && &message.to == recipient {
                return Err(FeedmailError::Send("mock transport failure".to_string()));
            }
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Timestamp helper: day/hour in June 2025, UTC.
pub fn ts(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, day, hour, 0, 0).unwrap()
}

/// Build a raw entry dated with `published`.
pub fn entry(title: &str, published: DateTime<Utc>) -> RawEntry {
    RawEntry {
        link: format!("https://example.com/{title}"),
        title: title.to_string(),
        updated: None,
        published: Some(published),
        content: Some(format!("{title} content")),
        summary: None,
    }
}

/// A three-entry document in newest-first feed order: T3 > T2 > T1.
pub fn three_entry_document(feed_title: &str) -> FeedDocument {
    FeedDocument {
        title: feed_title.to_string(),
        entries: vec![
            entry("third", ts(3, 0)),
            entry("second", ts(2, 0)),
            entry("first", ts(1, 0)),
        ],
    }
}

/// Minimal run config: one named feed and two recipients.
pub fn config_with_feed(url: &str, name: &str) -> Config {
    let mut config = Config::default();
    config.smtp.username = "sender@example.com".to_string();
    config.recipients = vec![
        "alice@example.com".to_string(),
        "bob@example.com".to_string(),
    ];
    config.feeds.insert(
        url.to_string(),
        FeedConfig {
            name: name.to_string(),
            last_update: None,
        },
    );
    config
}
