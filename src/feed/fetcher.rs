//! Feed fetching and decoding.
//!
//! [`HttpFeedFetcher`] retrieves RSS/Atom documents over HTTP with resource
//! limits and decodes them with feed-rs into [`FeedDocument`] values.

use std::time::Duration;

use feed_rs::parser;
use reqwest::Client;

use crate::config::FetchConfig;
use crate::error::{FeedmailError, Result};
use crate::feed::types::{FeedDocument, RawEntry};

/// User agent string for feed fetching.
const USER_AGENT: &str = "feedmail/0.1 (feed notifier)";

/// Capability for retrieving and decoding one feed.
pub trait FeedSource {
    /// Fetch and decode the feed at `url`.
    fn fetch(&self, url: &str) -> impl std::future::Future<Output = Result<FeedDocument>> + Send;
}

/// Feed fetcher backed by an HTTP client with timeouts and size limits.
pub struct HttpFeedFetcher {
    client: Client,
    max_feed_size: u64,
}

impl HttpFeedFetcher {
    /// Create a fetcher from the `[fetch]` configuration.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .read_timeout(Duration::from_secs(config.read_timeout_secs))
            .timeout(Duration::from_secs(config.total_timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FeedmailError::Fetch(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            max_feed_size: config.max_feed_size_bytes,
        })
    }
}

impl FeedSource for HttpFeedFetcher {
    async fn fetch(&self, url: &str) -> Result<FeedDocument> {
        validate_url(url)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FeedmailError::Fetch(format!("{url}: {e}")))?;

        if !response.status().is_success() {
            return Err(FeedmailError::Fetch(format!(
                "{url}: HTTP {}",
                response.status()
            )));
        }

        if let Some(content_length) = response.content_length() {
            if content_length > self.max_feed_size {
                return Err(FeedmailError::Fetch(format!(
                    "{url}: feed too large: {content_length} bytes (max {} bytes)",
                    self.max_feed_size
                )));
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FeedmailError::Fetch(format!("{url}: failed to read response: {e}")))?;

        if bytes.len() as u64 > self.max_feed_size {
            return Err(FeedmailError::Fetch(format!(
                "{url}: feed too large: {} bytes (max {} bytes)",
                bytes.len(),
                self.max_feed_size
            )));
        }

        parse_document(&bytes).map_err(|e| FeedmailError::Fetch(format!("{url}: {e}")))
    }
}

/// Check that a feed URL is well-formed and uses http or https.
pub fn validate_url(url: &str) -> Result<()> {
    let parsed =
        url::Url::parse(url).map_err(|e| FeedmailError::Fetch(format!("invalid URL: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(FeedmailError::Fetch(format!(
            "unsupported URL scheme: {scheme}"
        ))),
    }
}

/// Decode feed bytes into a [`FeedDocument`].
///
/// Entry order is preserved as delivered by the feed.
pub fn parse_document(bytes: &[u8]) -> Result<FeedDocument> {
    let feed = parser::parse(bytes)
        .map_err(|e| FeedmailError::Fetch(format!("failed to parse feed: {e}")))?;

    let title = feed
        .title
        .map(|t| t.content)
        .unwrap_or_else(|| "Untitled Feed".to_string());

    let entries: Vec<RawEntry> = feed
        .entries
        .into_iter()
        .map(|entry| {
            let link = entry
                .links
                .first()
                .map(|l| l.href.clone())
                .unwrap_or_else(|| entry.id.clone());
            let entry_title = entry
                .title
                .map(|t| t.content)
                .unwrap_or_else(|| "Untitled".to_string());

            RawEntry {
                link,
                title: entry_title,
                updated: entry.updated,
                published: entry.published,
                content: entry.content.and_then(|c| c.body),
                summary: entry.summary.map(|t| t.content),
            }
        })
        .collect();

    Ok(FeedDocument { title, entries })
}
