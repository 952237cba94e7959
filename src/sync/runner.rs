//! One full synchronization run.
//!
//! The runner wires the collaborators together: fetch each configured feed,
//! diff it against its stored watermark, dispatch the new entries, and commit
//! the advanced watermark into the configuration it returns. The caller
//! persists the result through a `ConfigStore`.

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::feed::{FeedSource, Watermark};
use crate::mail::Mailer;
use crate::sync::dispatcher::NotificationDispatcher;
use crate::sync::engine;

/// Orchestrates one run across all configured feeds.
///
/// Feeds are processed concurrently up to the configured limit; sends within
/// one feed stay strictly sequential so an earlier entry is never credited
/// after a later one.
pub struct SyncRunner<S, M> {
    source: S,
    mailer: M,
    dispatcher: NotificationDispatcher,
    max_concurrent_feeds: usize,
}

impl<S, M> SyncRunner<S, M>
where
    S: FeedSource + Sync,
    M: Mailer + Sync,
{
    /// Create a runner from its collaborators.
    pub fn new(
        source: S,
        mailer: M,
        sender: impl Into<String>,
        max_concurrent_feeds: usize,
    ) -> Self {
        Self {
            source,
            mailer,
            dispatcher: NotificationDispatcher::new(sender),
            max_concurrent_feeds: max_concurrent_feeds.max(1),
        }
    }

    /// Run one synchronization pass and return the configuration with
    /// updated watermarks.
    ///
    /// A failure in one feed's pipeline never aborts the others; that feed's
    /// watermark simply stays where it was.
    pub async fn run(&self, mut config: Config) -> Config {
        let recipients = config.recipients.clone();

        let jobs: Vec<(String, Option<Watermark>)> = config
            .feeds
            .iter()
            .map(|(url, feed)| (url.clone(), feed.last_update))
            .collect();

        info!("synchronizing {} feed(s)", jobs.len());

        let results: Vec<(String, Option<Watermark>)> = stream::iter(jobs)
            .map(|(url, last)| {
                let recipients = &recipients;
                async move {
                    let advanced = self.sync_feed(&url, last, recipients).await;
                    (url, advanced)
                }
            })
            .buffer_unordered(self.max_concurrent_feeds)
            .collect()
            .await;

        for (url, advanced) in results {
            if let Some(watermark) = advanced {
                if let Some(feed) = config.feeds.get_mut(&url) {
                    feed.last_update = Some(watermark);
                }
            }
        }

        config
    }

    /// Synchronize one feed.
    ///
    /// Returns the watermark to commit, or `None` if it must stay unchanged
    /// (no new entries, or an error anywhere in the pipeline).
    async fn sync_feed(
        &self,
        url: &str,
        last_watermark: Option<Watermark>,
        recipients: &[String],
    ) -> Option<Watermark> {
        let document = match self.source.fetch(url).await {
            Ok(document) => document,
            Err(e) => {
                warn!("skipping feed {url}: {e}");
                return None;
            }
        };

        let diff = match engine::diff(&document, url, last_watermark) {
            Ok(diff) => diff,
            Err(e) => {
                warn!("skipping feed {url}: {e}");
                return None;
            }
        };

        if diff.snapshot.entries.is_empty() {
            debug!("{}: no new entries", diff.snapshot.title);
            return None;
        }

        info!(
            "{}: {} new entr(ies) since {}",
            diff.snapshot.title,
            diff.snapshot.entries.len(),
            last_watermark
                .map(|w| w.to_string())
                .unwrap_or_else(|| "the beginning".to_string())
        );

        let result = self
            .dispatcher
            .send_all(&diff.snapshot, recipients, &self.mailer)
            .await;

        if let Some(failure) = &result.failure {
            warn!(
                "{url}: delivery of '{}' to {} failed, watermark held back: {}",
                failure.entry_title, failure.recipient, failure.reason
            );
        }

        result.advanced_to
    }
}
