//! Notification dispatch.
//!
//! Fans out each new entry to every recipient through the [`Mailer`]
//! capability and reports how far the feed's watermark may safely advance.

use tracing::{info, warn};

use crate::feed::{EntryRecord, FeedSnapshot, Watermark};
use crate::mail::{Mailer, OutboundMessage};

/// One failed delivery attempt.
#[derive(Debug, Clone)]
pub struct SendFailure {
    /// Title of the entry that could not be delivered.
    pub entry_title: String,
    /// Recipient the transport rejected.
    pub recipient: String,
    /// Transport error text.
    pub reason: String,
}

/// Outcome of dispatching one feed's new entries.
#[derive(Debug, Clone, Default)]
pub struct DispatchResult {
    /// Number of individual messages handed to the transport successfully.
    pub sent: usize,
    /// Watermark of the newest entry delivered to every recipient, if any.
    ///
    /// Advancing stops at the first entry where any recipient send fails, so
    /// the watermark never skips over an entry some recipient never received.
    pub advanced_to: Option<Watermark>,
    /// The failure that halted the batch, if one occurred.
    pub failure: Option<SendFailure>,
}

/// Composes and sends one email per entry/recipient pair.
pub struct NotificationDispatcher {
    from: String,
}

impl NotificationDispatcher {
    /// Create a dispatcher sending from the given address.
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }

    /// Compose the message for one entry/recipient pair.
    ///
    /// Subject is `"[<feed title>] <entry title>"`; the body is the link and
    /// the content, newline-terminated, with no further templating.
    fn compose(&self, feed_title: &str, entry: &EntryRecord, to: &str) -> OutboundMessage {
        OutboundMessage {
            from: self.from.clone(),
            to: to.to_string(),
            subject: format!("[{feed_title}] {}", entry.title),
            body: format!("{}\n{}\n", entry.link, entry.content),
        }
    }

    /// Deliver every entry to every recipient, oldest entry first.
    ///
    /// An entry is credited only once all of its per-recipient sends have
    /// succeeded. The first failure halts the whole batch; later entries are
    /// not attempted for any recipient.
    pub async fn send_all<M: Mailer>(
        &self,
        snapshot: &FeedSnapshot,
        recipients: &[String],
        mailer: &M,
    ) -> DispatchResult {
        let mut result = DispatchResult::default();

        'entries: for entry in &snapshot.entries {
            for to in recipients {
                let message = self.compose(&snapshot.title, entry, to);

                if let Err(e) = mailer.send(&message).await {
                    warn!(
                        "failed to send '{}' ({}) to {to}: {e}",
                        entry.title, snapshot.source_url
                    );
                    result.failure = Some(SendFailure {
                        entry_title: entry.title.clone(),
                        recipient: to.clone(),
                        reason: e.to_string(),
                    });
                    break 'entries;
                }

                info!("sent {} to {to}", message.subject);
                result.sent += 1;
            }

            result.advanced_to = Some(Watermark::from(entry.published_at));
        }

        result
    }
}
