//! feedmail - RSS/Atom to email notifier
//!
//! Pulls a configured set of syndication feeds, determines which entries are
//! new since the last run, and delivers each new entry as an email to every
//! configured recipient. One process, one run per invocation; an external
//! scheduler provides the cadence.

pub mod config;
pub mod error;
pub mod feed;
pub mod logging;
pub mod mail;
pub mod sync;

pub use config::{Config, ConfigStore, FeedConfig, TomlConfigStore};
pub use error::{FeedmailError, Result};
pub use feed::{
    EntryRecord, FeedDocument, FeedSnapshot, FeedSource, HttpFeedFetcher, RawEntry, Watermark,
};
pub use mail::{Mailer, OutboundMessage, SmtpMailer};
pub use sync::{DispatchResult, NotificationDispatcher, SyncRunner};
