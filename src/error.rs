//! Error types for feedmail.

use thiserror::Error;

/// Common error type for feedmail.
#[derive(Error, Debug)]
pub enum FeedmailError {
    /// Feed fetch error (unreachable, HTTP failure, or undecodable document).
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Malformed feed document (no usable canonical timestamp).
    #[error("malformed feed: {0}")]
    MalformedFeed(String),

    /// Mail transport rejected a message.
    #[error("send error: {0}")]
    Send(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for feedmail operations.
pub type Result<T> = std::result::Result<T, FeedmailError>;
