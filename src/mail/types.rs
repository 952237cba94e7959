//! Mail types for feedmail.

use crate::error::Result;

/// One outbound email for one entry/recipient pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Sender address.
    pub from: String,
    /// Single recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
}

/// Capability for delivering one email.
///
/// A failed delivery is reported through the returned error, never swallowed.
pub trait Mailer {
    /// Deliver one message to its single recipient.
    fn send(&self, message: &OutboundMessage)
        -> impl std::future::Future<Output = Result<()>> + Send;
}
