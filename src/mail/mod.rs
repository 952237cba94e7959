//! Mail module for feedmail.
//!
//! This module provides outbound email delivery:
//! - The [`Mailer`] capability and message type
//! - SMTP transport via lettre (STARTTLS submission)

mod smtp;
mod types;

pub use smtp::SmtpMailer;
pub use types::{Mailer, OutboundMessage};
