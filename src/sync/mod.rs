//! Synchronization module for feedmail.
//!
//! This module provides the incremental sync and dispatch engine:
//! - New-entry detection against the per-feed watermark
//! - Per-entry, per-recipient notification dispatch
//! - The run orchestrator that commits watermarks after confirmed delivery

mod dispatcher;
pub mod engine;
mod runner;

pub use dispatcher::{DispatchResult, NotificationDispatcher, SendFailure};
pub use engine::FeedDiff;
pub use runner::SyncRunner;
