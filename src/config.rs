//! Configuration module for feedmail.
//!
//! The whole run state lives in one TOML file: credentials, recipients, and
//! the per-feed watermarks. The runner returns an updated [`Config`] and the
//! caller persists it through a [`ConfigStore`] once at the end of the run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FeedmailError, Result};
use crate::feed::Watermark;

/// SMTP submission configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// SMTP relay host.
    #[serde(default = "default_smtp_host")]
    pub host: String,
    /// Submission port.
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// Account username; also the default sender address.
    #[serde(default)]
    pub username: String,
    /// Account password.
    #[serde(default)]
    pub password: String,
    /// Sender address override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

impl SmtpConfig {
    /// The address outgoing mail is sent from.
    pub fn sender(&self) -> &str {
        self.from.as_deref().unwrap_or(&self.username)
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            from: None,
        }
    }
}

/// Feed fetching configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Read timeout in seconds.
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,
    /// Total request timeout in seconds.
    #[serde(default = "default_total_timeout")]
    pub total_timeout_secs: u64,
    /// Maximum number of redirects.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    /// Maximum feed size in bytes.
    #[serde(default = "default_max_feed_size")]
    pub max_feed_size_bytes: u64,
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_read_timeout() -> u64 {
    20
}

fn default_total_timeout() -> u64 {
    30
}

fn default_max_redirects() -> usize {
    5
}

fn default_max_feed_size() -> u64 {
    5 * 1024 * 1024
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout(),
            read_timeout_secs: default_read_timeout(),
            total_timeout_secs: default_total_timeout(),
            max_redirects: default_max_redirects(),
            max_feed_size_bytes: default_max_feed_size(),
        }
    }
}

/// Synchronization run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Maximum number of feeds processed concurrently.
    #[serde(default = "default_max_concurrent_feeds")]
    pub max_concurrent_feeds: usize,
}

fn default_max_concurrent_feeds() -> usize {
    4
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_concurrent_feeds: default_max_concurrent_feeds(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/feedmail.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Per-feed configuration and synchronization state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Display name for the feed.
    pub name: String,
    /// Watermark of the newest fully delivered entry. Absent until the feed
    /// has been synchronized once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<Watermark>,
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Recipient addresses; every new entry is mailed to each of them.
    #[serde(default)]
    pub recipients: Vec<String>,
    /// SMTP submission settings.
    #[serde(default)]
    pub smtp: SmtpConfig,
    /// Feed fetching settings.
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Synchronization run settings.
    #[serde(default)]
    pub sync: SyncConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Watched feeds, keyed by feed URL.
    #[serde(default)]
    pub feeds: BTreeMap<String, FeedConfig>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(FeedmailError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| FeedmailError::Config(format!("config parse error: {e}")))
    }

    /// Serialize the configuration back to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| FeedmailError::Config(format!("config serialize error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `FEEDMAIL_SMTP_PASSWORD`: Override the SMTP account password
    pub fn apply_env_overrides(&mut self) {
        if let Ok(password) = std::env::var("FEEDMAIL_SMTP_PASSWORD") {
            if !password.is_empty() {
                self.smtp.password = password;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - The SMTP username is empty
    /// - The recipient list is empty
    pub fn validate(&self) -> Result<()> {
        if self.smtp.username.is_empty() {
            return Err(FeedmailError::Config(
                "smtp.username is not set. \
                 Set it in the config file before running."
                    .to_string(),
            ));
        }
        if self.recipients.is_empty() {
            return Err(FeedmailError::Config(
                "recipient list is empty; nothing to deliver to".to_string(),
            ));
        }
        Ok(())
    }
}

/// Capability for loading and persisting the run configuration.
pub trait ConfigStore {
    /// Load the configuration.
    fn load(&self) -> Result<Config>;

    /// Persist the configuration, including updated watermarks.
    fn save(&self, config: &Config) -> Result<()>;
}

/// Config store backed by a single TOML file.
pub struct TomlConfigStore {
    path: PathBuf,
}

impl TomlConfigStore {
    /// Create a store for the given config file path.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// The path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for TomlConfigStore {
    fn load(&self) -> Result<Config> {
        Config::load_with_env(&self.path)
    }

    fn save(&self, config: &Config) -> Result<()> {
        let content = config.to_toml()?;
        std::fs::write(&self.path, content).map_err(FeedmailError::Io)
    }
}
