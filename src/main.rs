use std::process::ExitCode;

use tracing::{error, info};

use feedmail::config::ConfigStore;
use feedmail::{HttpFeedFetcher, SmtpMailer, SyncRunner, TomlConfigStore};

#[tokio::main]
async fn main() -> ExitCode {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let store = TomlConfigStore::new(&config_path);
    let config = match store.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    if let Err(e) = feedmail::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        feedmail::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        error!("invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    let fetcher = match HttpFeedFetcher::new(&config.fetch) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            error!("failed to set up feed fetching: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mailer = match SmtpMailer::new(&config.smtp) {
        Ok(mailer) => mailer,
        Err(e) => {
            error!("failed to set up mail transport: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!("feedmail starting: {} feed(s) configured", config.feeds.len());

    let runner = SyncRunner::new(
        fetcher,
        mailer,
        config.smtp.sender(),
        config.sync.max_concurrent_feeds,
    );
    let updated = runner.run(config).await;

    if let Err(e) = store.save(&updated) {
        error!("failed to save {config_path}: {e}");
        return ExitCode::FAILURE;
    }

    info!("run complete, watermarks saved");
    ExitCode::SUCCESS
}
