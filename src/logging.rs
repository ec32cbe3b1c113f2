//! File logging setup
//!
//! The terminal belongs to the UI, so tracing output goes to
//! `smartlibrary.log` in the configured log directory.

use crate::config::Config;
use anyhow::Result;
use std::fs;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_ENV: &str = "SMARTLIBRARY_LOG";
const LOG_FILE: &str = "smartlibrary.log";

/// Build the log filter: SMARTLIBRARY_LOG first, then the configured level
pub fn build_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}

/// Install the global subscriber. Without a log directory logging is disabled.
pub fn init(config: &Config) -> Result<()> {
    let Some(dir) = config.log_directory() else {
        return Ok(());
    };
    fs::create_dir_all(&dir)?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE);

    tracing_subscriber::registry()
        .with(build_filter(config))
        .with(
            fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {}", e))?;

    tracing::info!(
        "SmartLibrary v{} starting, logging to {}",
        env!("CARGO_PKG_VERSION"),
        dir.join(LOG_FILE).display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_uses_configured_level() {
        let config = Config {
            log_level: "debug".to_string(),
            ..Config::default()
        };
        if std::env::var(LOG_ENV).is_err() {
            let filter = build_filter(&config);
            assert_eq!(filter.to_string(), "debug");
        }
    }
}
