//! Structured logging setup
//!
//! The subscriber is built from [`LoggingConfig`] and returned to the caller,
//! who decides whether to install it globally with [`init`] or scope it with
//! `tracing::subscriber::with_default`.

use ck_shared::config::{LogFormat, LoggingConfig};
use tracing::level_filters::LevelFilter;
use tracing::Subscriber;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::InfrastructureError;

/// Maps a configured level name to a filter
///
/// Matching is case-insensitive; unknown names fall back to debug.
pub fn level_filter(level: &str) -> LevelFilter {
    match level.to_ascii_lowercase().as_str() {
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::DEBUG,
    }
}

/// Builds a subscriber for `config`
///
/// `RUST_LOG`, when set, takes precedence over the configured level.
pub fn build_subscriber(config: &LoggingConfig) -> Box<dyn Subscriber + Send + Sync> {
    let filter = EnvFilter::builder()
        .with_default_directive(level_filter(&config.level).into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_target(true);

    match config.format {
        LogFormat::Json => Box::new(builder.json().finish()),
        LogFormat::Pretty => Box::new(builder.pretty().finish()),
        LogFormat::Compact => Box::new(builder.compact().finish()),
    }
}

/// Installs the subscriber as the process-wide default
///
/// Fails if a global subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    build_subscriber(config)
        .try_init()
        .map_err(|e| InfrastructureError::Logging(e.to_string()))
}
