//! Tracing/logging bootstrap.

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::logging::LoggingConfig;

/// Initialize tracing from configuration.
///
/// `RUST_LOG` takes precedence over the configured level. Calling this
/// twice is an error in `tracing-subscriber`; embedders should call it
/// exactly once at startup (tests use [`try_init`] instead).
pub fn init(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Like [`init`] but does not panic if a subscriber is already installed.
pub fn try_init(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let _ = fmt().with_env_filter(filter).with_target(true).try_init();
}
