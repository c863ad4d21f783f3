//! Tracing subscriber setup for hosts embedding the shelf.
//!
//! `RUST_LOG` takes precedence; otherwise the filter is `info`, or `debug`
//! when requested.

use crate::logging::error::LoggingError;
use tracing_subscriber::EnvFilter;

pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum LoggingError {
        #[error("Failed to install tracing subscriber: {0}")]
        Install(String),
    }
}

#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Debug level by default, with event targets shown.
    pub debug: bool,
}

impl TracingConfig {
    fn default_directive(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

/// Installs a compact fmt subscriber as the global default.
///
/// Fails if a global subscriber is already set.
pub fn init_tracing(config: &TracingConfig) -> Result<(), LoggingError> {
    tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_target(config.debug)
        .compact()
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}
