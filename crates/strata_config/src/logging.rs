//! Installation of the global `tracing` subscriber.

use tracing_subscriber::EnvFilter;

use crate::error::ConfigError;
use crate::types::LoggingConfig;

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, or by the configured
/// filter when `RUST_LOG` is unset.
///
/// Fails with [`ConfigError::LoggingInit`] if a global subscriber is already
/// installed; callers that may initialise twice (tests) can ignore that.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ConfigError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .map_err(|e| ConfigError::ValidationError(format!("logging.filter: {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.ansi)
        .try_init()
        .map_err(|e| ConfigError::LoggingInit(e.to_string()))?;

    tracing::debug!(filter = %config.filter, "logging initialised");
    Ok(())
}
