//! Parsing and validation of `strata.toml` configuration files.
//!
//! This crate reads the host's configuration and produces a strongly-typed
//! [`StrataConfig`] holding the cache retention policy and the logging
//! settings, and installs the `tracing` subscriber those settings describe.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod logging;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use logging::init_logging;
pub use types::*;
