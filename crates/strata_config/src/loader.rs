//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::StrataConfig;
use std::path::Path;

/// Name of the configuration file looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "strata.toml";

/// Loads and validates `strata.toml` from a project directory.
///
/// A directory without the file yields the default configuration.
pub fn load_config(project_dir: &Path) -> Result<StrataConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(StrataConfig::default());
    }
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `strata.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<StrataConfig, ConfigError> {
    let config: StrataConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that configured values are usable.
fn validate_config(config: &StrataConfig) -> Result<(), ConfigError> {
    if config.logging.filter.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "logging.filter must not be empty".to_string(),
        ));
    }
    Ok(())
}
