//! Configuration types deserialized from `strata.toml`.

use serde::Deserialize;

/// Filter used when neither the configuration nor `RUST_LOG` names one.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// The top-level configuration parsed from `strata.toml`.
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Default, Deserialize)]
pub struct StrataConfig {
    /// Settings shared by every generation-gated cache.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the generation-gated caches.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheConfig {
    /// How strongly cache entries are held between lookups.
    #[serde(default)]
    pub retention: Retention,
    /// Number of entries each fresh generation map is sized for.
    #[serde(default)]
    pub initial_capacity: usize,
}

/// How a cache holds on to the values it stores.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Retention {
    /// Values live until the generation changes or memory is reclaimed.
    #[default]
    Strong,
    /// Only weak holders are stored; a value survives only while some
    /// caller still holds it, and a reclaimed value is rebuilt on demand.
    Soft,
}

/// Settings for the `tracing` subscriber.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, e.g. `"strata_cache=debug,info"`.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Whether to emit ANSI colour codes.
    #[serde(default)]
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            ansi: false,
        }
    }
}

fn default_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}
