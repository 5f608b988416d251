//! Service Settings
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `config/weather.{toml,yaml,json}` file, then `WEATHER__*` environment
//! variables (e.g. `WEATHER__SERVER__PORT=9000`,
//! `WEATHER__PROVIDER__API_KEY=...`).

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use weather_provider::{ProviderConfig, DEFAULT_BASE_URL};

/// Default settings file, looked up relative to the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "config/weather";
const ENV_PREFIX: &str = "WEATHER";
const ENV_SEPARATOR: &str = "__";

/// Top-level service settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub provider: ProviderSettings,
    pub batch: BatchSettings,
    pub log: LogSettings,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Weather provider settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    /// Request timeout (milliseconds)
    pub timeout_ms: u64,
    /// Serve live requests from the built-in mock source
    pub mock: bool,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout_ms: 5000,
            mock: false,
        }
    }
}

impl ProviderSettings {
    pub fn client_config(&self) -> ProviderConfig {
        ProviderConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            timeout_ms: self.timeout_ms,
        }
    }
}

/// Batch endpoint limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Largest accepted batch
    pub max_items: usize,
    /// Batches at least this large are normalized on the rayon pool
    pub parallel_threshold: usize,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            max_items: 1000,
            parallel_threshold: 256,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Settings {
    /// Load settings from the default file (if present) and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_SETTINGS_FILE)
    }

    /// Load settings from `path` (extension optional, file optional) and the
    /// environment
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
