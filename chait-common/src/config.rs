//! Configuration loading and store endpoint resolution
//!
//! Store settings follow a fixed priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`CHAIT_*`, then the provider's `SUPABASE_*`)
//! 3. TOML config file
//!
//! There is no compiled default for the store: a run without a store URL
//! is a configuration error.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const STORE_URL_ENV: &str = "CHAIT_STORE_URL";
pub const STORE_KEY_ENV: &str = "CHAIT_STORE_KEY";
pub const PROVIDER_URL_ENV: &str = "SUPABASE_URL";
pub const PROVIDER_KEY_ENV: &str = "SUPABASE_KEY";

/// `[store]` table of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreSection {
    pub url: Option<String>,
    pub key: Option<String>,
}

/// `[retry]` table of the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
        }
    }
}

/// `[logging]` table of the config file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Contents of `config.toml`; every table is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub store: StoreSection,
    pub retry: RetryConfig,
    pub logging: LoggingConfig,
}

impl TomlConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config file: {}", e)))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }
}

/// Where normalized records are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Local SQLite database, `sqlite:` URL
    Sqlite { url: String },
    /// PostgREST-compatible HTTP endpoint with an access key
    Rest { url: String, key: String },
}

/// Resolved store endpoint and credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub url: String,
    pub key: Option<String>,
}

impl StoreConfig {
    /// Select the backend from the URL scheme
    pub fn backend(&self) -> Result<StoreBackend> {
        let url = self.url.trim();
        if url.starts_with("sqlite:") {
            return Ok(StoreBackend::Sqlite {
                url: url.to_string(),
            });
        }

        if url.starts_with("http://") || url.starts_with("https://") {
            let key = self
                .key
                .clone()
                .filter(|k| !k.is_empty())
                .ok_or_else(|| {
                    Error::Config(format!(
                        "Missing store access key ({} or {})",
                        STORE_KEY_ENV, PROVIDER_KEY_ENV
                    ))
                })?;
            return Ok(StoreBackend::Rest {
                url: url.trim_end_matches('/').to_string(),
                key,
            });
        }

        Err(Error::Config(format!(
            "Unsupported store URL '{}': expected sqlite:, http:// or https://",
            url
        )))
    }
}

/// Resolves configuration from CLI overrides, environment and config file
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    cli_url: Option<String>,
    cli_key: Option<String>,
    config_file: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cli_store(mut self, url: Option<String>, key: Option<String>) -> Self {
        self.cli_url = url;
        self.cli_key = key;
        self
    }

    /// Use an explicit config file instead of the platform default
    pub fn with_config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_file = path;
        self
    }

    /// Load the config file
    ///
    /// An explicitly named file must exist and parse. The platform default
    /// file is optional; when missing, defaults are used.
    pub fn load_toml(&self) -> Result<TomlConfig> {
        if let Some(path) = &self.config_file {
            return TomlConfig::load(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "Loading config file");
                TomlConfig::load(&path)
            }
            _ => Ok(TomlConfig::default()),
        }
    }

    /// Resolve the store endpoint following the priority order
    pub fn resolve_store(&self, toml: &TomlConfig) -> Result<StoreConfig> {
        let url = non_empty(self.cli_url.clone())
            .or_else(|| env_value(STORE_URL_ENV))
            .or_else(|| env_value(PROVIDER_URL_ENV))
            .or_else(|| non_empty(toml.store.url.clone()))
            .ok_or_else(|| {
                Error::Config(format!(
                    "Missing store URL: pass --store-url or set {} / {}",
                    STORE_URL_ENV, PROVIDER_URL_ENV
                ))
            })?;

        let key = non_empty(self.cli_key.clone())
            .or_else(|| env_value(STORE_KEY_ENV))
            .or_else(|| env_value(PROVIDER_KEY_ENV))
            .or_else(|| non_empty(toml.store.key.clone()));

        Ok(StoreConfig { url, key })
    }
}

/// Platform config file location (`<config dir>/chait/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("chait").join("config.toml"))
}

fn env_value(name: &str) -> Option<String> {
    non_empty(std::env::var(name).ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
