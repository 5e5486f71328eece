//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for the session values (`VKM_API_TOKEN`, `VKM_SUBJECT`) and the service URL
//! (`VKM_API_URL`).
//!
//! # Example
//!
//! ```no_run
//! use vkm_catalog::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use super::api::ApiConfig;
use super::catalog::CatalogConfig;
use super::logging::LoggingConfig;
use crate::error::{ConfigError, Result};

/// Environment variable holding the bearer token.
pub const ENV_API_TOKEN: &str = "VKM_API_TOKEN";
/// Environment variable holding the logged-in subject id.
pub const ENV_SUBJECT: &str = "VKM_SUBJECT";
/// Environment variable overriding `api.base_url`.
pub const ENV_API_URL: &str = "VKM_API_URL";

/// Session values taken from the environment, never from the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Bearer token from `VKM_API_TOKEN`.
    pub token: Option<String>,
    /// Subject id from `VKM_SUBJECT`.
    pub subject: Option<String>,
}

/// Main application configuration.
///
/// Every section is optional in the file; missing sections take their
/// defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Catalog service connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// Query layer tuning.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Session loaded from the environment at runtime.
    #[serde(skip)]
    pub session: SessionConfig,
}

impl Config {
    /// Parse configuration from TOML content, applying environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with(content, |key| std::env::var(key).ok())
    }

    /// Like [`parse_toml`](Self::parse_toml) with an explicit environment lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml_with(content: &str, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env(env);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise start from defaults.
    ///
    /// Environment overrides and validation apply either way.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be parsed or validation
    /// fails.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            return Self::load(path);
        }
        Self::parse_toml("")
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        let non_blank = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = non_blank(ENV_API_URL) {
            self.api.base_url = url;
        }
        self.session = SessionConfig {
            token: non_blank(ENV_API_TOKEN),
            subject: non_blank(ENV_SUBJECT),
        };
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "api.base_url",
            }
            .into());
        }
        let url = Url::parse(&self.api.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "api.base_url",
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url",
                reason: format!("unsupported scheme \"{}\"", url.scheme()),
            }
            .into());
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: "must be \"pretty\" or \"json\"".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// True when a bearer token is available.
    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.session.token.is_some()
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
