//! Logging configuration and initialization.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. "warn" or "vkm_catalog=debug".
    #[serde(default = "default_level")]
    pub level: String,
    /// "pretty" or "json".
    #[serde(default = "default_format")]
    pub format: String,
}

impl LoggingConfig {
    /// Copy of this config with `level` replaced.
    #[must_use]
    pub fn with_level(&self, level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..self.clone()
        }
    }

    /// Install the global tracing subscriber. `RUST_LOG` wins over `level`.
    ///
    /// Logs go to stderr so stdout stays clean for command output. Calling
    /// this twice keeps the first subscriber.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        let installed = match self.format.as_str() {
            "json" => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            _ => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
        };
        if installed.is_err() {
            tracing::debug!("tracing subscriber already installed");
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

fn default_level() -> String {
    "warn".into()
}

fn default_format() -> String {
    "pretty".into()
}
