//! Catalog service connection settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Where the catalog service lives and how long to wait for it.
///
/// The bearer token is never read from the file; see
/// [`SessionConfig`](super::settings::SessionConfig).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint is resolved against.
    ///
    /// Defaults to "http://localhost:3000". Overridden by `VKM_API_URL`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds. Defaults to 10.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".into()
}

const fn default_timeout_secs() -> u64 {
    10
}
