use reqwest::StatusCode;
use thiserror::Error;

/// Message surfaced for transport failures, where the service could not be reached.
pub const UNREACHABLE_MESSAGE: &str = "Network error or server unavailable";

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures raised by the remote catalog gateway.
///
/// Every variant is terminal for the fetch cycle that produced it; nothing in
/// the crate retries on its own.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The transport could not reach the service (DNS, refused, timed out).
    #[error("Network error or server unavailable")]
    NetworkFailure { detail: String },

    /// The service answered with a non-success status.
    #[error("API request failed: {}", status_text(.status))]
    ServiceFailure { status: u16, body: String },

    /// The requested resource no longer exists server-side.
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// The service answered with a body that could not be decoded.
    #[error("unexpected response from service: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Build a network failure from any displayable transport error.
    pub fn network(detail: impl std::fmt::Display) -> Self {
        Self::NetworkFailure {
            detail: detail.to_string(),
        }
    }

    /// Human-readable message for consumers of the read model.
    #[must_use]
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Status code of a service failure, if this is one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ServiceFailure { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn status_text(status: &u16) -> String {
    StatusCode::from_u16(*status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .map_or_else(|| status.to_string(), ToOwned::to_owned)
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        if let Some(status) = err.status() {
            return Self::ServiceFailure {
                status: status.as_u16(),
                body: String::new(),
            };
        }
        Self::network(err)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// A query settled on a failure message.
    #[error("{0}")]
    Query(String),

    #[error("{0}")]
    Input(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        // dialoguer::Error wraps an IO error
        Error::Io(std::io::Error::other(err.to_string()))
    }
}
