//! Miette-based error diagnostics for CLI error presentation.
//!
//! Config failures are rendered with the offending file as source code and
//! a label on the broken spot when the parser reports one.

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::error::{ConfigError as ConfigFailure, Error};

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(vkm::config))]
pub struct ConfigError {
    /// Human-readable error message.
    pub message: String,

    /// Source content (the configuration file).
    #[source_code]
    pub src: NamedSource<String>,

    /// Byte offset and length of the problematic region.
    #[label("here")]
    pub span: Option<SourceSpan>,

    /// Optional help text with suggestions for fixing the error.
    #[help]
    pub help: Option<String>,
}

impl ConfigError {
    /// Create a new configuration error.
    #[must_use]
    pub fn new(message: impl Into<String>, name: &str, src: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            src: NamedSource::new(name, src.into()),
            span: None,
            help: None,
        }
    }

    /// Point the label at `offset..offset + len`.
    #[must_use]
    pub fn with_span(mut self, offset: usize, len: usize) -> Self {
        self.span = Some((offset, len).into());
        self
    }

    /// Add a help suggestion to the error.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Service request error.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(vkm::service))]
pub struct ServiceError {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

/// Turn a crate error into a rendered diagnostic.
///
/// `config_path` is re-read for parse errors so the report can show the
/// offending line.
#[must_use]
pub fn report(err: Error, config_path: Option<&Path>) -> miette::Report {
    match err {
        Error::Config(ConfigFailure::Parse(parse)) => {
            let Some(path) = config_path else {
                return miette::Report::msg(parse.to_string());
            };
            let src = std::fs::read_to_string(path).unwrap_or_default();
            let mut diag = ConfigError::new(
                parse.message().to_string(),
                &path.display().to_string(),
                src,
            )
            .with_help("check the TOML syntax near the marked location");
            if let Some(range) = parse.span() {
                diag = diag.with_span(range.start, range.end.saturating_sub(range.start));
            }
            miette::Report::new(diag)
        }
        Error::Config(other) => miette::Report::new(ServiceError {
            message: other.to_string(),
            help: Some("run `vkm config show` to inspect the effective settings".into()),
        }),
        Error::Gateway(gateway) => {
            let help = match gateway.status() {
                Some(401 | 403) => Some("set VKM_API_TOKEN to a valid bearer token".into()),
                None if matches!(gateway, crate::error::GatewayError::NetworkFailure { .. }) => {
                    Some("check api.base_url or VKM_API_URL".into())
                }
                _ => None,
            };
            miette::Report::new(ServiceError {
                message: gateway.to_string(),
                help,
            })
        }
        other => miette::Report::msg(other.to_string()),
    }
}
