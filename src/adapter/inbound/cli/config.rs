//! Handler for the `config` command group.

use std::path::Path;

use serde_json::json;

use super::output;
use crate::error::Result;
use crate::infrastructure::config::settings::{Config, ENV_API_TOKEN, ENV_SUBJECT};

/// Execute `config show`. The token itself is never printed.
pub fn execute_show(path: &Path, config: &Config) -> Result<()> {
    let limit = config
        .catalog
        .recommendation_cap()
        .map_or_else(|| "unlimited".to_string(), |n| n.to_string());

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": path.display().to_string(),
            "file_exists": path.exists(),
            "api": config.api,
            "catalog": config.catalog,
            "logging": config.logging,
            "session": {
                "token_loaded": config.has_credential(),
                "subject": config.session.subject,
            },
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Path", path.display());
    if !path.exists() {
        output::note("(file not found, using defaults)");
    }

    output::section("API");
    output::field("Base URL", &config.api.base_url);
    output::field("Timeout", format!("{}s", config.api.timeout_secs));

    output::section("Catalog");
    output::field("Recommended", limit);

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    output::section("Session");
    if config.has_credential() {
        output::success(&format!("Bearer token loaded from {ENV_API_TOKEN}"));
    } else {
        output::warning(&format!("{ENV_API_TOKEN} not set; requests are anonymous"));
    }
    match &config.session.subject {
        Some(subject) => output::field("Subject", output::highlight(subject)),
        None => output::note(&format!("{ENV_SUBJECT} not set; no recommendations")),
    }
    Ok(())
}
