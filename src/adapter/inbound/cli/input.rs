//! Reading payload files and confirming destructive commands.

use std::io::IsTerminal;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Parse a JSON payload file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Ask before deleting `what`. `--yes` skips the prompt; without a terminal
/// the prompt cannot be answered, so `--yes` becomes mandatory.
pub fn confirm_delete(what: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(Error::Input(format!(
            "refusing to delete {what} without --yes on a non-interactive terminal"
        )));
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(format!("Delete {what}?"))
        .default(false)
        .interact()?;
    Ok(confirmed)
}

/// Run a blocking dialoguer prompt off the async workers.
pub async fn prompt<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> dialoguer::Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::Input(format!("prompt aborted: {e}")))?
        .map_err(Error::from)
}
