//! Path utilities for vkm.
//!
//! All local state lives under `~/.vkm/`:
//! - `~/.vkm/config.toml` - main configuration

use std::path::PathBuf;

/// Returns the vkm home directory (`~/.vkm/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".vkm")
}

/// Returns the default config file path (`~/.vkm/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}
