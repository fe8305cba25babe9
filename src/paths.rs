//! Centralized path definitions for codigo
//!
//! ## Storage Layout
//!
//! ```text
//! ~/.codigo/
//! └── config.toml               # Patterns, matcher and session settings
//! ```
//!
//! `$CODIGO_CONFIG` points at a different config file.

use std::path::PathBuf;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "CODIGO_CONFIG";

/// Global config directory name
const GLOBAL_DIR: &str = ".codigo";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Get the global codigo directory.
///
/// Returns `~/.codigo/`.
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")).join(GLOBAL_DIR)
}

/// Get the global config file path.
///
/// Returns `~/.codigo/config.toml`.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}

/// Resolve the config file to read.
///
/// An explicit path wins, then `$CODIGO_CONFIG`, then the global file.
#[must_use]
pub fn config_file(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(global_config)
}
