//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::ScaffoldConfig;
use crate::error::{Result, SweError};

/// Directory under the user's home holding swe-cli state.
pub const APP_DIR_NAME: &str = ".swe-cli";

/// Root of swe-cli's per-user state: `~/.swe-cli`.
pub fn app_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DIR_NAME))
}

/// Find the user's config at `~/.swe-cli/config.yml`.
pub fn find_user_config() -> Option<PathBuf> {
    let path = app_dir()?.join("config.yml");
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `Io` if the file can't be read and `ConfigParseError` if the
/// YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ScaffoldConfig> {
    let content = fs::read_to_string(path)?;
    parse_config(&content, path)
}

/// Parse YAML content into a [`ScaffoldConfig`].
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ScaffoldConfig> {
    if content.trim().is_empty() {
        return Ok(ScaffoldConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| SweError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// An explicit override must exist. Without one, the user config is used if
/// present, otherwise the defaults.
pub fn load_config(config_override: Option<&Path>) -> Result<ScaffoldConfig> {
    let config = match config_override {
        Some(path) => load_config_file(path)?,
        None => match find_user_config() {
            Some(path) => {
                tracing::debug!("Loading user config from {}", path.display());
                load_config_file(&path)?
            }
            None => ScaffoldConfig::default(),
        },
    };

    config.validate()?;
    Ok(config)
}
