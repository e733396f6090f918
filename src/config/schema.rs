//! Configuration schema definitions for swe-cli.
//!
//! Every field has a default, so an empty or missing config file yields the
//! stock `sweets-layout` behavior.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SweError};

/// Module path the stock template declares in its manifest.
pub const DEFAULT_TEMPLATE_MODULE: &str = "github.com/go-sweets/sweets-layout";

/// Directory name of the stock template.
pub const DEFAULT_TEMPLATE_NAME: &str = "sweets-layout";

/// Upper bound for `cache_max_age_hours` (ten years).
pub const MAX_CACHE_AGE_HOURS: u64 = 24 * 365 * 10;

/// Root configuration structure for `~/.swe-cli/config.yml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Directory name of the template to materialize.
    pub template_name: String,

    /// Module path used inside the template, replaced by the new module name.
    pub template_module: String,

    /// Base name of the directory the CLI is installed into next to the template.
    pub install_dir_name: String,

    /// Manifest file, relative to the project root.
    pub manifest_file: String,

    /// How long a cached template location stays valid.
    pub cache_max_age_hours: u64,

    /// Build artifacts removed from a freshly generated project.
    pub cleanup_paths: Vec<String>,

    /// Dependency installation command, run in the new project.
    pub install_command: Vec<String>,

    /// Where the latest published version is read from.
    pub version_url: String,

    /// Pattern whose first capture group is the published version.
    pub version_pattern: String,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            template_name: DEFAULT_TEMPLATE_NAME.to_string(),
            template_module: DEFAULT_TEMPLATE_MODULE.to_string(),
            install_dir_name: "cli".to_string(),
            manifest_file: "go.mod".to_string(),
            cache_max_age_hours: 24,
            cleanup_paths: default_cleanup_paths(),
            install_command: vec!["go".to_string(), "mod".to_string(), "tidy".to_string()],
            version_url: "https://raw.githubusercontent.com/go-sweets/cli/master/Cargo.toml"
                .to_string(),
            version_pattern: r#"(?m)^version\s*=\s*"(\d+\.\d+\.\d+)""#.to_string(),
        }
    }
}

fn default_cleanup_paths() -> Vec<String> {
    ["sweets-app", "test-build", "http", "rpc", "bin/", ".git/"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl ScaffoldConfig {
    /// Validity window for the template cache record.
    ///
    /// Values past [`MAX_CACHE_AGE_HOURS`] are clamped to it.
    pub fn cache_max_age(&self) -> chrono::Duration {
        let hours = self.cache_max_age_hours.min(MAX_CACHE_AGE_HOURS);
        i64::try_from(hours)
            .ok()
            .and_then(chrono::Duration::try_hours)
            .unwrap_or(chrono::Duration::MAX)
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.template_name.trim().is_empty() {
            return Err(SweError::ConfigValidationError {
                message: "template_name must not be empty".to_string(),
            });
        }
        if self.template_module.is_empty() {
            return Err(SweError::ConfigValidationError {
                message: "template_module must not be empty".to_string(),
            });
        }
        if self.cache_max_age_hours > MAX_CACHE_AGE_HOURS {
            return Err(SweError::ConfigValidationError {
                message: format!(
                    "cache_max_age_hours must be at most {}, got {}",
                    MAX_CACHE_AGE_HOURS, self.cache_max_age_hours
                ),
            });
        }
        if self.install_command.is_empty() {
            return Err(SweError::ConfigValidationError {
                message: "install_command must name a program".to_string(),
            });
        }
        if let Err(e) = regex::Regex::new(&self.version_pattern) {
            return Err(SweError::ConfigValidationError {
                message: format!("version_pattern is not a valid regex: {}", e),
            });
        }
        Ok(())
    }
}
