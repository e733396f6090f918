//! Version checking against the published release.

use anyhow::Context;
use regex::Regex;
use std::cmp::Ordering;
use std::time::Duration;

use crate::config::ScaffoldConfig;
use crate::error::{Result, SweError};

/// Current version of swe-cli.
pub const VERSION: &str = crate::CLI_VERSION;

/// Request timeout for the version check.
const TIMEOUT: Duration = Duration::from_secs(10);

/// Result of comparing the running version with the published one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateInfo {
    /// Running version.
    pub current: String,
    /// Latest published version.
    pub latest: String,
}

impl UpdateInfo {
    /// How the published version relates to the running one.
    pub fn status(&self) -> Ordering {
        compare_versions(&self.latest, &self.current)
    }

    /// Whether a newer version is published.
    pub fn update_available(&self) -> bool {
        self.status() == Ordering::Greater
    }
}

/// Fetch the published version and compare it with the running one.
pub fn check_for_updates(config: &ScaffoldConfig) -> Result<UpdateInfo> {
    let latest = fetch_latest_version(&config.version_url, &config.version_pattern)?;
    Ok(UpdateInfo {
        current: VERSION.to_string(),
        latest,
    })
}

/// Download `url` and extract the first capture group of `pattern`.
///
/// # Errors
///
/// - `UpdateCheckFailed` on network errors and non-success statuses
/// - `VersionNotFound` when the body doesn't match `pattern`
pub fn fetch_latest_version(url: &str, pattern: &str) -> Result<String> {
    let pattern = Regex::new(pattern).map_err(|e| SweError::ConfigValidationError {
        message: format!("invalid version_pattern: {}", e),
    })?;

    let body = fetch_body(url).map_err(|e| SweError::UpdateCheckFailed {
        message: format!("{:#}", e),
    })?;

    let version = extract_version(&body, &pattern).ok_or_else(|| SweError::VersionNotFound {
        url: url.to_string(),
    })?;

    tracing::debug!("Latest published version: {}", version);
    Ok(version)
}

fn fetch_body(url: &str) -> anyhow::Result<String> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("swe-cli/", env!("CARGO_PKG_VERSION")))
        .timeout(TIMEOUT)
        .build()?;

    let response = client
        .get(url)
        .send()
        .with_context(|| format!("Failed to reach {}", url))?
        .error_for_status()
        .with_context(|| format!("Unexpected response from {}", url))?;

    response.text().context("Failed to read response body")
}

fn extract_version(body: &str, pattern: &Regex) -> Option<String> {
    pattern
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Compare two `X.Y.Z` versions numerically.
///
/// Missing or non-numeric components count as zero, so `1.2` equals `1.2.0`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse = |v: &str| -> [u64; 3] {
        let mut parts = [0; 3];
        for (slot, part) in parts.iter_mut().zip(v.trim().trim_start_matches('v').split('.')) {
            *slot = part.parse().unwrap_or(0);
        }
        parts
    };

    parse(a).cmp(&parse(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const PATTERN: &str = r#"(?m)^version\s*=\s*"(\d+\.\d+\.\d+)""#;

    #[test]
    fn version_constant_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn compare_versions_orders_numerically() {
        assert_eq!(compare_versions("0.2.0", "0.1.0"), Ordering::Greater);
        assert_eq!(compare_versions("1.0.0", "0.9.9"), Ordering::Greater);
        assert_eq!(compare_versions("0.10.0", "0.9.0"), Ordering::Greater);
        assert_eq!(compare_versions("1.2.3", "1.2.3"), Ordering::Equal);
        assert_eq!(compare_versions("1.0.4", "1.0.5"), Ordering::Less);
    }

    #[test]
    fn compare_versions_pads_missing_components() {
        assert_eq!(compare_versions("1.2", "1.2.0"), Ordering::Equal);
        assert_eq!(compare_versions("v1.2.1", "1.2.0"), Ordering::Greater);
        assert_eq!(compare_versions("abc", "0.0.0"), Ordering::Equal);
    }

    #[test]
    fn update_info_status() {
        let info = UpdateInfo {
            current: "0.3.0".into(),
            latest: "0.4.0".into(),
        };
        assert!(info.update_available());

        let info = UpdateInfo {
            current: "0.4.0".into(),
            latest: "0.3.0".into(),
        };
        assert_eq!(info.status(), Ordering::Less);
        assert!(!info.update_available());
    }

    #[test]
    fn extract_version_takes_first_capture() {
        let re = Regex::new(PATTERN).unwrap();
        let body = "[package]\nname = \"swe-cli\"\nversion = \"1.4.2\"\n\n[dependencies]\nversion = \"9.9.9\"\n";
        assert_eq!(extract_version(body, &re).as_deref(), Some("1.4.2"));
        assert_eq!(extract_version("name = \"x\"", &re), None);
    }

    #[test]
    fn fetch_latest_version_parses_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/Cargo.toml");
            then.status(200)
                .body("[package]\nname = \"swe-cli\"\nversion = \"0.9.1\"\n");
        });

        let version = fetch_latest_version(&server.url("/Cargo.toml"), PATTERN).unwrap();

        mock.assert();
        assert_eq!(version, "0.9.1");
    }

    #[test]
    fn fetch_latest_version_without_match_is_version_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/Cargo.toml");
            then.status(200).body("nothing here");
        });

        let url = server.url("/Cargo.toml");
        let err = fetch_latest_version(&url, PATTERN).unwrap_err();

        match err {
            SweError::VersionNotFound { url: reported } => assert_eq!(reported, url),
            other => panic!("expected VersionNotFound, got {:?}", other),
        }
    }

    #[test]
    fn fetch_latest_version_http_error_is_update_check_failed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/Cargo.toml");
            then.status(404);
        });

        let err = fetch_latest_version(&server.url("/Cargo.toml"), PATTERN).unwrap_err();
        assert!(matches!(err, SweError::UpdateCheckFailed { .. }));
    }

    #[test]
    fn invalid_pattern_is_rejected_before_fetching() {
        let err = fetch_latest_version("http://127.0.0.1:1/none", "(").unwrap_err();
        assert!(matches!(err, SweError::ConfigValidationError { .. }));
    }

    #[test]
    fn check_for_updates_uses_config() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/version");
            then.status(200).body("version = \"999.0.0\"\n");
        });
        let config = ScaffoldConfig {
            version_url: server.url("/version"),
            ..Default::default()
        };

        let info = check_for_updates(&config).unwrap();

        assert_eq!(info.latest, "999.0.0");
        assert_eq!(info.current, VERSION);
        assert!(info.update_available());
    }
}
