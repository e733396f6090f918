//! Install method detection.
//!
//! Detects how swe-cli was installed to pick the upgrade mechanism.

use std::env;
use std::path::{Path, PathBuf};

/// Where manually installed binaries are published.
pub const RELEASES_URL: &str = "https://github.com/go-sweets/cli/releases";

/// How swe-cli was installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallMethod {
    /// Installed via cargo install
    Cargo,
    /// Installed via Homebrew
    Homebrew,
    /// Downloaded binary or built from source
    Manual { path: PathBuf },
    /// Could not determine install method
    Unknown,
}

impl InstallMethod {
    /// The command that upgrades this installation to `version`.
    pub fn upgrade_command(&self, version: &str) -> Option<Vec<String>> {
        let parts = match self {
            InstallMethod::Cargo => {
                vec!["cargo", "install", "swe-cli", "--version", version, "--force"]
            }
            InstallMethod::Homebrew => vec!["brew", "upgrade", "swe-cli"],
            InstallMethod::Manual { .. } | InstallMethod::Unknown => return None,
        };
        Some(parts.into_iter().map(String::from).collect())
    }

    /// Check if this method supports automatic upgrades.
    pub fn supports_auto_update(&self) -> bool {
        matches!(self, InstallMethod::Cargo | InstallMethod::Homebrew)
    }

    /// Get a human-readable name for this install method.
    pub fn name(&self) -> &str {
        match self {
            InstallMethod::Cargo => "cargo",
            InstallMethod::Homebrew => "homebrew",
            InstallMethod::Manual { .. } => "manual",
            InstallMethod::Unknown => "unknown",
        }
    }
}

/// Detect how the running binary was installed.
pub fn detect_install_method() -> InstallMethod {
    match env::current_exe() {
        Ok(path) => install_method_for(&path),
        Err(_) => InstallMethod::Unknown,
    }
}

/// Classify an executable path.
pub fn install_method_for(exe_path: &Path) -> InstallMethod {
    if is_cargo_install(exe_path) {
        return InstallMethod::Cargo;
    }

    if is_homebrew_install(exe_path) {
        return InstallMethod::Homebrew;
    }

    InstallMethod::Manual {
        path: exe_path.to_path_buf(),
    }
}

fn is_cargo_install(exe_path: &Path) -> bool {
    if let Some(home) = dirs::home_dir() {
        if exe_path.starts_with(home.join(".cargo").join("bin")) {
            return true;
        }
    }

    if let Ok(cargo_home) = env::var("CARGO_HOME") {
        if exe_path.starts_with(PathBuf::from(cargo_home).join("bin")) {
            return true;
        }
    }

    false
}

fn is_homebrew_install(exe_path: &Path) -> bool {
    let homebrew_prefixes = [
        "/usr/local/Cellar/",          // Intel macOS
        "/opt/homebrew/Cellar/",       // ARM macOS
        "/home/linuxbrew/.linuxbrew/", // Linux
    ];

    let exe_str = exe_path.to_string_lossy();
    homebrew_prefixes
        .iter()
        .any(|prefix| exe_str.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_method_name() {
        assert_eq!(InstallMethod::Cargo.name(), "cargo");
        assert_eq!(InstallMethod::Homebrew.name(), "homebrew");
        assert_eq!(
            InstallMethod::Manual {
                path: PathBuf::from("/usr/bin/swe-cli")
            }
            .name(),
            "manual"
        );
        assert_eq!(InstallMethod::Unknown.name(), "unknown");
    }

    #[test]
    fn cargo_upgrade_pins_version() {
        assert_eq!(
            InstallMethod::Cargo.upgrade_command("1.2.3"),
            Some(
                ["cargo", "install", "swe-cli", "--version", "1.2.3", "--force"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            )
        );
    }

    #[test]
    fn homebrew_upgrade_command() {
        assert_eq!(
            InstallMethod::Homebrew.upgrade_command("1.2.3"),
            Some(vec![
                "brew".to_string(),
                "upgrade".to_string(),
                "swe-cli".to_string()
            ])
        );
    }

    #[test]
    fn manual_and_unknown_have_no_command() {
        let manual = InstallMethod::Manual {
            path: PathBuf::from("/tmp/swe-cli"),
        };
        assert!(manual.upgrade_command("1.0.0").is_none());
        assert!(!manual.supports_auto_update());
        assert!(InstallMethod::Unknown.upgrade_command("1.0.0").is_none());
        assert!(!InstallMethod::Unknown.supports_auto_update());
    }

    #[test]
    fn detect_install_method_returns_something() {
        let _ = detect_install_method().name();
    }

    #[test]
    fn cargo_bin_path_is_cargo() {
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".cargo").join("bin").join("swe-cli");
            assert_eq!(install_method_for(&path), InstallMethod::Cargo);
        }
    }

    #[test]
    fn cellar_paths_are_homebrew() {
        for path in [
            "/usr/local/Cellar/swe-cli/0.3.0/bin/swe-cli",
            "/opt/homebrew/Cellar/swe-cli/0.3.0/bin/swe-cli",
            "/home/linuxbrew/.linuxbrew/bin/swe-cli",
        ] {
            assert_eq!(install_method_for(Path::new(path)), InstallMethod::Homebrew);
        }
    }

    #[test]
    fn other_paths_are_manual() {
        let path = PathBuf::from("/srv/tools/cli/swe-cli");
        assert_eq!(
            install_method_for(&path),
            InstallMethod::Manual { path: path.clone() }
        );
    }
}
