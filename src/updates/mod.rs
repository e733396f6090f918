//! Self-upgrade support.
//!
//! This module provides:
//! - Version checking against the published release
//! - Install method detection (cargo, homebrew, manual)
//! - Upgrade prompting and execution

pub mod install;
pub mod prompt;
pub mod version;

pub use install::{detect_install_method, install_method_for, InstallMethod, RELEASES_URL};
pub use prompt::{execute_update, prompt_for_update};
pub use version::{check_for_updates, compare_versions, fetch_latest_version, UpdateInfo, VERSION};
