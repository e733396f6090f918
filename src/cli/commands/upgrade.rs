//! Upgrade command implementation.
//!
//! `swe-cli upgrade` compares the running version with the published one and
//! reinstalls through the detected install method when a newer one exists.

use std::cmp::Ordering;

use crate::cli::args::UpgradeArgs;
use crate::config::ScaffoldConfig;
use crate::error::Result;
use crate::ui::UserInterface;
use crate::updates::{
    check_for_updates, detect_install_method, execute_update, prompt_for_update, InstallMethod,
    UpdateInfo,
};

use super::dispatcher::{Command, CommandResult};

/// The upgrade command implementation.
pub struct UpgradeCommand {
    config: ScaffoldConfig,
    args: UpgradeArgs,
    method: Option<InstallMethod>,
}

impl UpgradeCommand {
    /// Create a new upgrade command.
    pub fn new(config: ScaffoldConfig, args: UpgradeArgs) -> Self {
        Self {
            config,
            args,
            method: None,
        }
    }

    /// Use `method` instead of detecting it (for testing).
    pub fn with_install_method(mut self, method: InstallMethod) -> Self {
        self.method = Some(method);
        self
    }

    fn apply(&self, info: &UpdateInfo, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match info.status() {
            Ordering::Equal => {
                ui.success(&format!("You are on the latest version ({})", info.current));
                return Ok(CommandResult::success());
            }
            Ordering::Less => {
                ui.message(&format!(
                    "Your version ({}) is newer than the latest release ({})",
                    info.current, info.latest
                ));
                return Ok(CommandResult::success());
            }
            Ordering::Greater => {}
        }

        if self.args.check {
            ui.message(&format!(
                "A new version is available: {} -> {}",
                info.current, info.latest
            ));
            ui.show_hint("Run `swe-cli upgrade` to install it");
            return Ok(CommandResult::success());
        }

        let method = self.method.clone().unwrap_or_else(detect_install_method);
        tracing::debug!("Install method: {}", method.name());

        if !prompt_for_update(ui, info, &method, self.args.yes)? {
            return Ok(CommandResult::success());
        }

        let mut spinner = ui.start_spinner(&format!("Upgrading to {}...", info.latest));
        match execute_update(&method, &info.latest) {
            Ok(()) => {
                spinner.finish_success(&format!("Upgraded to {}", info.latest));
                Ok(CommandResult::success())
            }
            Err(e) => {
                spinner.finish_error("Upgrade failed");
                Err(e)
            }
        }
    }
}

impl Command for UpgradeCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut spinner = ui.start_spinner("Checking for updates...");
        let info = match check_for_updates(&self.config) {
            Ok(info) => {
                spinner.finish_success(&format!("Latest version: {}", info.latest));
                info
            }
            Err(e) => {
                spinner.finish_error("Update check failed");
                return Err(e);
            }
        };

        self.apply(&info, ui)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SweError;
    use crate::ui::MockUI;
    use crate::updates::VERSION;
    use httpmock::prelude::*;
    use std::path::PathBuf;

    fn info(current: &str, latest: &str) -> UpdateInfo {
        UpdateInfo {
            current: current.to_string(),
            latest: latest.to_string(),
        }
    }

    fn manual() -> InstallMethod {
        InstallMethod::Manual {
            path: PathBuf::from("/srv/swe-cli"),
        }
    }

    fn command(args: UpgradeArgs) -> UpgradeCommand {
        UpgradeCommand::new(ScaffoldConfig::default(), args).with_install_method(manual())
    }

    #[test]
    fn same_version_is_latest() {
        let mut ui = MockUI::new();
        let result = command(UpgradeArgs::default())
            .apply(&info("1.0.0", "1.0.0"), &mut ui)
            .unwrap();
        assert!(result.success);
        assert!(ui.has_success("latest version"));
    }

    #[test]
    fn local_newer_than_release() {
        let mut ui = MockUI::new();
        command(UpgradeArgs::default())
            .apply(&info("1.1.0", "1.0.0"), &mut ui)
            .unwrap();
        assert!(ui.has_message("newer than the latest release"));
    }

    #[test]
    fn check_only_reports() {
        let mut ui = MockUI::new();
        let args = UpgradeArgs {
            check: true,
            yes: false,
        };
        command(args).apply(&info("1.0.0", "1.1.0"), &mut ui).unwrap();
        assert!(ui.has_message("1.0.0 -> 1.1.0"));
        assert!(ui.prompts_shown().is_empty());
        assert!(ui.spinners().is_empty());
    }

    #[test]
    fn manual_install_gets_guidance_without_upgrading() {
        let mut ui = MockUI::new();
        let result = command(UpgradeArgs::default())
            .apply(&info("1.0.0", "1.1.0"), &mut ui)
            .unwrap();
        assert!(result.success);
        assert!(ui.has_message("Download 1.1.0"));
        assert!(ui.spinners().is_empty());
    }

    #[test]
    fn missing_version_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/Cargo.toml");
            then.status(200).body("[package]\nname = \"swe-cli\"\n");
        });
        let config = ScaffoldConfig {
            version_url: server.url("/Cargo.toml"),
            ..Default::default()
        };
        let mut ui = MockUI::new();

        let err = UpgradeCommand::new(config, UpgradeArgs::default())
            .execute(&mut ui)
            .unwrap_err();

        assert!(matches!(err, SweError::VersionNotFound { .. }));
    }

    #[test]
    fn execute_reports_up_to_date() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/Cargo.toml");
            then.status(200).body(format!("version = \"{}\"\n", VERSION));
        });
        let config = ScaffoldConfig {
            version_url: server.url("/Cargo.toml"),
            ..Default::default()
        };
        let mut ui = MockUI::new();

        let result = UpgradeCommand::new(config, UpgradeArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.has_success("latest version"));
    }
}
