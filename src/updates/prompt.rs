//! Upgrade prompting and execution.

use super::install::{InstallMethod, RELEASES_URL};
use super::version::UpdateInfo;
use crate::error::{Result, SweError};
use crate::shell::{run_checked, CommandOptions};
use crate::ui::{Prompt, UserInterface};

/// Ask whether to upgrade now.
///
/// Returns false without prompting when `method` can't upgrade itself; the
/// user is told where to download the release instead. `assume_yes` skips
/// the question.
pub fn prompt_for_update(
    ui: &mut dyn UserInterface,
    info: &UpdateInfo,
    method: &InstallMethod,
    assume_yes: bool,
) -> Result<bool> {
    ui.message(&format!(
        "A new version of swe-cli is available: {} -> {}",
        info.current, info.latest
    ));

    if !method.supports_auto_update() {
        ui.message(&format!(
            "This copy was installed manually ({} install). Download {} from: {}",
            method.name(),
            info.latest,
            RELEASES_URL
        ));
        return Ok(false);
    }

    if assume_yes {
        return Ok(true);
    }

    let prompt = Prompt::confirm("upgrade", "Would you like to upgrade now?", true);
    ui.prompt(&prompt)
}

/// Run the upgrade command for `method`, targeting `version`.
///
/// The command's output goes straight to the terminal.
pub fn execute_update(method: &InstallMethod, version: &str) -> Result<()> {
    let command = method
        .upgrade_command(version)
        .ok_or_else(|| SweError::UpdateCheckFailed {
            message: format!("no upgrade command for {} installs", method.name()),
        })?;

    let (program, args) = command
        .split_first()
        .ok_or_else(|| SweError::UpdateCheckFailed {
            message: "empty upgrade command".to_string(),
        })?;

    run_checked(program, args, &CommandOptions::default())?;
    Ok(())
}
