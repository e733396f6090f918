//! Dependency installation in a freshly generated project.

use std::path::Path;

use crate::error::{Result, SweError};
use crate::shell::{run_checked, CommandOptions};

/// Installs a project's dependencies.
pub trait DependencyInstaller {
    /// Human-readable command, for progress messages.
    fn describe(&self) -> String;

    /// Install dependencies for the project rooted at `dir`.
    fn install(&self, dir: &Path) -> Result<()>;
}

/// Runs a configured external command, `go mod tidy` by default.
#[derive(Debug, Clone)]
pub struct CommandInstaller {
    command: Vec<String>,
    show_output: bool,
}

impl CommandInstaller {
    /// Create an installer for `command` (program followed by its arguments).
    pub fn new(command: Vec<String>) -> Self {
        Self {
            command,
            show_output: false,
        }
    }

    /// Pass the command's output through to the terminal.
    pub fn show_output(mut self, show: bool) -> Self {
        self.show_output = show;
        self
    }
}

impl DependencyInstaller for CommandInstaller {
    fn describe(&self) -> String {
        self.command.join(" ")
    }

    fn install(&self, dir: &Path) -> Result<()> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| SweError::ConfigValidationError {
                message: "install_command must not be empty".to_string(),
            })?;

        let options = CommandOptions {
            cwd: Some(dir.to_path_buf()),
            capture: !self.show_output,
        };

        let result = run_checked(program, args, &options)?;
        tracing::debug!(
            "`{}` finished in {:?}",
            self.describe(),
            result.duration
        );
        Ok(())
    }
}
