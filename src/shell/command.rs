//! External command execution.

use crate::error::{Result, SweError};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Capture stdout and stderr (if false, inherits from parent).
    pub capture: bool,
}

impl CommandOptions {
    /// Capture output and run in `cwd`.
    pub fn captured_in(cwd: &Path) -> Self {
        Self {
            cwd: Some(cwd.to_path_buf()),
            capture: true,
        }
    }
}

/// Render a program and its arguments as one display string.
pub fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run `program` with `args`, without a shell.
///
/// Blocks until the process exits; there is no timeout.
///
/// # Errors
///
/// Returns `CommandFailed` with no exit code if the program can't be started.
/// A non-zero exit is reported through [`CommandResult::success`].
pub fn run(program: &str, args: &[String], options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();
    let command_line = display_command(program, args);
    tracing::debug!("Running `{}`", command_line);

    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    if options.capture {
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    }

    let output = cmd.output().map_err(|e| {
        tracing::debug!("Failed to start `{}`: {}", command_line, e);
        SweError::CommandFailed {
            command: command_line.clone(),
            code: None,
        }
    })?;

    Ok(CommandResult {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        duration: start.elapsed(),
        success: output.status.success(),
    })
}

/// Run a command and turn a non-zero exit into `CommandFailed`.
pub fn run_checked(program: &str, args: &[String], options: &CommandOptions) -> Result<CommandResult> {
    let result = run(program, args, options)?;

    if !result.success {
        return Err(SweError::CommandFailed {
            command: display_command(program, args),
            code: result.exit_code,
        });
    }

    Ok(result)
}

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}
