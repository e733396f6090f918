//! External command execution.

pub mod command;

pub use command::{display_command, is_ci, run, run_checked, CommandOptions, CommandResult};
