//! Command-line interface for swe-cli.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    CacheArgs, CacheSubcommand, Cli, Commands, CompletionsArgs, NewArgs, UpgradeArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
