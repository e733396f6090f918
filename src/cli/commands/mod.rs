//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations and loads configuration once.

pub mod cache;
pub mod completions;
pub mod dispatcher;
pub mod new;
pub mod upgrade;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
