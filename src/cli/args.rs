//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// swe-cli - Scaffold microservice projects from the sweets-layout template.
#[derive(Debug, Parser)]
#[command(name = "swe-cli")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides ~/.swe-cli/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project from the template
    New(NewArgs),

    /// Upgrade swe-cli to the latest published version
    Upgrade(UpgradeArgs),

    /// Inspect or clear the cached template location
    Cache(CacheArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `new` command.
#[derive(Debug, Clone, clap::Args)]
pub struct NewArgs {
    /// Directory name of the new project
    pub project_name: String,

    /// Module path (defaults to the project name)
    pub module_name: Option<String>,

    /// Don't install dependencies after generating
    #[arg(long)]
    pub skip_install: bool,

    /// Also remove live replace blocks from go.mod
    #[arg(long)]
    pub strip_replace: bool,
}

/// Arguments for the `upgrade` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct UpgradeArgs {
    /// Only report whether a newer version exists
    #[arg(long)]
    pub check: bool,

    /// Upgrade without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `cache` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

/// Cache subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CacheSubcommand {
    /// Show the cached template location
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove the cached template location
    Clear,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
