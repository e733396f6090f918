//! swe-cli - Scaffold microservice projects from a template.
//!
//! swe-cli copies the `sweets-layout` template into a new directory,
//! rewrites its module path to the one you choose, strips build artifacts
//! and installs dependencies. It can also upgrade itself.
//!
//! # Modules
//!
//! - [`cache`] - Cached template location
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and defaults
//! - [`error`] - Error types and result aliases
//! - [`scaffold`] - The project generation pipeline
//! - [`shell`] - External command execution
//! - [`template`] - Template discovery
//! - [`ui`] - Prompts, spinners, and terminal output
//! - [`updates`] - Version checks and self-upgrade
//!
//! # Example
//!
//! ```
//! use swe_cli::scaffold::ProjectRequest;
//!
//! let request = ProjectRequest::new("my svc", None).unwrap();
//! assert_eq!(request.project_name(), "mysvc");
//! assert_eq!(request.module_name(), "mysvc");
//! ```
//!
//! For end-to-end generation, see the integration tests.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod scaffold;
pub mod shell;
pub mod template;
pub mod ui;
pub mod updates;

pub use error::{Result, SweError};

/// Version of the running binary, recorded in the template cache.
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");
