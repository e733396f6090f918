//! Project materialization.
//!
//! The [`Generator`] turns a [`ProjectRequest`] into a new project directory:
//! locate the template, copy it, rewrite the module identity, update the
//! manifest, remove build artifacts and install dependencies.
//!
//! Fatal stage failures come back as [`SweError::GenerationFailed`]. The
//! best-effort stages (cache write, cleanup, dependency install) never fail
//! the run; their problems are collected as [`Warning`]s on the
//! [`GenerationReport`].
//!
//! [`SweError::GenerationFailed`]: crate::error::SweError::GenerationFailed

pub mod cleanup;
pub mod copy;
pub mod generator;
pub mod install;
pub mod manifest;
pub mod request;
pub mod rewrite;

pub use cleanup::{cleanup, CleanupReport};
pub use copy::{copy_tree, is_nested_in};
pub use generator::{GenerateOptions, GenerationReport, Generator};
pub use install::{CommandInstaller, DependencyInstaller};
pub use manifest::{strip_replace_directive, update_manifest};
pub use request::ProjectRequest;
pub use rewrite::{rewrite_all, Replacement, RewriteStats};

use std::fmt;
use std::path::PathBuf;

/// A non-fatal problem encountered while generating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The template location could not be cached.
    CacheWrite { message: String },
    /// A build artifact could not be removed.
    Cleanup { path: PathBuf, message: String },
    /// The dependency installer failed.
    DependencyInstall { command: String, message: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::CacheWrite { message } => {
                write!(f, "Could not cache template location: {}", message)
            }
            Warning::Cleanup { path, message } => {
                write!(f, "Could not remove {}: {}", path.display(), message)
            }
            Warning::DependencyInstall { command, message } => {
                write!(f, "`{}` failed: {}", command, message)
            }
        }
    }
}
