//! Error types for swe-cli operations.
//!
//! This module defines [`SweError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `SweError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `SweError::Other`) for unexpected errors
//! - Best-effort failures are not errors; they are reported as
//!   [`Warning`](crate::scaffold::Warning) values by the pipeline

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A stage of the project generation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Resolving the template directory.
    LocateTemplate,
    /// Copying the template into the destination.
    CopyTemplate,
    /// Replacing the template module path in project files.
    RewriteModule,
    /// Updating the module manifest.
    UpdateManifest,
}

impl Stage {
    /// Human-readable stage name.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::LocateTemplate => "locate template",
            Stage::CopyTemplate => "copy template",
            Stage::RewriteModule => "rewrite module path",
            Stage::UpdateManifest => "update manifest",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Core error type for swe-cli operations.
#[derive(Debug, Error)]
pub enum SweError {
    /// Project name missing or empty after sanitization.
    #[error("Invalid project name: {message}")]
    InvalidProjectName { message: String },

    /// Destination directory already exists.
    #[error("Project directory '{}' already exists", .path.display())]
    DestinationExists { path: PathBuf },

    /// Destination would be created inside the template it is copied from.
    #[error(
        "Project directory '{}' is inside the template at '{}'; run swe-cli from outside the template",
        .path.display(),
        .template.display()
    )]
    DestinationInsideTemplate { path: PathBuf, template: PathBuf },

    /// Template directory could not be found.
    #[error("Template not found. Expected at: {}", .expected.display())]
    TemplateNotFound { expected: PathBuf },

    /// Copying the template tree failed.
    #[error("Failed to copy {} to {}: {source}", .src.display(), .dst.display())]
    CopyFailed {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing a file during content rewriting failed.
    #[error("Failed to rewrite {}: {source}", .path.display())]
    RewriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The module manifest does not exist.
    #[error("Manifest not found: {}", .path.display())]
    ManifestNotFound { path: PathBuf },

    /// A fatal pipeline stage failed.
    #[error("{stage} failed: {source}")]
    GenerationFailed {
        stage: Stage,
        #[source]
        source: Box<SweError>,
    },

    /// The remote version source did not contain a version string.
    #[error("Could not find version number at {url}")]
    VersionNotFound { url: String },

    /// The remote version check failed.
    #[error("Update check failed: {message}")]
    UpdateCheckFailed { message: String },

    /// External command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {}: {message}", .path.display())]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SweError {
    /// Wrap an error as the failure of a pipeline stage.
    pub fn at_stage(self, stage: Stage) -> Self {
        SweError::GenerationFailed {
            stage,
            source: Box::new(self),
        }
    }

    /// The failed stage, if this error came out of the generation pipeline.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            SweError::GenerationFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Result type alias for swe-cli operations.
pub type Result<T> = std::result::Result<T, SweError>;
