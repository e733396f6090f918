//! Best-effort removal of build artifacts from a generated project.

use std::fs;
use std::path::{Path, PathBuf};

/// What a cleanup pass did.
#[derive(Debug, Default)]
pub struct CleanupReport {
    /// Paths that were deleted.
    pub removed: Vec<PathBuf>,
    /// Paths that existed but could not be deleted, with the reason.
    pub failures: Vec<(PathBuf, String)>,
}

impl CleanupReport {
    /// Whether every existing artifact was removed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Delete each of `artifacts` (relative to `root`) that exists.
///
/// Missing entries are skipped. Never fails: deletion errors are collected in
/// the report for the caller to surface.
pub fn cleanup<S: AsRef<str>>(root: &Path, artifacts: &[S]) -> CleanupReport {
    let mut report = CleanupReport::default();

    for artifact in artifacts {
        let path = root.join(artifact.as_ref());
        let meta = match fs::symlink_metadata(&path) {
            Ok(meta) => meta,
            Err(_) => continue,
        };

        let result = if meta.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };

        match result {
            Ok(()) => {
                tracing::debug!("Removed {}", path.display());
                report.removed.push(path);
            }
            Err(e) => {
                tracing::warn!("Failed to remove {}: {}", path.display(), e);
                report.failures.push((path, e.to_string()));
            }
        }
    }

    report
}
