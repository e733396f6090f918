//! In-place content substitution across a directory tree.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use regex::bytes::{NoExpand, Regex};

use crate::error::{Result, SweError};

/// A substitution applied to raw file content.
///
/// The replacement text is always inserted verbatim; `$` is not expanded.
/// An empty pattern matches nothing.
#[derive(Debug, Clone)]
pub struct Replacement {
    regex: Regex,
    to: String,
}

impl Replacement {
    /// Literal replacement; `from` is escaped, so `.` or `$` in it match
    /// themselves.
    pub fn literal(
        from: &str,
        to: impl Into<String>,
    ) -> std::result::Result<Self, regex::Error> {
        Self::pattern(&regex::escape(from), to)
    }

    /// Regex replacement.
    pub fn pattern(
        pattern: &str,
        to: impl Into<String>,
    ) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            to: to.into(),
        })
    }

    /// Apply the replacement to a buffer.
    pub fn apply<'a>(&self, content: &'a [u8]) -> Cow<'a, [u8]> {
        if self.regex.as_str().is_empty() {
            return Cow::Borrowed(content);
        }
        self.regex.replace_all(content, NoExpand(self.to.as_bytes()))
    }
}

/// Counters from a rewrite pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// Regular files read.
    pub files_scanned: usize,
    /// Files whose content changed and was written back.
    pub files_changed: usize,
}

/// Apply `replacement` to every regular file under `root`.
///
/// Directories are traversed, symlinks are skipped. Files are handled as raw
/// bytes so binary content survives unless it contains a match.
///
/// # Errors
///
/// The first read or write failure aborts the walk with `RewriteFailed`.
/// Files rewritten before the failure stay rewritten.
pub fn rewrite_all(root: &Path, replacement: &Replacement) -> Result<RewriteStats> {
    let mut stats = RewriteStats::default();
    walk(root, replacement, &mut stats)?;
    tracing::debug!(
        "Rewrote {} of {} files under {}",
        stats.files_changed,
        stats.files_scanned,
        root.display()
    );
    Ok(stats)
}

fn walk(dir: &Path, replacement: &Replacement, stats: &mut RewriteStats) -> Result<()> {
    let fail = |path: &Path, source: std::io::Error| SweError::RewriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(|e| fail(dir, e))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| fail(dir, e))?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| fail(&path, e))?;

        if file_type.is_dir() {
            walk(&path, replacement, stats)?;
        } else if file_type.is_file() {
            let content = fs::read(&path).map_err(|e| fail(&path, e))?;
            stats.files_scanned += 1;

            if let Cow::Owned(updated) = replacement.apply(&content) {
                if updated != content {
                    fs::write(&path, &updated).map_err(|e| fail(&path, e))?;
                    stats.files_changed += 1;
                    tracing::trace!("Rewrote {}", path.display());
                }
            }
        }
    }

    Ok(())
}
