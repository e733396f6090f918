//! Template directory resolution.
//!
//! Resolution order, first hit wins:
//! 1. A cache record younger than the validity window whose path still exists
//! 2. `<dir of executable>/../<template>`
//! 3. `<cwd>/<template>`
//! 4. `<cwd>/../<template>`
//!
//! A hit from steps 2-4 is written back to the cache.

use std::path::{Path, PathBuf};

use chrono::Duration;

use crate::cache::{is_valid, TemplateCacheStore};
use crate::config::ScaffoldConfig;
use crate::error::{Result, SweError};

/// How a template location was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSource {
    /// Served from a fresh cache record.
    Cache,
    /// Found by searching the filesystem.
    Search,
}

/// A resolved template directory.
#[derive(Debug, Clone)]
pub struct LocatedTemplate {
    /// Template directory.
    pub path: PathBuf,
    /// How the directory was found.
    pub source: TemplateSource,
    /// Why the location could not be cached, if it couldn't.
    pub cache_error: Option<String>,
}

/// Resolves the template directory for a run.
pub struct TemplateLocator<'a> {
    store: &'a TemplateCacheStore,
    template_name: String,
    install_dir_name: String,
    version: String,
    max_age: Duration,
    exe_path: PathBuf,
    cwd: PathBuf,
}

impl<'a> TemplateLocator<'a> {
    /// Create a locator with an explicit executable path and working directory.
    pub fn new(
        config: &ScaffoldConfig,
        store: &'a TemplateCacheStore,
        exe_path: impl Into<PathBuf>,
        cwd: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            template_name: config.template_name.clone(),
            install_dir_name: config.install_dir_name.clone(),
            version: crate::CLI_VERSION.to_string(),
            max_age: config.cache_max_age(),
            exe_path: exe_path.into(),
            cwd: cwd.into(),
        }
    }

    /// Where the template is expected relative to the executable.
    pub fn expected_path(&self) -> PathBuf {
        let exe_dir = self.exe_path.parent().unwrap_or(Path::new("."));
        let parent = exe_dir.parent().unwrap_or(exe_dir);

        if exe_dir.file_name().is_some_and(|n| n == self.install_dir_name.as_str()) {
            tracing::debug!("Running from install dir {}", exe_dir.display());
        }

        // Both the install dir and a build dir sit one level below the
        // directory that holds the template.
        parent.join(&self.template_name)
    }

    /// Candidate paths in search order (cache excluded).
    pub fn candidates(&self) -> Vec<PathBuf> {
        vec![
            self.expected_path(),
            self.cwd.join(&self.template_name),
            self.cwd.join("..").join(&self.template_name),
        ]
    }

    /// Resolve the template directory.
    ///
    /// # Errors
    ///
    /// Returns `TemplateNotFound` naming the executable-relative path when no
    /// candidate exists.
    pub fn locate(&self) -> Result<LocatedTemplate> {
        if let Some(path) = self.cached_path() {
            return Ok(LocatedTemplate {
                path,
                source: TemplateSource::Cache,
                cache_error: None,
            });
        }

        let found = self
            .candidates()
            .into_iter()
            .find(|candidate| {
                let exists = candidate.exists();
                tracing::debug!("Template candidate {}: exists={}", candidate.display(), exists);
                exists
            })
            .ok_or_else(|| SweError::TemplateNotFound {
                expected: self.expected_path(),
            })?;

        let cache_error = match self.store.write(&self.version, &found) {
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("Failed to cache template location: {:#}", e);
                Some(format!("{:#}", e))
            }
        };

        Ok(LocatedTemplate {
            path: found,
            source: TemplateSource::Search,
            cache_error,
        })
    }

    /// The cached location, if it is fresh and still on disk.
    fn cached_path(&self) -> Option<PathBuf> {
        let record = match self.store.read() {
            Ok(Some(record)) => record,
            Ok(None) => return None,
            Err(e) => {
                tracing::debug!("Ignoring unreadable cache record: {:#}", e);
                return None;
            }
        };

        if !is_valid(&record, self.max_age) {
            tracing::debug!("Cache record for {} expired", record.path.display());
            return None;
        }

        if !record.path.exists() {
            tracing::debug!("Cached template {} no longer exists", record.path.display());
            return None;
        }

        tracing::info!("Using cached template: {}", record.path.display());
        Some(record.path)
    }
}
