//! Cache storage implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::record::CachedTemplateRecord;

/// File name of the template record inside the cache directory.
pub const RECORD_FILE: &str = "sweets-layout.json";

/// Storage for the single cached template record.
///
/// Not safe for concurrent writers: two runs may race on the record file.
pub struct TemplateCacheStore {
    /// Root directory for cache.
    root: PathBuf,
}

impl TemplateCacheStore {
    /// Create a new cache store.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the record file.
    pub fn path(&self) -> PathBuf {
        self.root.join(RECORD_FILE)
    }

    /// Ensure the cache directory exists.
    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create cache directory {:?}", self.root))
    }

    /// Record `path` as the template location for `version`, replacing any
    /// previous record.
    pub fn write(&self, version: &str, path: &Path) -> Result<CachedTemplateRecord> {
        self.ensure_dir()?;

        let record = CachedTemplateRecord::new(version, path);
        let json = serde_json::to_string_pretty(&record)?;
        fs::write(self.path(), json)
            .with_context(|| format!("Failed to write cache record {:?}", self.path()))?;

        Ok(record)
    }

    /// Load the record.
    ///
    /// Returns `Ok(None)` when no record has been written and an error when
    /// the file can't be read or parsed.
    pub fn read(&self) -> Result<Option<CachedTemplateRecord>> {
        let path = self.path();

        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache record {:?}", path))?;
        let record: CachedTemplateRecord = serde_json::from_str(&json)
            .with_context(|| format!("Corrupt cache record {:?}", path))?;

        Ok(Some(record))
    }

    /// Remove the record. Returns whether a file was removed.
    pub fn clear(&self) -> Result<bool> {
        let path = self.path();

        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(&path)?;
        Ok(true)
    }
}
