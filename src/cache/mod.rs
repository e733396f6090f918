//! Template location caching.
//!
//! A single JSON record remembers where the template was last found so the
//! filesystem search can be skipped for a day.

pub mod record;
pub mod store;

pub use record::{format_duration, is_valid, CachedTemplateRecord};
pub use store::{TemplateCacheStore, RECORD_FILE};

/// Get the default cache directory: `~/.swe-cli/cache`.
pub fn default_cache_dir() -> std::path::PathBuf {
    crate::config::app_dir()
        .unwrap_or_else(|| std::path::PathBuf::from(crate::config::loader::APP_DIR_NAME))
        .join("cache")
}
