//! Cached template record.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the template was last found, and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedTemplateRecord {
    /// Template version the record was written for.
    pub version: String,
    /// Template directory.
    pub path: PathBuf,
    /// When this record was written.
    pub cached_at: DateTime<Utc>,
    /// Reserved, always empty.
    #[serde(default)]
    pub checksum: String,
}

impl CachedTemplateRecord {
    /// Create a record stamped with the current time.
    pub fn new(version: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            version: version.into(),
            path: path.into(),
            cached_at: Utc::now(),
            checksum: String::new(),
        }
    }

    /// Backdate or forward-date the record.
    pub fn with_cached_at(mut self, cached_at: DateTime<Utc>) -> Self {
        self.cached_at = cached_at;
        self
    }

    /// Get the age of this record.
    pub fn age(&self) -> Duration {
        Utc::now().signed_duration_since(self.cached_at)
    }
}

/// Whether a record is younger than `max_age`.
///
/// Only the timestamp is considered; callers must still check that
/// `record.path` exists.
pub fn is_valid(record: &CachedTemplateRecord, max_age: Duration) -> bool {
    record.age() < max_age
}

/// Format a duration as a short human-readable string.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.num_seconds();

    if secs < 60 {
        format!("{}s", secs.max(0))
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86400 {
        format!("{}h", secs / 3600)
    } else {
        format!("{}d", secs / 86400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_has_empty_checksum() {
        let record = CachedTemplateRecord::new("1.0.0", "/opt/sweets-layout");
        assert_eq!(record.version, "1.0.0");
        assert_eq!(record.path, PathBuf::from("/opt/sweets-layout"));
        assert!(record.checksum.is_empty());
    }

    #[test]
    fn record_cached_now_is_valid_for_a_day() {
        let record = CachedTemplateRecord::new("1.0.0", "/tmp");
        assert!(is_valid(&record, Duration::hours(24)));
    }

    #[test]
    fn record_cached_25_hours_ago_is_invalid() {
        let record = CachedTemplateRecord::new("1.0.0", "/tmp")
            .with_cached_at(Utc::now() - Duration::hours(25));
        assert!(!is_valid(&record, Duration::hours(24)));
    }

    #[test]
    fn zero_max_age_is_never_valid() {
        let record = CachedTemplateRecord::new("1.0.0", "/tmp")
            .with_cached_at(Utc::now() - Duration::seconds(1));
        assert!(!is_valid(&record, Duration::zero()));
    }

    #[test]
    fn serializes_with_expected_field_names() {
        let record = CachedTemplateRecord::new("1.0.0", "/tmp/layout");
        let json: serde_json::Value = serde_json::to_value(&record).unwrap();

        assert_eq!(json["version"], "1.0.0");
        assert_eq!(json["path"], "/tmp/layout");
        assert_eq!(json["checksum"], "");
        assert!(json["cached_at"].is_string());
    }

    #[test]
    fn record_age_is_small_when_fresh() {
        let record = CachedTemplateRecord::new("1.0.0", "/tmp");
        assert!(record.age().num_seconds() < 1);
    }

    #[test]
    fn format_duration_units() {
        assert_eq!(format_duration(Duration::seconds(30)), "30s");
        assert_eq!(format_duration(Duration::minutes(5)), "5m");
        assert_eq!(format_duration(Duration::hours(3)), "3h");
        assert_eq!(format_duration(Duration::days(2)), "2d");
    }

    #[test]
    fn format_duration_negative_clamps_to_zero() {
        assert_eq!(format_duration(Duration::seconds(-5)), "0s");
    }
}
