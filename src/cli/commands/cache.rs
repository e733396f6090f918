//! Cache command implementation.
//!
//! Provides `swe-cli cache show` and `swe-cli cache clear`.

use anyhow::Result;
use std::path::PathBuf;

use crate::cache::{default_cache_dir, format_duration, is_valid, TemplateCacheStore};
use crate::cli::args::{CacheArgs, CacheSubcommand};
use crate::config::ScaffoldConfig;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The cache command implementation.
pub struct CacheCommand {
    config: ScaffoldConfig,
    args: CacheArgs,
    cache_dir: Option<PathBuf>,
}

impl CacheCommand {
    /// Create a new cache command.
    pub fn new(config: ScaffoldConfig, args: CacheArgs) -> Self {
        Self {
            config,
            args,
            cache_dir: None,
        }
    }

    /// Use `cache_dir` instead of `~/.swe-cli/cache` (for testing).
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(cache_dir.into());
        self
    }
}

impl Command for CacheCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        let store = TemplateCacheStore::new(
            self.cache_dir.clone().unwrap_or_else(default_cache_dir),
        );

        match &self.args.command {
            CacheSubcommand::Show { json } => show_cache(&store, &self.config, *json, ui)?,
            CacheSubcommand::Clear => clear_cache(&store, ui)?,
        }

        Ok(CommandResult::success())
    }
}

fn show_cache(
    store: &TemplateCacheStore,
    config: &ScaffoldConfig,
    json: bool,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    let record = match store.read()? {
        Some(record) => record,
        None => {
            ui.message("No cached template location");
            return Ok(());
        }
    };

    if json {
        ui.message(&serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    let status = if !is_valid(&record, config.cache_max_age()) {
        "expired"
    } else if !record.path.exists() {
        "missing"
    } else {
        "fresh"
    };

    ui.message(&format!("Template: {}", record.path.display()));
    ui.message(&format!("Cached by: swe-cli {}", record.version));
    ui.message(&format!("Age: {} ({})", format_duration(record.age()), status));
    ui.message(&format!("Record: {}", store.path().display()));
    Ok(())
}

fn clear_cache(store: &TemplateCacheStore, ui: &mut dyn UserInterface) -> Result<()> {
    if store.clear()? {
        ui.success("Cleared cached template location");
    } else {
        ui.message("Cache is already empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CachedTemplateRecord;
    use crate::ui::MockUI;
    use chrono::{Duration, Utc};
    use std::fs;
    use tempfile::TempDir;

    fn run(temp: &TempDir, command: CacheSubcommand) -> MockUI {
        let mut ui = MockUI::new();
        CacheCommand::new(ScaffoldConfig::default(), CacheArgs { command })
            .with_cache_dir(temp.path().join("cache"))
            .execute(&mut ui)
            .unwrap();
        ui
    }

    #[test]
    fn show_empty_cache() {
        let temp = TempDir::new().unwrap();
        let ui = run(&temp, CacheSubcommand::Show { json: false });
        assert!(ui.has_message("No cached template location"));
    }

    #[test]
    fn show_fresh_record() {
        let temp = TempDir::new().unwrap();
        let template = temp.path().join("sweets-layout");
        fs::create_dir_all(&template).unwrap();
        TemplateCacheStore::new(temp.path().join("cache"))
            .write("0.3.0", &template)
            .unwrap();

        let ui = run(&temp, CacheSubcommand::Show { json: false });

        assert!(ui.has_message("sweets-layout"));
        assert!(ui.has_message("fresh"));
        assert!(ui.has_message("0.3.0"));
    }

    #[test]
    fn show_expired_record() {
        let temp = TempDir::new().unwrap();
        let cache = temp.path().join("cache");
        fs::create_dir_all(&cache).unwrap();
        let record = CachedTemplateRecord::new("0.3.0", temp.path())
            .with_cached_at(Utc::now() - Duration::hours(30));
        fs::write(
            cache.join(crate::cache::RECORD_FILE),
            serde_json::to_string(&record).unwrap(),
        )
        .unwrap();

        let ui = run(&temp, CacheSubcommand::Show { json: false });

        assert!(ui.has_message("expired"));
    }

    #[test]
    fn show_json() {
        let temp = TempDir::new().unwrap();
        TemplateCacheStore::new(temp.path().join("cache"))
            .write("0.3.0", temp.path())
            .unwrap();

        let ui = run(&temp, CacheSubcommand::Show { json: true });

        assert!(ui.has_message("\"cached_at\""));
        assert!(ui.has_message("\"checksum\""));
    }

    #[test]
    fn clear_removes_record() {
        let temp = TempDir::new().unwrap();
        let store = TemplateCacheStore::new(temp.path().join("cache"));
        store.write("0.3.0", temp.path()).unwrap();

        let ui = run(&temp, CacheSubcommand::Clear);

        assert!(ui.has_success("Cleared"));
        assert!(!store.path().exists());
    }

    #[test]
    fn clear_empty_cache() {
        let temp = TempDir::new().unwrap();
        let ui = run(&temp, CacheSubcommand::Clear);
        assert!(ui.has_message("already empty"));
    }
}
