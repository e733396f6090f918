//! New command implementation.
//!
//! The `swe-cli new` command materializes a project from the template.

use std::path::PathBuf;

use crate::cache::{default_cache_dir, TemplateCacheStore};
use crate::cli::args::NewArgs;
use crate::config::ScaffoldConfig;
use crate::error::Result;
use crate::scaffold::{
    CommandInstaller, DependencyInstaller, GenerateOptions, Generator, ProjectRequest,
};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The new command implementation.
pub struct NewCommand {
    cwd: PathBuf,
    config: ScaffoldConfig,
    args: NewArgs,
    exe_path: Option<PathBuf>,
    cache_dir: Option<PathBuf>,
}

impl NewCommand {
    /// Create a new command that generates the project under `cwd`.
    pub fn new(cwd: &std::path::Path, config: ScaffoldConfig, args: NewArgs) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
            config,
            args,
            exe_path: None,
            cache_dir: None,
        }
    }

    /// Resolve the template as if running from `exe_path` (for testing).
    pub fn with_exe_path(mut self, exe_path: impl Into<PathBuf>) -> Self {
        self.exe_path = Some(exe_path.into());
        self
    }

    /// Use `cache_dir` instead of `~/.swe-cli/cache` (for testing).
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(cache_dir.into());
        self
    }
}

impl Command for NewCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let request = ProjectRequest::new(&self.args.project_name, self.args.module_name.as_deref())?;

        let exe_path = match &self.exe_path {
            Some(path) => path.clone(),
            None => std::env::current_exe()?,
        };
        let cache = TemplateCacheStore::new(
            self.cache_dir.clone().unwrap_or_else(default_cache_dir),
        );
        let installer = CommandInstaller::new(self.config.install_command.clone())
            .show_output(ui.output_mode().shows_command_output());
        let installer: &dyn DependencyInstaller = &installer;

        let options = GenerateOptions {
            skip_install: self.args.skip_install,
            strip_replace: self.args.strip_replace,
        };

        let report = Generator::new(&self.config, &cache, installer, exe_path, &self.cwd)
            .with_options(options)
            .generate(&request, ui)?;

        tracing::info!(
            "Generated {} with {} warning(s)",
            report.project_dir.display(),
            report.warnings.len()
        );

        Ok(CommandResult::success())
    }
}
