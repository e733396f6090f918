//! Project generation pipeline.

use std::path::{Path, PathBuf};

use crate::cache::TemplateCacheStore;
use crate::config::ScaffoldConfig;
use crate::error::{Result, Stage, SweError};
use crate::template::{LocatedTemplate, TemplateLocator, TemplateSource};
use crate::ui::UserInterface;

use super::cleanup::cleanup;
use super::copy::{copy_tree, is_nested_in};
use super::install::DependencyInstaller;
use super::manifest::{strip_replace_directive, update_manifest};
use super::request::ProjectRequest;
use super::rewrite::{rewrite_all, Replacement};
use super::Warning;

/// Optional pipeline behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Don't run the dependency installer.
    pub skip_install: bool,
    /// Also remove live `replace ( ... )` blocks from the manifest.
    pub strip_replace: bool,
}

/// Outcome of a successful generation.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// The new project directory.
    pub project_dir: PathBuf,
    /// Directory name of the project.
    pub project_name: String,
    /// Module path written into the project.
    pub module_name: String,
    /// The template the project was copied from.
    pub template: LocatedTemplate,
    /// Number of files whose content was rewritten.
    pub rewritten_files: usize,
    /// Best-effort problems, in the order they happened.
    pub warnings: Vec<Warning>,
}

impl GenerationReport {
    /// Whether every stage ran cleanly.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Commands suggested after a project is generated.
pub fn next_steps(project_name: &str) -> Vec<String> {
    vec![
        format!("cd {}", project_name),
        "make init".to_string(),
        "make api".to_string(),
        "make gen".to_string(),
        "make run".to_string(),
    ]
}

/// Materializes projects from the template.
pub struct Generator<'a> {
    config: &'a ScaffoldConfig,
    cache: &'a TemplateCacheStore,
    installer: &'a dyn DependencyInstaller,
    exe_path: PathBuf,
    cwd: PathBuf,
    options: GenerateOptions,
}

impl<'a> Generator<'a> {
    /// Create a generator that resolves the template from `exe_path` and
    /// creates projects under `cwd`.
    pub fn new(
        config: &'a ScaffoldConfig,
        cache: &'a TemplateCacheStore,
        installer: &'a dyn DependencyInstaller,
        exe_path: impl Into<PathBuf>,
        cwd: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            cache,
            installer,
            exe_path: exe_path.into(),
            cwd: cwd.into(),
            options: GenerateOptions::default(),
        }
    }

    /// Set optional behavior.
    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    /// Generate the project described by `request`.
    ///
    /// # Errors
    ///
    /// - `DestinationExists` if `<cwd>/<project_name>` is already there, and
    ///   `DestinationInsideTemplate` if it would land inside the template;
    ///   nothing is touched in either case.
    /// - `GenerationFailed` naming the stage for template lookup, copy,
    ///   rewrite and manifest failures. A partially written project is left
    ///   in place.
    pub fn generate(
        &self,
        request: &ProjectRequest,
        ui: &mut dyn UserInterface,
    ) -> Result<GenerationReport> {
        let mut warnings = Vec::new();

        let template = self.locate(ui)?;
        if let Some(message) = &template.cache_error {
            let warning = Warning::CacheWrite {
                message: message.clone(),
            };
            ui.warning(&warning.to_string());
            warnings.push(warning);
        }

        let project_dir = self.cwd.join(request.project_name());
        if project_dir.symlink_metadata().is_ok() {
            return Err(SweError::DestinationExists { path: project_dir });
        }
        if is_nested_in(&project_dir, &template.path) {
            return Err(SweError::DestinationInsideTemplate {
                path: project_dir,
                template: template.path,
            });
        }

        ui.message(&format!(
            "Creating project {} (module {})",
            request.project_name(),
            request.module_name()
        ));

        self.copy(&template.path, &project_dir, ui)?;
        let rewritten_files = self.rewrite(&project_dir, request, ui)?;

        for artifact in cleanup(&project_dir, &self.config.cleanup_paths).failures {
            let warning = Warning::Cleanup {
                path: artifact.0,
                message: artifact.1,
            };
            ui.warning(&warning.to_string());
            warnings.push(warning);
        }

        if let Some(warning) = self.install(&project_dir, ui) {
            ui.warning(&warning.to_string());
            warnings.push(warning);
        }

        ui.success(&format!(
            "Project {} created at {}",
            request.project_name(),
            project_dir.display()
        ));
        ui.message("Next steps:");
        for step in next_steps(request.project_name()) {
            ui.show_hint(&step);
        }

        Ok(GenerationReport {
            project_dir,
            project_name: request.project_name().to_string(),
            module_name: request.module_name().to_string(),
            template,
            rewritten_files,
            warnings,
        })
    }

    fn locate(&self, ui: &mut dyn UserInterface) -> Result<LocatedTemplate> {
        let mut spinner = ui.start_spinner("Locating template...");
        let locator = TemplateLocator::new(self.config, self.cache, &self.exe_path, &self.cwd);

        match locator.locate() {
            Ok(template) => {
                let via = match template.source {
                    TemplateSource::Cache => " (cached)",
                    TemplateSource::Search => "",
                };
                spinner.finish_success(&format!(
                    "Using template {}{}",
                    template.path.display(),
                    via
                ));
                Ok(template)
            }
            Err(e) => {
                spinner.finish_error("Template not found");
                Err(e.at_stage(Stage::LocateTemplate))
            }
        }
    }

    fn copy(&self, template: &Path, project_dir: &Path, ui: &mut dyn UserInterface) -> Result<()> {
        let mut spinner = ui.start_spinner("Copying template...");

        match copy_tree(template, project_dir) {
            Ok(files) => {
                spinner.finish_success(&format!("Copied {} files", files));
                Ok(())
            }
            Err(source) => {
                spinner.finish_error("Copy failed");
                Err(SweError::CopyFailed {
                    src: template.to_path_buf(),
                    dst: project_dir.to_path_buf(),
                    source,
                }
                .at_stage(Stage::CopyTemplate))
            }
        }
    }

    fn rewrite(
        &self,
        project_dir: &Path,
        request: &ProjectRequest,
        ui: &mut dyn UserInterface,
    ) -> Result<usize> {
        let mut spinner = ui.start_spinner("Updating module path...");

        let stats = match Replacement::literal(&self.config.template_module, request.module_name())
            .map_err(|e| SweError::ConfigValidationError {
                message: format!("template_module cannot be matched: {}", e),
            })
            .and_then(|replacement| rewrite_all(project_dir, &replacement))
        {
            Ok(stats) => stats,
            Err(e) => {
                spinner.finish_error("Rewrite failed");
                return Err(e.at_stage(Stage::RewriteModule));
            }
        };

        let manifest = &self.config.manifest_file;
        let updated = update_manifest(project_dir, manifest, request.module_name()).and_then(|()| {
            if self.options.strip_replace {
                strip_replace_directive(project_dir, manifest)
            } else {
                Ok(())
            }
        });
        if let Err(e) = updated {
            spinner.finish_error(&format!("Failed to update {}", manifest));
            return Err(e.at_stage(Stage::UpdateManifest));
        }

        spinner.finish_success(&format!(
            "Module set to {} ({} files updated)",
            request.module_name(),
            stats.files_changed
        ));
        Ok(stats.files_changed)
    }

    fn install(&self, project_dir: &Path, ui: &mut dyn UserInterface) -> Option<Warning> {
        let command = self.installer.describe();

        if self.options.skip_install {
            let mut spinner = ui.start_spinner(&format!("Running {}...", command));
            spinner.finish_skipped(&format!("Skipped {}", command));
            return None;
        }

        let mut spinner = ui.start_spinner(&format!("Running {}...", command));
        match self.installer.install(project_dir) {
            Ok(()) => {
                spinner.finish_success("Dependencies installed");
                None
            }
            Err(e) => {
                spinner.finish_error(&format!("{} failed", command));
                Some(Warning::DependencyInstall {
                    command,
                    message: e.to_string(),
                })
            }
        }
    }
}
