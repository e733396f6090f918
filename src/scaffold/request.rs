//! Validated project generation request.

use crate::error::{Result, SweError};

/// What to generate: the project directory name and its module path.
///
/// Built once from parsed arguments and passed down unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRequest {
    project_name: String,
    module_name: String,
}

impl ProjectRequest {
    /// Validate a request.
    ///
    /// Whitespace is stripped from the project name; the module name
    /// defaults to the sanitized project name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidProjectName` if nothing is left after sanitizing, or
    /// if the name is `.`, `..` or contains a path separator. The project is
    /// always created directly under the working directory.
    pub fn new(project_name: &str, module_name: Option<&str>) -> Result<Self> {
        let project_name: String = project_name.chars().filter(|c| !c.is_whitespace()).collect();

        if project_name.is_empty() {
            return Err(SweError::InvalidProjectName {
                message: "Project name is required. Usage: swe-cli new <project-name> [module-name]"
                    .to_string(),
            });
        }

        if project_name == "." || project_name == ".." {
            return Err(SweError::InvalidProjectName {
                message: format!("'{}' is not a directory name", project_name),
            });
        }

        if project_name.chars().any(|c| c == '/' || std::path::is_separator(c)) {
            return Err(SweError::InvalidProjectName {
                message: format!(
                    "'{}' must be a plain directory name without path separators",
                    project_name
                ),
            });
        }

        let module_name = match module_name.map(str::trim) {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => project_name.clone(),
        };

        Ok(Self {
            project_name,
            module_name,
        })
    }

    /// Directory name of the new project.
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Module path written into the manifest and sources.
    pub fn module_name(&self) -> &str {
        &self.module_name
    }
}
