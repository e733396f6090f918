//! Module manifest (`go.mod`) mutation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, SweError};

/// A `replace ( ... )` block that has been commented out with `//`.
static COMMENTED_REPLACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)//replace \(.*?\)").unwrap());

/// A `replace ( ... )` block starting a line.
static BARE_REPLACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?ms)^[ \t]*replace \(.*?\)").unwrap());

/// Point the manifest at `module_name` and drop commented-out replace blocks.
///
/// The first line is replaced with `module <module_name>`, whatever it held.
///
/// # Errors
///
/// Returns `ManifestNotFound` if `<root>/<manifest_file>` does not exist.
pub fn update_manifest(root: &Path, manifest_file: &str, module_name: &str) -> Result<()> {
    let path = manifest_path(root, manifest_file)?;
    let content = fs::read_to_string(&path)?;

    let with_module = set_module_line(&content, module_name);
    let updated = COMMENTED_REPLACE.replace_all(&with_module, "");

    fs::write(&path, updated.as_bytes())?;
    tracing::debug!("Updated {} to module {}", path.display(), module_name);
    Ok(())
}

/// Remove live (uncommented) `replace ( ... )` blocks from the manifest.
///
/// Commented blocks are left alone.
pub fn strip_replace_directive(root: &Path, manifest_file: &str) -> Result<()> {
    let path = manifest_path(root, manifest_file)?;
    let content = fs::read_to_string(&path)?;

    let updated = BARE_REPLACE.replace_all(&content, "");
    fs::write(&path, updated.as_bytes())?;
    Ok(())
}

fn manifest_path(root: &Path, manifest_file: &str) -> Result<PathBuf> {
    let path = root.join(manifest_file);
    if !path.is_file() {
        return Err(SweError::ManifestNotFound { path });
    }
    Ok(path)
}

fn set_module_line(content: &str, module_name: &str) -> String {
    let mut lines: Vec<&str> = content.split('\n').collect();
    let module_line = if lines[0].ends_with('\r') {
        format!("module {}\r", module_name)
    } else {
        format!("module {}", module_name)
    };

    let rest = lines.split_off(1);
    std::iter::once(module_line.as_str())
        .chain(rest)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const GO_MOD: &str = "module github.com/go-sweets/sweets-layout

go 1.22

require (
\tgithub.com/cloudwego/hertz v0.9.0
)

//replace (
//\tgithub.com/go-sweets/common => ../common
//)
";

    fn project(content: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("go.mod"), content).unwrap();
        temp
    }

    fn read(temp: &TempDir) -> String {
        fs::read_to_string(temp.path().join("go.mod")).unwrap()
    }

    #[test]
    fn rewrites_first_line() {
        let temp = project(GO_MOD);

        update_manifest(temp.path(), "go.mod", "myproj").unwrap();

        let content = read(&temp);
        assert_eq!(content.lines().next(), Some("module myproj"));
        assert!(content.contains("github.com/cloudwego/hertz v0.9.0"));
    }

    #[test]
    fn removes_commented_replace_block() {
        let temp = project(GO_MOD);

        update_manifest(temp.path(), "go.mod", "github.com/org/myproj").unwrap();

        let content = read(&temp);
        assert!(!content.contains("//replace"));
        assert!(!content.contains("../common"));
        assert!(content.contains("require ("));
    }

    #[test]
    fn first_line_replaced_even_if_not_a_module_line() {
        let temp = project("// generated\ngo 1.22\n");

        update_manifest(temp.path(), "go.mod", "svc").unwrap();

        assert_eq!(read(&temp), "module svc\ngo 1.22\n");
    }

    #[test]
    fn empty_manifest_gets_module_line() {
        let temp = project("");

        update_manifest(temp.path(), "go.mod", "svc").unwrap();

        assert_eq!(read(&temp), "module svc");
    }

    #[test]
    fn preserves_crlf_on_first_line() {
        let temp = project("module old\r\ngo 1.22\r\n");

        update_manifest(temp.path(), "go.mod", "new").unwrap();

        assert_eq!(read(&temp), "module new\r\ngo 1.22\r\n");
    }

    #[test]
    fn module_name_is_not_expanded() {
        let temp = project("module old\n");

        update_manifest(temp.path(), "go.mod", "example.com/$1").unwrap();

        assert_eq!(read(&temp), "module example.com/$1\n");
    }

    #[test]
    fn missing_manifest_is_reported() {
        let temp = TempDir::new().unwrap();

        let err = update_manifest(temp.path(), "go.mod", "svc").unwrap_err();
        match err {
            SweError::ManifestNotFound { path } => assert!(path.ends_with("go.mod")),
            other => panic!("expected ManifestNotFound, got {:?}", other),
        }
    }

    #[test]
    fn strip_removes_live_replace_block_only() {
        let temp = project(
            "module svc\n\nreplace (\n\tgithub.com/a/b => ../b\n)\n\n//replace (\n//\tx => y\n//)\n",
        );

        strip_replace_directive(temp.path(), "go.mod").unwrap();

        let content = read(&temp);
        assert!(!content.contains("github.com/a/b"));
        assert!(content.contains("//replace ("));
        assert!(content.starts_with("module svc\n"));
    }

    #[test]
    fn strip_without_block_is_a_no_op() {
        let temp = project(GO_MOD);

        strip_replace_directive(temp.path(), "go.mod").unwrap();

        assert_eq!(read(&temp), GO_MOD);
    }

    #[test]
    fn strip_missing_manifest_is_reported() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            strip_replace_directive(temp.path(), "go.mod"),
            Err(SweError::ManifestNotFound { .. })
        ));
    }
}
