//! Recursive directory duplication.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Copy every file and directory under `src` into `dst`.
///
/// Relative structure and permission bits are preserved; symbolic links are
/// recreated as links on Unix. Returns the number of files copied.
///
/// Not atomic: on failure whatever was copied so far stays in `dst`.
/// A `dst` at or below `src` is refused with `InvalidInput` before anything
/// is created.
pub fn copy_tree(src: &Path, dst: &Path) -> io::Result<u64> {
    let meta = fs::metadata(src)?;
    if !meta.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a directory", src.display()),
        ));
    }

    if is_nested_in(dst, src) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is inside {}", dst.display(), src.display()),
        ));
    }

    fs::create_dir_all(dst)?;
    let copied = copy_dir_contents(src, dst)?;
    fs::set_permissions(dst, meta.permissions())?;

    tracing::debug!("Copied {} files from {} to {}", copied, src.display(), dst.display());
    Ok(copied)
}

/// Whether `dst`, once created, would be `src` itself or lie below it.
///
/// Both paths are resolved through symlinks; the part of `dst` that does
/// not exist yet is appended to its nearest existing ancestor.
pub fn is_nested_in(dst: &Path, src: &Path) -> bool {
    let Ok(src) = fs::canonicalize(src) else {
        return false;
    };
    resolve_future_path(dst).is_some_and(|dst| dst.starts_with(&src))
}

fn resolve_future_path(path: &Path) -> Option<PathBuf> {
    if let Ok(resolved) = fs::canonicalize(path) {
        return Some(resolved);
    }

    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    resolve_future_path(parent).map(|parent| parent.join(name))
}

fn copy_dir_contents(src: &Path, dst: &Path) -> io::Result<u64> {
    let mut copied = 0;

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            fs::create_dir_all(&to)?;
            copied += copy_dir_contents(&from, &to)?;
            fs::set_permissions(&to, fs::metadata(&from)?.permissions())?;
        } else if file_type.is_symlink() {
            copy_symlink(&from, &to)?;
        } else {
            // fs::copy carries the permission bits over.
            fs::copy(&from, &to)?;
            copied += 1;
        }
    }

    Ok(copied)
}

#[cfg(unix)]
fn copy_symlink(from: &Path, to: &Path) -> io::Result<()> {
    let target = fs::read_link(from)?;
    std::os::unix::fs::symlink(target, to)
}

#[cfg(not(unix))]
fn copy_symlink(from: &Path, to: &Path) -> io::Result<()> {
    fs::copy(from, to).map(|_| ())
}
