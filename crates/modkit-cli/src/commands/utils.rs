//! Filesystem helpers shared by commands.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

/// Absolute project root from `--cwd`, or the process working directory.
pub fn resolve_cwd(explicit: Option<&Path>) -> Result<PathBuf> {
    let current = std::env::current_dir()?;
    let Some(explicit) = explicit else {
        return Ok(current);
    };

    let path = if explicit.is_absolute() {
        explicit.to_path_buf()
    } else {
        current.join(explicit)
    };

    if !path.is_dir() {
        return Err(CliError::DirectoryNotFound(path));
    }
    Ok(path.canonicalize()?)
}

/// `path` relative to `base` for display, or `path` as-is.
pub fn display_relative(path: &Path, base: &Path) -> String {
    match path.strip_prefix(base) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.display().to_string(),
        _ => path.display().to_string(),
    }
}

/// Remove everything inside `build_dir`, keeping the directory.
///
/// Refuses when `build_dir` is the project root or one of its ancestors, or
/// when it contains the module root.
pub fn clean_build_dir(build_dir: &Path, module_root: &Path, project_root: &Path) -> Result<()> {
    if project_root.starts_with(build_dir) {
        return Err(CliError::UnsafeClean {
            path: build_dir.to_path_buf(),
            reason: "it contains the project root".to_string(),
        });
    }
    if module_root.starts_with(build_dir) {
        return Err(CliError::UnsafeClean {
            path: build_dir.to_path_buf(),
            reason: "it contains the module sources".to_string(),
        });
    }

    if !build_dir.exists() {
        return Ok(());
    }
    if !build_dir.is_dir() {
        return Err(CliError::UnsafeClean {
            path: build_dir.to_path_buf(),
            reason: "it is not a directory".to_string(),
        });
    }

    for entry in fs::read_dir(build_dir)? {
        let path = entry?.path();
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }

    tracing::debug!(dir = %build_dir.display(), "cleaned build directory");
    Ok(())
}
