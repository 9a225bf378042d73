//! Atomic writes of bundle artifacts below the build root.
//!
//! Code and map are first written to `.tmp` siblings and then renamed into
//! place, so a failed build never leaves a bundle without its map or a
//! half-written file. Every target is checked to stay inside the build root.

use std::fs;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

use super::artifact::BundleArtifact;
use crate::{Error, Result};

/// Files written for one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifact {
    pub code: PathBuf,
    pub map: Option<PathBuf>,
}

/// Write `artifact` to `output_file` (and `<output_file>.map`).
///
/// When the artifact has no map, a stale map from an earlier build is removed.
pub fn write_artifact(
    build_root: &Path,
    output_file: &Path,
    artifact: &BundleArtifact,
) -> Result<WrittenArtifact> {
    let code_path = validate_output_path(build_root, output_file)?;
    let map_path = map_path_for(&code_path);

    let mut operations: Vec<(PathBuf, &[u8])> = vec![(code_path.clone(), artifact.code.as_bytes())];
    if let Some(map) = &artifact.map {
        operations.push((map_path.clone(), map.as_bytes()));
    }

    write_files_atomic(&operations)?;

    if artifact.map.is_none() && map_path.is_file() {
        tracing::debug!(path = %map_path.display(), "removing stale source map");
        fs::remove_file(&map_path)?;
    }

    Ok(WrittenArtifact {
        code: code_path,
        map: artifact.map.as_ref().map(|_| map_path),
    })
}

/// `<path>.map`
pub fn map_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".map");
    PathBuf::from(name)
}

/// Normalize `candidate` and make sure it stays below `base_dir`.
///
/// Relative candidates are taken relative to `base_dir`.
pub fn validate_output_path(base_dir: &Path, candidate: &Path) -> Result<PathBuf> {
    if candidate.as_os_str().as_encoded_bytes().contains(&0) {
        return Err(Error::InvalidOutputPath(
            "path contains null byte".to_string(),
        ));
    }

    let base_dir = base_dir.clean();
    let full_path = base_dir.join(candidate).clean();

    if full_path == base_dir || !full_path.starts_with(&base_dir) {
        return Err(Error::InvalidOutputPath(format!(
            "'{}' escapes build directory '{}'",
            candidate.display(),
            base_dir.display()
        )));
    }

    Ok(full_path)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn write_files_atomic(operations: &[(PathBuf, &[u8])]) -> Result<()> {
    let mut temp_files = Vec::new();

    for (target_path, content) in operations {
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                cleanup_temp_files(&temp_files);
                Error::WriteFailure(format!(
                    "failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let temp_path = temp_path_for(target_path);
        fs::write(&temp_path, content).map_err(|e| {
            cleanup_temp_files(&temp_files);
            Error::WriteFailure(format!(
                "failed to write '{}': {}",
                temp_path.display(),
                e
            ))
        })?;

        temp_files.push((temp_path, target_path.clone()));
    }

    for (temp_path, target_path) in &temp_files {
        fs::rename(temp_path, target_path).map_err(|e| {
            cleanup_temp_files(&temp_files);
            Error::WriteFailure(format!(
                "failed to rename '{}' to '{}': {}",
                temp_path.display(),
                target_path.display(),
                e
            ))
        })?;
    }

    Ok(())
}

fn cleanup_temp_files(temp_files: &[(PathBuf, PathBuf)]) {
    for (temp_path, _) in temp_files {
        if temp_path.exists() {
            if let Err(e) = fs::remove_file(temp_path) {
                tracing::warn!(path = %temp_path.display(), error = %e, "failed to clean up temporary file");
            }
        }
    }
}
