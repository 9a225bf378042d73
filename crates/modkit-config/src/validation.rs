//! Schema-level validation (no filesystem checks).
//!
//! A missing module directory is not a configuration error: discovery simply
//! finds no modules in it.

use std::path::{Component, Path};

use crate::config::ModkitConfig;
use crate::error::{ConfigError, Result};

impl ModkitConfig {
    /// Validate field values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when
    /// - `module-entry` is empty, a path, or `.`/`..`
    /// - `module-dir` or `build-dir` is empty
    /// - `build-dir` and `module-dir` name the same directory
    pub fn validate(&self) -> Result<()> {
        validate_entry_name(&self.module_entry)?;

        if self.module_dir.as_os_str().is_empty() {
            return Err(invalid("module-dir", "must not be empty"));
        }
        if self.build_dir.as_os_str().is_empty() {
            return Err(invalid("build-dir", "must not be empty"));
        }

        if normalized(&self.module_dir) == normalized(&self.build_dir) {
            return Err(invalid(
                "build-dir",
                "must differ from module-dir, otherwise bundles overwrite their sources",
            ));
        }

        Ok(())
    }
}

fn validate_entry_name(entry: &str) -> Result<()> {
    if entry.trim().is_empty() {
        return Err(invalid("module-entry", "must not be empty"));
    }

    let mut components = Path::new(entry).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(invalid(
            "module-entry",
            &format!("'{}' must be a plain filename such as lib.js", entry),
        )),
    }
}

/// Lexical comparison key: drops `.` segments and trailing separators.
fn normalized(path: &Path) -> Vec<Component<'_>> {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}
