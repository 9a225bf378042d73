//! File-based config discovery.
//!
//! Looks for, in order:
//! 1. `modkit.toml`
//! 2. `package.json` with a `modkit` field

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{ConfigError, Result};

pub const CONFIG_FILE: &str = "modkit.toml";
pub const PACKAGE_JSON: &str = "package.json";
pub const PACKAGE_JSON_FIELD: &str = "modkit";

/// A located configuration source.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// A standalone TOML file.
    Toml(PathBuf),
    /// The `modkit` object of a `package.json`, already extracted.
    PackageJson { path: PathBuf, value: Value },
}

impl ConfigSource {
    pub fn path(&self) -> &Path {
        match self {
            ConfigSource::Toml(path) => path,
            ConfigSource::PackageJson { path, .. } => path,
        }
    }
}

/// Searches a project root for modkit configuration.
///
/// ```no_run
/// use modkit_config::ConfigDiscovery;
///
/// let source = ConfigDiscovery::new(".").find().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a config source in the root directory.
    ///
    /// A `package.json` without a non-null `modkit` field does not count.
    pub fn find(&self) -> Result<Option<ConfigSource>> {
        let toml_path = self.root.join(CONFIG_FILE);
        if toml_path.is_file() {
            return Ok(Some(ConfigSource::Toml(toml_path)));
        }

        let pkg_path = self.root.join(PACKAGE_JSON);
        if pkg_path.is_file() {
            return read_package_json(&pkg_path);
        }

        Ok(None)
    }

    /// Resolve an explicitly named config file.
    ///
    /// `.toml` files are used as-is; `package.json` is read for its `modkit`
    /// field. Anything else is rejected.
    pub fn explicit(path: impl AsRef<Path>) -> Result<ConfigSource> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        if path.file_name().and_then(|n| n.to_str()) == Some(PACKAGE_JSON) {
            return match read_package_json(path)? {
                Some(source) => Ok(source),
                None => Err(ConfigError::InvalidValue {
                    field: PACKAGE_JSON_FIELD.to_string(),
                    message: format!("{} has no '{}' field", path.display(), PACKAGE_JSON_FIELD),
                }),
            };
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(ConfigSource::Toml(path.to_path_buf())),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

fn read_package_json(path: &Path) -> Result<Option<ConfigSource>> {
    let content = fs::read_to_string(path)?;
    let parsed: Value = serde_json::from_str(&content).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    match parsed.get(PACKAGE_JSON_FIELD) {
        Some(value) if value.is_object() => Ok(Some(ConfigSource::PackageJson {
            path: path.to_path_buf(),
            value: value.clone(),
        })),
        Some(value) if !value.is_null() => Err(ConfigError::InvalidValue {
            field: PACKAGE_JSON_FIELD.to_string(),
            message: format!(
                "the '{}' field of package.json must be an object",
                PACKAGE_JSON_FIELD
            ),
        }),
        _ => Ok(None),
    }
}
