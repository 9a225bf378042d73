//! The `ModkitConfig` structure and its defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default root scanned for modules.
pub const DEFAULT_MODULE_DIR: &str = "modules";

/// Default output root.
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Default entry filename inside each module.
pub const DEFAULT_MODULE_ENTRY: &str = "lib.js";

/// Settings for one modkit invocation.
///
/// Keys are kebab-case in every file format (`module-dir`, `build-dir`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ModkitConfig {
    /// Root directory whose immediate children are modules.
    #[serde(default = "default_module_dir")]
    pub module_dir: PathBuf,

    /// Output root; artifacts mirror their input path below it.
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,

    /// Filename of the library entry inside every module.
    #[serde(default = "default_module_entry")]
    pub module_entry: String,

    /// Minify emitted bundles.
    #[serde(default = "default_true")]
    pub minify: bool,

    /// Emit a sibling `.map` file for every bundle.
    #[serde(default = "default_true")]
    pub sourcemap: bool,

    /// Abort the whole run on the first failing module.
    #[serde(default)]
    pub fail_fast: bool,
}

impl Default for ModkitConfig {
    fn default() -> Self {
        Self {
            module_dir: default_module_dir(),
            build_dir: default_build_dir(),
            module_entry: default_module_entry(),
            minify: true,
            sourcemap: true,
            fail_fast: false,
        }
    }
}

pub fn default_module_dir() -> PathBuf {
    PathBuf::from(DEFAULT_MODULE_DIR)
}

pub fn default_build_dir() -> PathBuf {
    PathBuf::from(DEFAULT_BUILD_DIR)
}

pub fn default_module_entry() -> String {
    DEFAULT_MODULE_ENTRY.to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = ModkitConfig::default();
        assert_eq!(config.module_dir, PathBuf::from("modules"));
        assert_eq!(config.build_dir, PathBuf::from("build"));
        assert_eq!(config.module_entry, "lib.js");
        assert!(config.minify);
        assert!(config.sourcemap);
        assert!(!config.fail_fast);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config: ModkitConfig = toml::from_str("module-entry = \"index.js\"").unwrap();
        assert_eq!(config.module_entry, "index.js");
        assert_eq!(config.module_dir, PathBuf::from("modules"));
        assert!(config.minify);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<ModkitConfig, _> = toml::from_str("entry = \"index.js\"");
        assert!(result.is_err());
    }
}
