use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};
use serde::Serialize;

use crate::config::ModkitConfig;
use crate::discovery::{ConfigDiscovery, ConfigSource};
use crate::error::Result;

/// Prefix for environment overrides (`MODKIT_MODULE_DIR`, `MODKIT_MINIFY`, ...).
pub const ENV_PREFIX: &str = "MODKIT_";

const ENV_KEYS: &[&str] = &[
    "module_dir",
    "build_dir",
    "module_entry",
    "minify",
    "sourcemap",
    "fail_fast",
];

/// Highest-priority layer, usually filled from command-line flags.
///
/// Only `Some` fields override lower layers.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_entry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sourcemap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_fast: Option<bool>,
}

impl ModkitConfig {
    /// Load configuration for the project rooted at `root`.
    ///
    /// Priority: overrides > environment > config file > defaults. When
    /// `config_path` is given it must exist; otherwise `root` is searched.
    /// Relative directories in the result stay relative to `root`.
    pub fn load(
        root: &Path,
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self> {
        let source = match config_path {
            Some(path) if path.is_absolute() => Some(ConfigDiscovery::explicit(path)?),
            Some(path) => Some(ConfigDiscovery::explicit(root.join(path))?),
            None => ConfigDiscovery::new(root).find()?,
        };

        if let Some(source) = &source {
            tracing::debug!(path = %source.path().display(), "using config file");
        }

        let config: ModkitConfig = Self::figment(source.as_ref(), overrides).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Assemble the provider stack without extracting it.
    pub fn figment(source: Option<&ConfigSource>, overrides: &ConfigOverrides) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(ModkitConfig::default()));

        match source {
            Some(ConfigSource::Toml(path)) => figment = figment.merge(Toml::file(path)),
            Some(ConfigSource::PackageJson { value, .. }) => {
                figment = figment.merge(Serialized::defaults(value.clone()))
            }
            None => {}
        }

        let env = Env::prefixed(ENV_PREFIX)
            .filter(|key| ENV_KEYS.iter().any(|k| key.as_str().eq_ignore_ascii_case(k)))
            .map(|key| key.as_str().to_ascii_lowercase().replace('_', "-").into());

        figment.merge(env).merge(Serialized::defaults(overrides))
    }
}
