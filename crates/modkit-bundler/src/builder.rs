//! Per-module build orchestration.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use modkit_config::ModkitConfig;
use path_clean::PathClean;
use rolldown::{
    BundlerBuilder as RolldownBundlerBuilder, BundlerOptions, InputItem, OutputFormat,
    RawMinifyOptions, SourceMapType,
};
use rolldown_plugin::__inner::SharedPluginable;

use crate::boundary::ModuleBoundary;
use crate::discovery::{ModuleEntry, discover_modules};
use crate::output::{BundleArtifact, mirror_path, write_artifact};
use crate::plugin::{ExternalImport, ModuleBoundaryPlugin};
use crate::{Error, Result};

/// A module that was bundled and written.
#[derive(Debug, Clone)]
pub struct BuiltModule {
    pub name: String,
    pub output: PathBuf,
    pub sourcemap: Option<PathBuf>,
    /// Size of the emitted bundle in bytes.
    pub size: u64,
    /// Imports left out of the bundle, in the order Rolldown resolved them.
    pub externals: Vec<ExternalImport>,
}

#[derive(Debug)]
pub struct ModuleFailure {
    pub name: String,
    pub error: Error,
}

/// Outcome of [`ModuleBuilder::build_all`].
#[derive(Debug, Default)]
pub struct BuildReport {
    pub built: Vec<BuiltModule>,
    pub failures: Vec<ModuleFailure>,
    pub duration: Duration,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of modules attempted.
    pub fn total(&self) -> usize {
        self.built.len() + self.failures.len()
    }

    pub fn total_size(&self) -> u64 {
        self.built.iter().map(|m| m.size).sum()
    }
}

/// Builds every module under the configured module root.
///
/// Relative directories in the config are resolved against `cwd`.
#[derive(Debug, Clone)]
pub struct ModuleBuilder {
    config: ModkitConfig,
    cwd: PathBuf,
    module_root: PathBuf,
    build_root: PathBuf,
}

impl ModuleBuilder {
    pub fn new(config: ModkitConfig, cwd: impl Into<PathBuf>) -> Self {
        let cwd = cwd.into().clean();
        let module_root = cwd.join(&config.module_dir).clean();
        let build_root = cwd.join(&config.build_dir).clean();
        Self {
            config,
            cwd,
            module_root,
            build_root,
        }
    }

    pub fn config(&self) -> &ModkitConfig {
        &self.config
    }

    /// Absolute module root.
    pub fn module_root(&self) -> &Path {
        &self.module_root
    }

    /// Absolute build root.
    pub fn build_root(&self) -> &Path {
        &self.build_root
    }

    /// Modules found under the module root, sorted by name.
    pub fn discover(&self) -> Result<Vec<ModuleEntry>> {
        discover_modules(&self.module_root, &self.config.module_entry)
    }

    /// Where `module`'s bundle is written.
    pub fn output_path(&self, module: &ModuleEntry) -> Result<PathBuf> {
        mirror_path(
            &self.build_root,
            &self.config.module_dir,
            &module.name,
            &self.config.module_entry,
        )
    }

    /// Build all modules one after another.
    ///
    /// A failing module is recorded in the report and the rest still build,
    /// unless `fail-fast` is set, in which case its error is returned.
    pub async fn build_all(&self) -> Result<BuildReport> {
        let start = Instant::now();
        let modules = self.discover()?;
        tracing::info!(count = modules.len(), root = %self.module_root.display(), "building modules");

        let mut report = BuildReport::default();
        for module in &modules {
            match self.build_module(module).await {
                Ok(built) => report.built.push(built),
                Err(error) if self.config.fail_fast => return Err(error),
                Err(error) => {
                    tracing::error!(module = %module.name, %error, "module build failed");
                    report.failures.push(ModuleFailure {
                        name: module.name.clone(),
                        error,
                    });
                }
            }
        }

        report.duration = start.elapsed();
        tracing::info!(
            built = report.built.len(),
            failed = report.failures.len(),
            duration_ms = report.duration.as_millis() as u64,
            "build finished"
        );
        Ok(report)
    }

    /// Bundle a single module and write its artifacts.
    pub async fn build_module(&self, module: &ModuleEntry) -> Result<BuiltModule> {
        let output_file = self.output_path(module)?;
        let generated_dir = output_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.build_root.clone());

        tracing::debug!(
            module = %module.name,
            entry = %module.entry.display(),
            output = %output_file.display(),
            "bundling module"
        );

        let plugin = ModuleBoundaryPlugin::new(ModuleBoundary::new(&self.module_root, &self.cwd));
        let externals = plugin.externals();
        let plugins: Vec<SharedPluginable> = vec![Arc::new(plugin)];

        let mut bundler = RolldownBundlerBuilder::default()
            .with_options(self.rolldown_options(module, &generated_dir))
            .with_plugins(plugins)
            .build()
            .map_err(|e| Error::from_rolldown_batch(&module.name, &e))?;

        let output = bundler
            .generate()
            .await
            .map_err(|e| Error::from_rolldown_batch(&module.name, &e))?;

        for warning in &output.warnings {
            tracing::warn!(module = %module.name, %warning, "bundler warning");
        }

        let artifact = BundleArtifact::from_output(&module.name, &output)?.relocate(
            &module.name,
            &generated_dir,
            &output_file,
        )?;
        let written = write_artifact(&self.build_root, &output_file, &artifact)?;

        let externals = std::mem::take(&mut *externals.lock());
        tracing::debug!(module = %module.name, externals = externals.len(), size = artifact.size(), "module written");

        Ok(BuiltModule {
            name: module.name.clone(),
            output: written.code,
            sourcemap: written.map,
            size: artifact.size(),
            externals,
        })
    }

    fn rolldown_options(&self, module: &ModuleEntry, generated_dir: &Path) -> BundlerOptions {
        BundlerOptions {
            input: Some(vec![InputItem {
                name: None,
                import: module.entry.to_string_lossy().into_owned(),
            }]),
            cwd: Some(self.cwd.clone()),
            dir: Some(generated_dir.to_string_lossy().into_owned()),
            format: Some(OutputFormat::Esm),
            sourcemap: self.config.sourcemap.then_some(SourceMapType::File),
            minify: self.config.minify.then(|| RawMinifyOptions::from(true)),
            inline_dynamic_imports: Some(true),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ModuleBuilder {
        ModuleBuilder::new(ModkitConfig::default(), "/project/./app")
    }

    #[test]
    fn roots_are_resolved_against_cwd() {
        let b = builder();
        assert_eq!(b.module_root(), Path::new("/project/app/modules"));
        assert_eq!(b.build_root(), Path::new("/project/app/build"));
    }

    #[test]
    fn output_path_mirrors_input() {
        let b = builder();
        let module = ModuleEntry {
            name: "a".into(),
            dir: PathBuf::from("/project/app/modules/a"),
            entry: PathBuf::from("/project/app/modules/a/lib.js"),
        };
        assert_eq!(
            b.output_path(&module).unwrap(),
            Path::new("/project/app/build/modules/a/lib.js")
        );
    }

    #[test]
    fn rolldown_options_follow_config() {
        let mut config = ModkitConfig::default();
        config.minify = false;
        config.sourcemap = false;
        let b = ModuleBuilder::new(config, "/p");
        let module = ModuleEntry {
            name: "a".into(),
            dir: PathBuf::from("/p/modules/a"),
            entry: PathBuf::from("/p/modules/a/lib.js"),
        };

        let options = b.rolldown_options(&module, Path::new("/p/build/modules/a"));
        assert!(options.minify.is_none());
        assert!(options.sourcemap.is_none());
        assert_eq!(options.dir.as_deref(), Some("/p/build/modules/a"));
        assert_eq!(options.input.unwrap()[0].import, "/p/modules/a/lib.js");
    }

    #[test]
    fn empty_report_is_successful() {
        let report = BuildReport::default();
        assert!(report.is_success());
        assert_eq!(report.total(), 0);
        assert_eq!(report.total_size(), 0);
    }
}
