use std::path::PathBuf;

use clap::{Args, Subcommand};
use modkit_config::ConfigOverrides;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Bundle every module into the build directory
    ///
    /// Output mirrors the input layout:
    /// <build-dir>/<module-dir>/<name>/<module-entry> plus a `.map` file.
    Build(BuildArgs),
}

/// Arguments for `modkit build`.
///
/// Flags left unset fall through to `MODKIT_*` variables, the config file and
/// the defaults, in that order.
#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Directory whose subdirectories are modules [default: modules]
    #[arg(short = 'd', long, value_name = "DIR")]
    pub module_dir: Option<PathBuf>,

    /// Output root [default: build]
    #[arg(short = 'b', long, value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// Entry filename inside each module [default: lib.js]
    #[arg(short = 'm', long, value_name = "FILE")]
    pub module_entry: Option<String>,

    /// Config file (modkit.toml or package.json), relative to --cwd
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Project root; defaults to the current directory
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Emit readable, unminified bundles
    #[arg(long)]
    pub no_minify: bool,

    /// Do not write source maps
    #[arg(long)]
    pub no_sourcemap: bool,

    /// Stop at the first module that fails
    #[arg(long)]
    pub fail_fast: bool,

    /// Empty the build directory first
    #[arg(long)]
    pub clean: bool,
}

impl BuildArgs {
    /// Config layer holding only the flags that were given.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            module_dir: self.module_dir.clone(),
            build_dir: self.build_dir.clone(),
            module_entry: self.module_entry.clone(),
            minify: self.no_minify.then_some(false),
            sourcemap: self.no_sourcemap.then_some(false),
            fail_fast: self.fail_fast.then_some(true),
        }
    }
}
