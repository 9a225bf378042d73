//! Command-line interface definition.
//!
//! - `modkit build` - bundle every module under the module directory

mod commands;

use clap::Parser;

pub use commands::{BuildArgs, Command};

/// modkit - per-module ESM bundles with source maps
#[derive(Parser, Debug)]
#[command(
    name = "modkit",
    version,
    about = "Build every module of a project into its own minified ESM bundle",
    long_about = "modkit treats each directory under the module directory as a module.\n\
                  Every module is bundled on its own: imports inside the module are inlined,\n\
                  imports of sibling modules and http(s) URLs stay as imports."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}
