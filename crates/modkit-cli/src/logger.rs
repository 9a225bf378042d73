//! Tracing subscriber for the CLI.
//!
//! Filter precedence: `--verbose` (debug for modkit crates), `--quiet`
//! (errors only), `RUST_LOG`, then info for modkit crates.

use modkit_bundler::LogLevel;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Level forced by the command-line flags, if any.
pub fn level_for(verbose: bool, quiet: bool) -> Option<LogLevel> {
    if verbose {
        Some(LogLevel::Debug)
    } else if quiet {
        Some(LogLevel::Error)
    } else {
        None
    }
}

/// Filter directives for the given flags.
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    match level_for(verbose, quiet) {
        Some(level) => EnvFilter::new(level.directives()),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(LogLevel::default().directives())),
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(fmt_layer)
        .try_init();
}
