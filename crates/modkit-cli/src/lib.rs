//! Command-line interface for modkit.
//!
//! - [`cli`] - argument definitions
//! - [`commands`] - command implementations
//! - [`error`] - CLI error type and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status lines and the build report

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
