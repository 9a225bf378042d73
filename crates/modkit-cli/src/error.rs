//! CLI error type.
//!
//! Library errors convert in via `#[from]`; [`cli_error_to_miette`] turns the
//! result into a rendered diagnostic at the top of `main`.

mod miette;

use std::path::PathBuf;

use thiserror::Error;

pub use self::miette::cli_error_to_miette;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] modkit_config::ConfigError),

    #[error(transparent)]
    Build(#[from] modkit_bundler::Error),

    /// Some modules failed while the rest were built.
    #[error("{failed} of {total} modules failed to build")]
    ModulesFailed { failed: usize, total: usize },

    /// `--clean` would delete something it must not.
    #[error("Refusing to clean {}: {reason}", .path.display())]
    UnsafeClean { path: PathBuf, reason: String },

    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modules_failed_message() {
        let err = CliError::ModulesFailed { failed: 1, total: 3 };
        assert_eq!(err.to_string(), "1 of 3 modules failed to build");
    }

    #[test]
    fn config_errors_convert() {
        let err: CliError = modkit_config::ConfigError::NotFound("x.toml".into()).into();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("x.toml"));
    }

    #[test]
    fn bundler_errors_are_transparent() {
        let err: CliError = modkit_bundler::Error::InvalidOutputPath("../x".into()).into();
        assert_eq!(err.to_string(), "Invalid output path: ../x");
    }

    #[test]
    fn unsafe_clean_names_the_path() {
        let err = CliError::UnsafeClean {
            path: PathBuf::from("/p"),
            reason: "it contains the project".into(),
        };
        assert!(err.to_string().contains("/p"));
    }
}
