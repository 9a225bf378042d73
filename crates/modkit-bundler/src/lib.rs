#![cfg_attr(docsrs, feature(doc_cfg))]

//! # modkit-bundler
//!
//! Builds every module under a module root into its own minified ESM bundle
//! with a sibling source map.
//!
//! A module is a directory `<module-dir>/<name>/` that contains the configured
//! entry file. While a module is bundled, imports that stay inside it are
//! inlined; imports into a sibling module, out of the module root, or to an
//! `http(s)://` URL are left as live imports.
//!
//! ```no_run
//! use modkit_bundler::{ModkitConfig, ModuleBuilder};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let builder = ModuleBuilder::new(ModkitConfig::default(), std::env::current_dir()?);
//! let report = builder.build_all().await?;
//! for module in &report.built {
//!     println!("{} -> {}", module.name, module.output.display());
//! }
//! # Ok(()) }
//! ```

pub mod boundary;
pub mod builder;
pub mod diagnostics;
pub mod discovery;
pub mod output;
pub mod plugin;

// Logging utilities (optional, enabled with "logging" feature)
#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub mod logging;

#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub use logging::{LogLevel, init_logging, init_logging_from_env};

pub use boundary::{ImportClass, ModuleBoundary, is_network_specifier};
pub use builder::{BuildReport, BuiltModule, ModuleBuilder, ModuleFailure};
pub use diagnostics::{BuildDiagnostic, DiagnosticKind};
pub use discovery::{ModuleEntry, discover_modules};
pub use modkit_config::{ConfigError, ModkitConfig};
pub use plugin::{ExternalImport, ModuleBoundaryPlugin};

use diagnostics::extract_from_rolldown_error;
use rolldown_error::BuildDiagnostic as RolldownDiagnostic;

/// Error types for module builds.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An import inside the module could not be found.
    #[error("{module}: cannot resolve '{specifier}'")]
    Resolution {
        module: String,
        specifier: String,
        diagnostics: Vec<BuildDiagnostic>,
    },

    /// A source file in the module failed to parse.
    #[error("{module}: {}", format_diagnostics(.diagnostics))]
    Syntax {
        module: String,
        diagnostics: Vec<BuildDiagnostic>,
    },

    /// Any other Rolldown failure.
    #[error("{module}: {}", format_diagnostics(.diagnostics))]
    Bundler {
        module: String,
        diagnostics: Vec<BuildDiagnostic>,
    },

    /// Rolldown finished without producing an entry chunk.
    #[error("{module}: bundler produced no entry chunk")]
    MissingOutput { module: String },

    /// The source map emitted by Rolldown could not be rewritten.
    #[error("invalid source map for {module}: {source}")]
    SourceMap {
        module: String,
        #[source]
        source: serde_json::Error,
    },

    /// Output path would leave the build root.
    #[error("Invalid output path: {0}")]
    InvalidOutputPath(String),

    /// File write operation failed.
    #[error("Write failure: {0}")]
    WriteFailure(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a module error from a batch of Rolldown diagnostics.
    ///
    /// Resolution problems win over syntax problems when both are reported.
    pub fn from_rolldown_batch(module: &str, errors: &[RolldownDiagnostic]) -> Self {
        let diagnostics = extract_from_rolldown_error(errors);
        let module = module.to_string();

        if let Some(diag) = diagnostics
            .iter()
            .find(|d| d.kind == DiagnosticKind::Resolution)
        {
            let specifier = diag
                .specifier
                .clone()
                .unwrap_or_else(|| "<unknown>".to_string());
            return Error::Resolution {
                module,
                specifier,
                diagnostics,
            };
        }

        if diagnostics.iter().any(|d| d.kind == DiagnosticKind::Syntax) {
            return Error::Syntax {
                module,
                diagnostics,
            };
        }

        Error::Bundler {
            module,
            diagnostics,
        }
    }

    /// Module the error belongs to, if any.
    pub fn module(&self) -> Option<&str> {
        match self {
            Error::Resolution { module, .. }
            | Error::Syntax { module, .. }
            | Error::Bundler { module, .. }
            | Error::MissingOutput { module }
            | Error::SourceMap { module, .. } => Some(module),
            _ => None,
        }
    }
}

fn format_diagnostics(diagnostics: &[BuildDiagnostic]) -> String {
    match diagnostics {
        [] => "unknown bundler error".to_string(),
        [diag] => format!("{}: {}", diag.kind, diag.message),
        many => format!(
            "{} errors: {}",
            many.len(),
            many.iter()
                .map(|d| format!("{}: {}", d.kind, d.message))
                .collect::<Vec<_>>()
                .join("; ")
        ),
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::Resolution { .. } => "modkit::resolution",
            Error::Syntax { .. } => "modkit::syntax",
            Error::Bundler { .. } => "modkit::bundler",
            Error::MissingOutput { .. } => "modkit::missing_output",
            Error::SourceMap { .. } => "modkit::sourcemap",
            Error::InvalidOutputPath(_) => "modkit::invalid_output_path",
            Error::WriteFailure(_) => "modkit::write_failure",
            Error::Io(_) => "modkit::io",
            Error::Config(_) => "modkit::config",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::Resolution { specifier, diagnostics, .. } => {
                let from = diagnostics
                    .iter()
                    .find_map(|d| d.file.as_deref())
                    .map(|file| format!(" (imported from {file})"))
                    .unwrap_or_default();
                Some(Box::new(format!(
                    "'{specifier}'{from} stays inside its module, so it must exist on disk.\n\
                     Imports of sibling modules are left external and never need to resolve."
                )))
            }
            Error::Syntax { diagnostics, .. } => diagnostics
                .iter()
                .find_map(|d| d.file.as_deref())
                .map(|file| Box::new(format!("Fix the syntax error in {file}")) as Box<dyn std::fmt::Display>),
            Error::InvalidOutputPath(path) => Some(Box::new(format!(
                "The output path '{path}' is outside the build directory. Check module-dir and build-dir."
            ))),
            Error::WriteFailure(_) => Some(Box::new(
                "Failed to write file. Check disk space and permissions.",
            )),
            Error::Config(_) => Some(Box::new(
                "Check modkit.toml, the \"modkit\" field of package.json and MODKIT_* variables.",
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rolldown_error::{DiagnosableArcstr, EventKind};

    use super::*;

    fn missing_import(specifier: &str) -> RolldownDiagnostic {
        RolldownDiagnostic::resolve_error(
            format!("import {{ n }} from '{specifier}';").into(),
            "/p/modules/a/lib.js".into(),
            DiagnosableArcstr::String(specifier.into()),
            "Module not found.".into(),
            EventKind::UnresolvedImport,
            None,
        )
    }

    fn parse_failure() -> RolldownDiagnostic {
        RolldownDiagnostic::oxc_parse_error(
            "export const = ;".into(),
            "/p/modules/b/lib.js".into(),
            String::new(),
            "Unexpected token".into(),
            vec![],
        )
    }

    #[test]
    fn resolution_errors_carry_the_specifier() {
        let err = Error::from_rolldown_batch("a", &[missing_import("./missing.js")]);
        match &err {
            Error::Resolution { module, specifier, .. } => {
                assert_eq!(module, "a");
                assert_eq!(specifier, "./missing.js");
            }
            other => panic!("expected resolution error, got {other:?}"),
        }
        assert_eq!(err.module(), Some("a"));
        assert!(err.to_string().contains("./missing.js"));
    }

    #[test]
    fn syntax_errors_are_classified() {
        let err = Error::from_rolldown_batch("b", &[parse_failure()]);
        assert!(matches!(err, Error::Syntax { .. }));

        use miette::Diagnostic;
        let help = err.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("/p/modules/b/lib.js"));
    }

    #[test]
    fn resolution_wins_over_syntax() {
        let err = Error::from_rolldown_batch("a", &[parse_failure(), missing_import("./gone.js")]);
        match err {
            Error::Resolution { specifier, diagnostics, .. } => {
                assert_eq!(specifier, "./gone.js");
                assert_eq!(diagnostics.len(), 2);
            }
            other => panic!("expected resolution error, got {other:?}"),
        }
    }

    #[test]
    fn other_errors_fall_back_to_bundler() {
        let err = Error::from_rolldown_batch(
            "c",
            &[RolldownDiagnostic::invalid_define_config("bad define".into())],
        );
        assert!(matches!(err, Error::Bundler { .. }));
        assert!(err.to_string().starts_with("c: bundler error"));
    }

    #[test]
    fn miette_codes_are_stable() {
        use miette::Diagnostic;
        let err = Error::InvalidOutputPath("x".into());
        assert_eq!(
            err.code().map(|c| c.to_string()).as_deref(),
            Some("modkit::invalid_output_path")
        );
        assert!(err.help().is_some());
    }
}
