use ::miette::Report;

use crate::error::CliError;

/// Convert a CLI error into a miette report.
///
/// Bundler errors carry their own diagnostic codes and help text.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Build(e) => Report::new(e),
        CliError::Config(e) => ::miette::miette!(
            help = "Check modkit.toml, the \"modkit\" field of package.json and MODKIT_* variables",
            "{}",
            CliError::Config(e)
        ),
        CliError::ModulesFailed { .. } => ::miette::miette!(
            help = "Errors for each module are listed above. Re-run with --verbose for details",
            "{}",
            err
        ),
        CliError::UnsafeClean { .. } => ::miette::miette!(
            help = "Point --build-dir at a directory that only holds build output",
            "{}",
            err
        ),
        other => ::miette::miette!("{}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_errors_keep_their_code() {
        let report = cli_error_to_miette(CliError::Build(
            modkit_bundler::Error::WriteFailure("disk full".into()),
        ));
        let code = report.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("modkit::write_failure"));
    }

    #[test]
    fn module_failures_have_help() {
        let report = cli_error_to_miette(CliError::ModulesFailed { failed: 2, total: 2 });
        assert!(report.help().is_some());
        assert_eq!(report.to_string(), "2 of 2 modules failed to build");
    }
}
