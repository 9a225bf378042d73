//! `modkit build`.

use std::time::Instant;

use modkit_bundler::{ModkitConfig, ModuleBuilder};

use crate::cli::BuildArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};
use crate::ui;

/// Run a build.
///
/// 1. Resolve the project root and load configuration
/// 2. Clean the build directory when `--clean` is given
/// 3. Build every module, isolating failures unless `fail-fast` is set
/// 4. Print the report; fail when any module failed
pub async fn execute(args: BuildArgs) -> Result<()> {
    let start = Instant::now();
    let cwd = utils::resolve_cwd(args.cwd.as_deref())?;

    let config = ModkitConfig::load(&cwd, args.config.as_deref(), &args.overrides())?;
    tracing::debug!(?config, cwd = %cwd.display(), "resolved configuration");

    let builder = ModuleBuilder::new(config, &cwd);

    if args.clean {
        ui::info(&format!(
            "Cleaning {}",
            utils::display_relative(builder.build_root(), &cwd)
        ));
        utils::clean_build_dir(builder.build_root(), builder.module_root(), &cwd)?;
    }

    let mut report = builder.build_all().await?;
    report.duration = start.elapsed();

    if report.total() == 0 {
        ui::warning(&format!(
            "No modules found: no {} under {}",
            builder.config().module_entry,
            utils::display_relative(builder.module_root(), &cwd)
        ));
        return Ok(());
    }

    ui::print_build_report(&report, &cwd);

    if !report.is_success() {
        return Err(CliError::ModulesFailed {
            failed: report.failures.len(),
            total: report.total(),
        });
    }

    Ok(())
}
