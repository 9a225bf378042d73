//! Size and duration formatting, and the end-of-build report.

use std::path::Path;
use std::time::Duration;

use modkit_bundler::BuildReport;
use owo_colors::OwoColorize;

use super::{colors_enabled, messages};

/// Human-readable byte count.
///
/// ```
/// use modkit_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(1536), "1.50 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.2} {}", UNITS[unit])
    }
}

/// Human-readable duration: `ms` below a second, then seconds, then `m s`.
pub fn format_duration(duration: Duration) -> String {
    let ms = duration.as_millis();
    if ms < 1000 {
        format!("{ms}ms")
    } else if ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// One line per built module, one error per failed module, then a total.
///
/// Paths are shown relative to `cwd` when possible.
pub fn print_build_report(report: &BuildReport, cwd: &Path) {
    for module in &report.built {
        let output = module.output.strip_prefix(cwd).unwrap_or(&module.output);
        let externals = match module.externals.len() {
            0 => String::new(),
            1 => " (1 external import)".to_string(),
            n => format!(" ({n} external imports)"),
        };

        if colors_enabled() {
            eprintln!(
                "  {} {} {} {}{}",
                "▸".blue(),
                module.name.bold(),
                output.display().dimmed(),
                format_size(module.size).dimmed(),
                externals.dimmed()
            );
        } else {
            eprintln!(
                "  ▸ {} {} {}{}",
                module.name,
                output.display(),
                format_size(module.size),
                externals
            );
        }
    }

    for failure in &report.failures {
        // Module-scoped errors already lead with the module name.
        let line = match failure.error.module() {
            Some(_) => failure.error.to_string(),
            None => format!("{}: {}", failure.name, failure.error),
        };
        messages::error(&line);
    }

    let summary = format!(
        "Built {} of {} modules ({}) in {}",
        report.built.len(),
        report.total(),
        format_size(report.total_size()),
        format_duration(report.duration)
    );
    if report.is_success() {
        messages::success(&summary);
    } else {
        messages::warning(&summary);
    }
}
