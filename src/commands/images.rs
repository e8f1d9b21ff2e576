use std::path::Path;

use crate::Result;
use crate::checker::Report;
use crate::cli::{Cli, ReportArgs};
use crate::config::ImagesConfig;
use crate::images::check_images;

use super::context::{emit_report, ensure_root, load_config, report_failure};

pub const IMAGES_TITLE: &str = "Image Optimization";

#[must_use]
pub fn run_images(args: &ReportArgs, cli: &Cli) -> i32 {
    match run_images_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => report_failure(&e),
    }
}

/// Check static images against the configured format and size budget.
///
/// # Errors
/// Returns an error if the configuration is invalid or a directory walk
/// cannot be set up.
pub fn run_images_impl(args: &ReportArgs, cli: &Cli) -> Result<i32> {
    ensure_root(&cli.root)?;
    let config = load_config(&cli.root, cli.config.as_deref(), cli.no_config)?;
    let report = images_report(&cli.root, &config.images)?;
    emit_report(&report, args, cli)
}

/// # Errors
/// Returns an error if a directory walk cannot be set up.
pub fn images_report(root: &Path, config: &ImagesConfig) -> Result<Report> {
    let scan = check_images(root, config)?;
    let mut report = Report::new(IMAGES_TITLE, "images");
    report.add_checked(scan.checked);
    report.extend(scan.issues);
    Ok(report)
}

#[cfg(test)]
#[path = "images_tests.rs"]
mod tests;
