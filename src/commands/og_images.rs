use std::path::Path;

use crate::Result;
use crate::checker::Report;
use crate::cli::{Cli, ReportArgs};
use crate::config::OgImagesConfig;
use crate::images::human_size;
use crate::og_images::check_og_images;

use super::context::{emit_report, ensure_root, load_config, report_failure};

pub const OG_IMAGES_TITLE: &str = "Open Graph Images";

#[must_use]
pub fn run_og_images(args: &ReportArgs, cli: &Cli) -> i32 {
    match run_og_images_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => report_failure(&e),
    }
}

/// Check generated social preview images for dimensions and weight.
///
/// # Errors
/// Returns an error if the configuration is invalid or the preview image
/// directory does not exist.
pub fn run_og_images_impl(args: &ReportArgs, cli: &Cli) -> Result<i32> {
    ensure_root(&cli.root)?;
    let config = load_config(&cli.root, cli.config.as_deref(), cli.no_config)?;
    let report = og_images_report(&cli.root, &config.og_images)?;
    emit_report(&report, args, cli)
}

/// # Errors
/// Returns `MissingAssetDir` when the preview image directory is absent.
pub fn og_images_report(root: &Path, config: &OgImagesConfig) -> Result<Report> {
    let scan = check_og_images(root, config)?;
    let mut report = Report::new(OG_IMAGES_TITLE, "images");
    report.add_checked(scan.checked);
    if scan.checked > 0 {
        report.note(format!("Total size: {}", human_size(scan.total_bytes)));
    }
    report.extend(scan.issues);
    Ok(report)
}

#[cfg(test)]
#[path = "og_images_tests.rs"]
mod tests;
