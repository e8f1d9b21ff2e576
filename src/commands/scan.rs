//! Runner shared by every source-tree command.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::{Result, WcagGuardError};
use crate::checker::{Checker, Issue, Report, Severity};
use crate::cli::{Cli, SourceArgs};
use crate::output::{ScanProgress, print_warning_full};
use crate::rules::{Family, build_checkers};
use crate::scanner::collect_files;
use crate::source::{ScanTarget, relative_display};

use super::context::{emit_report, ensure_root, load_config, report_failure};

/// Report title when more than one family runs.
pub const SOURCE_TITLE: &str = "WCAG 2.1 Source Audit";

/// Criterion grouping files that could not be inspected.
pub const READ_ERROR_CRITERION: &str = "File Access";

#[must_use]
pub fn run_source(args: &SourceArgs, cli: &Cli, families: &[Family]) -> i32 {
    match run_source_impl(args, cli, families) {
        Ok(exit_code) => exit_code,
        Err(e) => report_failure(&e),
    }
}

/// Scan the source tree with `families` and emit the report.
///
/// # Errors
/// Returns an error if the configuration, a rule pattern or an include
/// glob is invalid, or the report cannot be written.
pub fn run_source_impl(args: &SourceArgs, cli: &Cli, families: &[Family]) -> Result<i32> {
    // 1. Load configuration
    ensure_root(&cli.root)?;
    let config = load_config(&cli.root, cli.config.as_deref(), cli.no_config)?;

    // 2. Compile rule families
    let checkers = build_checkers(families, &config)?;

    // 3. Collect source files
    let use_gitignore = config.scanner.gitignore || args.gitignore;
    let files = collect_files(
        &cli.root,
        &config.scanner.include,
        &config.scanner.exclude_dirs,
        use_gitignore,
    )?;

    // 4. Check files (parallel with rayon)
    let progress = ScanProgress::new(files.len() as u64, cli.quiet);
    let report = scan_sources(&cli.root, &files, &checkers, &progress);
    progress.finish();

    // 5. Output
    emit_report(&report, &args.report, cli)
}

/// Title for a run of `checkers`.
#[must_use]
pub fn report_title(checkers: &[Box<dyn Checker>]) -> &'static str {
    match checkers {
        [single] => single.title(),
        _ => SOURCE_TITLE,
    }
}

/// Check every file with every checker. Unreadable files become a
/// `read-error` warning and the scan carries on.
#[must_use]
pub fn scan_sources(
    root: &Path,
    files: &[PathBuf],
    checkers: &[Box<dyn Checker>],
    progress: &ScanProgress,
) -> Report {
    let per_file: Vec<Vec<Issue>> = files
        .par_iter()
        .map(|path| {
            let issues = check_file(root, path, checkers);
            progress.inc();
            issues
        })
        .collect();

    let mut report = Report::new(report_title(checkers), "files");
    report.add_checked(files.len());
    report.extend(per_file.into_iter().flatten());
    report
}

fn check_file(root: &Path, path: &Path, checkers: &[Box<dyn Checker>]) -> Vec<Issue> {
    match ScanTarget::load(root, path) {
        Ok(target) => checkers
            .iter()
            .filter(|checker| checker.accepts(target.kind))
            .flat_map(|checker| checker.check(&target))
            .collect(),
        Err(e) => vec![read_error_issue(relative_display(root, path), &e)],
    }
}

/// Warn about a file that could not be read and record it as a
/// `read-error` warning.
pub(crate) fn read_error_issue(relative: String, error: &WcagGuardError) -> Issue {
    let detail = error.detail();
    tracing::warn!(path = %relative, error = %error, "skipping unreadable file");
    print_warning_full(&error.message(), detail.as_deref(), None);
    Issue::new(
        "read-error",
        READ_ERROR_CRITERION,
        Severity::Warning,
        relative,
        format!(
            "File could not be read: {}",
            detail.unwrap_or_else(|| error.to_string())
        ),
    )
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
