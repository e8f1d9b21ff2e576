use std::fs;
use std::path::{Path, PathBuf};

use crate::checker::Report;
use crate::cli::{Cli, ColorChoice, ReportArgs};
use crate::config::{Config, ConfigLoader, FileConfigLoader};
use crate::output::{ColorMode, format_report, print_error_full};
use crate::{EXIT_PRECONDITION_FAILED, Result, WcagGuardError};

#[must_use]
pub(crate) const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

/// Load configuration for a run.
///
/// `--no-config` wins over everything, then an explicit `--config` path,
/// then `.wcag-guard.toml` under the project root.
///
/// # Errors
/// Returns an error if the configuration file cannot be read, parsed or
/// validated.
pub(crate) fn load_config(
    root: &Path,
    config_path: Option<&Path>,
    no_config: bool,
) -> Result<Config> {
    if no_config {
        tracing::debug!("--no-config given, using defaults");
        return Ok(Config::default());
    }
    let loader = FileConfigLoader::new();
    match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            loader.load_from_path(path)
        }
        None => loader.load(root),
    }
}

/// Resolve a configured path against the project root.
#[must_use]
pub(crate) fn resolve_path(root: &Path, configured: &Path) -> PathBuf {
    if configured.is_absolute() {
        configured.to_path_buf()
    } else {
        root.join(configured)
    }
}

/// Fail early when the project root is not a directory.
///
/// # Errors
/// Returns a `Config` error naming the missing root.
pub(crate) fn ensure_root(root: &Path) -> Result<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(WcagGuardError::Config(format!(
            "Project root is not a directory: {}",
            root.display()
        )))
    }
}

/// Write `content` to `output_path`, or to stdout when no path is given.
///
/// # Errors
/// Returns an error if the file or its parent directories cannot be created.
pub(crate) fn write_output(output_path: Option<&Path>, content: &str, quiet: bool) -> Result<()> {
    if let Some(path) = output_path {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        if !quiet {
            eprintln!("Report written to {}", path.display());
        }
    } else {
        print!("{content}");
    }
    Ok(())
}

/// Render `report` as requested and return its exit code.
///
/// # Errors
/// Returns an error if formatting or writing fails.
pub(crate) fn emit_report(report: &Report, args: &ReportArgs, cli: &Cli) -> Result<i32> {
    let content = format_report(
        report,
        args.format,
        color_choice_to_mode(cli.color),
        cli.verbose,
    )?;
    write_output(args.output.as_deref(), &content, cli.quiet)?;
    Ok(report.exit_code())
}

/// Print a failed precondition once and map it to its exit code.
pub(crate) fn report_failure(error: &WcagGuardError) -> i32 {
    tracing::debug!(error = ?error, "command failed");
    print_error_full(
        error.error_type(),
        &error.message(),
        error.detail().as_deref(),
        error.suggestion(),
    );
    EXIT_PRECONDITION_FAILED
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
