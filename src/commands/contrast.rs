use crate::Result;
use crate::checker::{Issue, Report, Severity};
use crate::cli::{Cli, ReportArgs};
use crate::config::ContrastConfig;
use crate::contrast::{ContrastOutcome, evaluate_cases};

use super::context::{emit_report, load_config, report_failure};

pub const CONTRAST_CRITERION: &str = "SC 1.4.3";
pub const CONTRAST_TITLE: &str = "WCAG 2.1 SC 1.4.3 - Contrast (Minimum)";

#[must_use]
pub fn run_contrast(args: &ReportArgs, cli: &Cli) -> i32 {
    match run_contrast_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => report_failure(&e),
    }
}

/// Evaluate the configured palette cases and emit the report.
///
/// # Errors
/// Returns an error if the configuration is invalid or a case names an
/// unknown color.
pub fn run_contrast_impl(args: &ReportArgs, cli: &Cli) -> Result<i32> {
    let config = load_config(&cli.root, cli.config.as_deref(), cli.no_config)?;
    let report = contrast_report(&config.contrast, cli.verbose > 0)?;
    emit_report(&report, args, cli)
}

/// Build the contrast report. Failing cases are issues; with `show_all`
/// every case is also listed as a note in case order.
///
/// # Errors
/// Returns `UnknownColor` or `InvalidColor` for an unresolvable color.
pub fn contrast_report(config: &ContrastConfig, show_all: bool) -> Result<Report> {
    let outcomes = evaluate_cases(&config.palette, &config.cases)?;

    let mut report = Report::new(CONTRAST_TITLE, "color pairs");
    report.add_checked(outcomes.len());
    for outcome in &outcomes {
        if show_all {
            report.note(outcome_line(outcome));
        }
        if !outcome.passed {
            report.push(Issue::new(
                "contrast-minimum",
                CONTRAST_CRITERION,
                Severity::Error,
                outcome.name.as_str(),
                format!(
                    "{} on {} is {:.2}:1, needs {}:1{}",
                    outcome.foreground,
                    outcome.background,
                    outcome.ratio,
                    outcome.required,
                    if outcome.large_text { " (large text)" } else { "" }
                ),
            ));
        }
    }
    Ok(report)
}

/// One table row: name, ratio, requirement and status.
#[must_use]
pub fn outcome_line(outcome: &ContrastOutcome) -> String {
    format!(
        "{:<28} {:>6.2}:1  (needs {}:1)  {}",
        outcome.name,
        outcome.ratio,
        outcome.required,
        if outcome.passed { "PASS" } else { "FAIL" }
    )
}

#[cfg(test)]
#[path = "contrast_tests.rs"]
mod tests;
