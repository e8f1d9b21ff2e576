use std::io::Write;

use crate::checker::{Issue, Report, Severity};
use crate::error::Result;

use super::{ColorMode, OutputFormatter, ansi};

pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            verbose,
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                // Respect NO_COLOR environment variable
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    const fn status_icon(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => "✗",
            Severity::Warning => "⚠",
        }
    }

    const fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => ansi::RED,
            Severity::Warning => ansi::YELLOW,
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    fn format_issue(&self, issue: &Issue, output: &mut Vec<u8>) {
        let icon = self.colorize(
            Self::status_icon(issue.severity),
            Self::severity_color(issue.severity),
        );
        if self.verbose >= 1 {
            writeln!(
                output,
                "  {icon} {}: {} [{}]",
                issue.location(),
                issue.message,
                issue.rule_id
            )
            .ok();
        } else {
            writeln!(output, "  {icon} {}: {}", issue.location(), issue.message).ok();
        }
        if let Some(snippet) = &issue.snippet {
            writeln!(output, "      {}", self.colorize(snippet, ansi::DIM)).ok();
        }
    }

    fn format_summary(&self, report: &Report) -> String {
        let errors = self.colorize(&report.error_count().to_string(), ansi::RED);
        let warnings = self.colorize(&report.warning_count().to_string(), ansi::YELLOW);
        format!(
            "Summary: {} {} checked, {errors} errors, {warnings} warnings",
            report.checked(),
            report.unit()
        )
    }

    fn format_banner(&self, report: &Report) -> String {
        if report.has_blocking() {
            let count = report.error_count();
            self.colorize(
                &format!("✗ FAIL: {count} blocking issue(s) found"),
                ansi::RED,
            )
        } else {
            self.colorize("✓ PASS: no blocking issues", ansi::GREEN)
        }
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let mut output = Vec::new();

        writeln!(output, "{}", self.colorize(report.title(), ansi::BOLD)).ok();
        writeln!(output).ok();

        for (criterion, issues) in report.groups() {
            let heading = format!("{criterion} ({})", issues.len());
            writeln!(output, "{}", self.colorize(&heading, ansi::CYAN)).ok();
            for issue in issues {
                self.format_issue(issue, &mut output);
            }
            writeln!(output).ok();
        }

        for note in report.notes() {
            writeln!(output, "{note}").ok();
        }
        if !report.notes().is_empty() {
            writeln!(output).ok();
        }

        writeln!(output, "{}", self.format_summary(report)).ok();
        writeln!(output, "{}", self.format_banner(report)).ok();

        Ok(String::from_utf8_lossy(&output).to_string())
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
