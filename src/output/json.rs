use serde::Serialize;

use crate::checker::{Issue, Report};
use crate::error::Result;

use super::OutputFormatter;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    title: &'a str,
    summary: Summary,
    issues: Vec<&'a Issue>,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    notes: &'a [String],
}

#[derive(Serialize)]
struct Summary {
    checked: usize,
    unit: &'static str,
    errors: usize,
    warnings: usize,
    passed: bool,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let output = JsonOutput {
            title: report.title(),
            summary: Summary {
                checked: report.checked(),
                unit: report.unit(),
                errors: report.error_count(),
                warnings: report.warning_count(),
                passed: !report.has_blocking(),
            },
            issues: report.sorted_issues(),
            notes: report.notes(),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
