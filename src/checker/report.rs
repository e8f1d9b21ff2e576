use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::{EXIT_SUCCESS, EXIT_VIOLATIONS_FOUND};

use super::issue::{Issue, Severity};

/// Aggregated outcome of one run.
///
/// Issues are append-only; every view sorts them so output never depends on
/// the order in which files were processed.
#[derive(Debug, Clone)]
pub struct Report {
    title: String,
    unit: &'static str,
    checked: usize,
    issues: Vec<Issue>,
    notes: Vec<String>,
}

impl Report {
    /// `unit` names what was checked ("files", "pages", ...).
    #[must_use]
    pub fn new(title: impl Into<String>, unit: &'static str) -> Self {
        Self {
            title: title.into(),
            unit,
            checked: 0,
            issues: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub const fn add_checked(&mut self, count: usize) {
        self.checked += count;
    }

    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.issues.extend(issues);
    }

    /// Attach a free-form line shown after the issue list.
    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn unit(&self) -> &'static str {
        self.unit
    }

    #[must_use]
    pub const fn checked(&self) -> usize {
        self.checked
    }

    #[must_use]
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// All issues ordered by criterion, source, line, rule id and message.
    #[must_use]
    pub fn sorted_issues(&self) -> Vec<&Issue> {
        let mut sorted: Vec<&Issue> = self.issues.iter().collect();
        sorted.sort_by(|a, b| compare(a, b));
        sorted
    }

    /// Issues grouped by criterion, groups and members in sorted order.
    #[must_use]
    pub fn groups(&self) -> IndexMap<&'static str, Vec<&Issue>> {
        let mut groups: IndexMap<&'static str, Vec<&Issue>> = IndexMap::new();
        for issue in self.sorted_issues() {
            groups.entry(issue.criterion).or_default().push(issue);
        }
        groups
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    #[must_use]
    pub fn has_blocking(&self) -> bool {
        self.issues.iter().any(|i| i.severity.is_blocking())
    }

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.has_blocking() {
            EXIT_VIOLATIONS_FOUND
        } else {
            EXIT_SUCCESS
        }
    }
}

fn compare(a: &Issue, b: &Issue) -> Ordering {
    a.criterion
        .cmp(b.criterion)
        .then_with(|| a.source.cmp(&b.source))
        .then_with(|| a.line.cmp(&b.line))
        .then_with(|| a.rule_id.cmp(b.rule_id))
        .then_with(|| a.message.cmp(&b.message))
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
