//! Pattern rules evaluated against a scan target.
//!
//! A [`Rule`] pairs a regular expression with a context window and a
//! classifier. Every non-overlapping match is handed to the classifier
//! together with the surrounding text; the classifier decides whether the
//! match is a violation.

use regex::{Captures, Regex};

use crate::error::{Result, WcagGuardError};
use crate::source::ScanTarget;

use super::issue::{Issue, Severity};

/// How much surrounding text a classifier gets to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextWindow {
    /// Characters before the match start and after the match end.
    Chars { before: usize, after: usize },
    /// Whole lines before and after the matched line.
    Lines { before: usize, after: usize },
}

/// Outcome of classifying one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    /// Violation at the rule's own severity.
    Violation(String),
    /// Violation at an explicit severity.
    ViolationAt(Severity, String),
}

pub type Classifier = fn(&RuleMatch<'_>) -> Verdict;

/// A static rule definition.
pub struct Rule {
    pub id: &'static str,
    pub criterion: &'static str,
    pub severity: Severity,
    pattern: Regex,
    window: ContextWindow,
    classify: Classifier,
}

impl Rule {
    /// Compile a rule.
    ///
    /// # Errors
    /// Returns `InvalidRegex` if `pattern` does not compile.
    pub fn new(
        id: &'static str,
        criterion: &'static str,
        severity: Severity,
        pattern: &str,
        window: ContextWindow,
        classify: Classifier,
    ) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|source| WcagGuardError::InvalidRegex {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            id,
            criterion,
            severity,
            pattern,
            window,
            classify,
        })
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("criterion", &self.criterion)
            .field("severity", &self.severity)
            .field("pattern", &self.pattern.as_str())
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

/// One firing of a rule, with the context handed to its classifier.
pub struct RuleMatch<'a> {
    pub target: &'a ScanTarget,
    captures: Captures<'a>,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    /// Text inside the rule's context window.
    pub context: &'a str,
}

impl<'a> RuleMatch<'a> {
    fn new(target: &'a ScanTarget, captures: Captures<'a>, window: ContextWindow) -> Self {
        let whole = captures.get(0).map_or(0..0, |m| m.range());
        let line = target.line_of(whole.start);
        let context = window_text(target, whole.start, whole.end, line, window);
        Self {
            target,
            captures,
            start: whole.start,
            end: whole.end,
            line,
            context,
        }
    }

    /// The matched text.
    #[must_use]
    pub fn text(&self) -> &'a str {
        &self.target.content[self.start..self.end]
    }

    /// A capture group, if it participated in the match.
    #[must_use]
    pub fn group(&self, index: usize) -> Option<&'a str> {
        self.captures.get(index).map(|m| m.as_str())
    }

    /// Full file content.
    #[must_use]
    pub fn content(&self) -> &'a str {
        &self.target.content
    }
}

/// Largest char boundary at or below `idx`.
pub(crate) fn floor_boundary(s: &str, mut idx: usize) -> usize {
    idx = idx.min(s.len());
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// Smallest char boundary at or above `idx`, clamped to the end.
pub(crate) fn ceil_boundary(s: &str, mut idx: usize) -> usize {
    idx = idx.min(s.len());
    while !s.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

fn window_text(
    target: &ScanTarget,
    start: usize,
    end: usize,
    line: usize,
    window: ContextWindow,
) -> &str {
    let content = target.content.as_str();
    let (from, to) = match window {
        ContextWindow::Chars { before, after } => (
            floor_boundary(content, start.saturating_sub(before)),
            ceil_boundary(content, end.saturating_add(after)),
        ),
        ContextWindow::Lines { before, after } => {
            let first = line.saturating_sub(before).max(1);
            let last = line + after;
            let to = if last >= target.lines().line_count() {
                content.len()
            } else {
                target.lines().line_start(last + 1)
            };
            (target.lines().line_start(first), to)
        }
    };
    &content[from..to]
}

/// Evaluate `rules` against `target`, returning issues in line order with
/// rule id as tie-break.
#[must_use]
pub fn evaluate(target: &ScanTarget, rules: &[Rule]) -> Vec<Issue> {
    let mut issues = Vec::new();
    for rule in rules {
        for captures in rule.pattern.captures_iter(&target.content) {
            let found = RuleMatch::new(target, captures, rule.window);
            let (severity, message) = match (rule.classify)(&found) {
                Verdict::Pass => continue,
                Verdict::Violation(message) => (rule.severity, message),
                Verdict::ViolationAt(severity, message) => (severity, message),
            };
            issues.push(
                Issue::new(rule.id, rule.criterion, severity, &target.relative, message)
                    .with_line(found.line)
                    .with_snippet(target.line_text(found.line)),
            );
        }
    }
    tracing::trace!(file = %target.relative, issues = issues.len(), "rules evaluated");
    issues.sort_by(|a, b| a.line.cmp(&b.line).then_with(|| a.rule_id.cmp(b.rule_id)));
    issues
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
