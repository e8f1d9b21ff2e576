//! Guideline 3.2 (Predictable): context changes on focus or input,
//! navigation that bypasses the shared layout, and changes the user did
//! not ask for.

use std::sync::LazyLock;

use regex::Regex;

use crate::checker::{
    Checker, ContextWindow, Issue, Rule, RuleMatch, Severity, Verdict, evaluate,
};
use crate::error::Result;
use crate::source::{FileKind, ScanTarget};

use super::semantic::is_page;

const SAME_LINE: ContextWindow = ContextWindow::Chars {
    before: 0,
    after: 0,
};

/// Wording that tells users a form submits by itself.
static AUTO_SUBMIT_NOTICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)will\s+automatically|auto[\s-]?submit|automatically\s+submit|form\s+will\s+submit")
        .expect("Invalid regex")
});
static CUSTOM_NAV: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<nav[\s>]").expect("Invalid regex"));
static SHARED_NAV: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(?:Layout|Navigation)\b").expect("Invalid regex"));

pub struct PredictableChecker {
    rules: Vec<Rule>,
    allowlist: Vec<String>,
}

impl PredictableChecker {
    /// # Errors
    /// Returns an error if a rule pattern fails to compile.
    pub fn new(allowlist: Vec<String>) -> Result<Self> {
        let rules = vec![
            Rule::new(
                "on-focus",
                "SC 3.2.1",
                Severity::Error,
                r"(?i)\bonFocus\s*=\s*\{[^}\n]*?(window\.location|router\.push|navigate\(|window\.open|\.submit\(\)|\.click\(\)|\.focus\(\))",
                SAME_LINE,
                classify_focus_change,
            )?,
            Rule::new(
                "on-input",
                "SC 3.2.2",
                Severity::Error,
                r"(?i)\bonChange\s*=\s*\{[^}\n]*?(?:window\.location|router\.push|navigate\(|\.submit\(\)|handleSubmit)",
                SAME_LINE,
                classify_input_change,
            )?,
            Rule::new(
                "change-on-request",
                "SC 3.2.5",
                Severity::Warning,
                r"(?i)\bsetTimeout\s*\([^\n]{0,200}?(?:location\.|router\.push|navigate\()",
                SAME_LINE,
                |_| Verdict::Violation("Navigation happens after a delay without a user request".to_string()),
            )?,
            Rule::new(
                "change-on-request",
                "SC 3.2.5",
                Severity::Warning,
                r"(?i)\bsetInterval\s*\([^\n]{0,200}?(?:location\.reload|reload\()",
                SAME_LINE,
                |_| Verdict::Violation("Page reloads itself without a user request".to_string()),
            )?,
            Rule::new(
                "change-on-request",
                "SC 3.2.5",
                Severity::Warning,
                r#"(?i)<meta\b[^>]*http-equiv\s*=\s*["']\s*refresh"#,
                SAME_LINE,
                |_| Verdict::Violation("Meta refresh redirects or reloads without a user request".to_string()),
            )?,
        ];
        Ok(Self { rules, allowlist })
    }
}

impl Checker for PredictableChecker {
    fn name(&self) -> &'static str {
        "predictable"
    }

    fn title(&self) -> &'static str {
        "WCAG 2.1 Guideline 3.2 - Predictable"
    }

    fn check(&self, target: &ScanTarget) -> Vec<Issue> {
        if target.matches_any(&self.allowlist) {
            return Vec::new();
        }
        let mut issues = evaluate(target, &self.rules);
        issues.extend(check_consistent_navigation(target));
        issues
    }
}

fn classify_focus_change(m: &RuleMatch<'_>) -> Verdict {
    let change = m.group(1).unwrap_or("").to_ascii_lowercase();
    let what = if change.contains("location") || change.contains("push") || change.contains("navigate")
    {
        "navigates to another page"
    } else if change.contains("open") || change.contains("submit") {
        "opens a window or submits a form"
    } else {
        "activates or focuses another element"
    };
    Verdict::Violation(format!("Receiving focus {what}; focus alone must not change context"))
}

fn classify_input_change(m: &RuleMatch<'_>) -> Verdict {
    if AUTO_SUBMIT_NOTICE.is_match(m.content()) {
        Verdict::Pass
    } else {
        Verdict::Violation(
            "Changing this field changes context without warning; submit on an explicit action instead".to_string(),
        )
    }
}

/// Pages that hand-roll a `<nav>` instead of the shared navigation.
fn check_consistent_navigation(target: &ScanTarget) -> Option<Issue> {
    if !is_page(target) || target.kind != FileKind::Script {
        return None;
    }
    let content = target.content.as_str();
    if SHARED_NAV.is_match(content) {
        return None;
    }
    let nav = CUSTOM_NAV.find(content)?;
    let line = target.line_of(nav.start());
    Some(
        Issue::new(
            "consistent-navigation",
            "SC 3.2.3",
            Severity::Error,
            &target.relative,
            "Page renders its own <nav> instead of the shared Layout or Navigation component",
        )
        .with_line(line)
        .with_snippet(target.line_text(line)),
    )
}

#[cfg(test)]
#[path = "predictable_tests.rs"]
mod tests;
