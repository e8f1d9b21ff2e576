//! Guideline 3.3 (Input Assistance): labels, input types, error
//! identification and context changes on input.

use regex::Regex;

use crate::checker::{
    Checker, ContextWindow, Issue, Rule, RuleMatch, Severity, Verdict, evaluate,
};
use crate::error::Result;
use crate::source::ScanTarget;

use super::markup::{OpenTag, element_inner, find_tags, open_tag_at, visible_text};
use super::{compile, has_label, is_hidden_input, label_targets};

const CONTROL_PATTERN: &str = r"(?i)<(?:input|select|textarea)[\s>/]";

pub struct InputAssistanceChecker {
    rules: Vec<Rule>,
    form: Regex,
    error_region: Regex,
    allowlist: Vec<String>,
}

impl InputAssistanceChecker {
    /// # Errors
    /// Returns an error if a rule pattern fails to compile.
    pub fn new(allowlist: Vec<String>) -> Result<Self> {
        let window = ContextWindow::Chars {
            before: 0,
            after: 200,
        };
        let rules = vec![
            Rule::new(
                "missing-label",
                "SC 3.3.2",
                Severity::Error,
                CONTROL_PATTERN,
                window,
                classify_missing_label,
            )?,
            Rule::new(
                "input-type",
                "SC 3.3.2",
                Severity::Error,
                CONTROL_PATTERN,
                window,
                classify_input_type,
            )?,
            Rule::new(
                "label-mismatch",
                "SC 2.5.3",
                Severity::Warning,
                CONTROL_PATTERN,
                window,
                classify_label_mismatch,
            )?,
            Rule::new(
                "change-of-context",
                "SC 3.3.4",
                Severity::Error,
                r"(?i)onChange\s*=\s*\{[^}]*?(?:handleSubmit\(|submit\(|router\.push\(|navigate\()",
                window,
                |_| {
                    Verdict::Violation(
                        "Input change triggers a submit or navigation; warn the user first or provide an explicit submit".to_string(),
                    )
                },
            )?,
        ];
        Ok(Self {
            rules,
            form: compile(r"(?i)<form[\s>]")?,
            error_region: compile(r#"(?i)\brole\s*=\s*["']alert["']|aria-live\s*="#)?,
            allowlist,
        })
    }

    fn check_error_identification(&self, target: &ScanTarget) -> Option<Issue> {
        let form = self.form.find(&target.content)?;
        if self.error_region.is_match(&target.content) {
            return None;
        }
        let line = target.line_of(form.start());
        Some(
            Issue::new(
                "error-identification",
                "SC 3.3.1",
                Severity::Warning,
                &target.relative,
                "Form has no error message container (role=\"alert\" or aria-live); make sure errors are announced",
            )
            .with_line(line)
            .with_snippet(target.line_text(line)),
        )
    }
}

impl Checker for InputAssistanceChecker {
    fn name(&self) -> &'static str {
        "input-assistance"
    }

    fn title(&self) -> &'static str {
        "WCAG 2.1 Guideline 3.3 - Input Assistance"
    }

    fn check(&self, target: &ScanTarget) -> Vec<Issue> {
        if target.matches_any(&self.allowlist) {
            return Vec::new();
        }
        let mut issues = evaluate(target, &self.rules);
        issues.extend(self.check_error_identification(target));
        issues
    }
}

/// The form control at the match, unless it needs no label of its own.
fn labelable_control<'a>(m: &RuleMatch<'a>) -> Option<OpenTag<'a>> {
    let tag = open_tag_at(m.content(), m.start)?;
    if tag.is_component() || is_hidden_input(&tag) {
        return None;
    }
    let kind = tag.attr_text("type").unwrap_or("").to_ascii_lowercase();
    if matches!(kind.as_str(), "submit" | "reset" | "button" | "image") {
        return None;
    }
    Some(tag)
}

fn classify_missing_label(m: &RuleMatch<'_>) -> Verdict {
    let Some(tag) = labelable_control(m) else {
        return Verdict::Pass;
    };
    let content = m.content();
    if tag.has_aria_name() || has_label(content, &tag, &label_targets(content)) {
        return Verdict::Pass;
    }
    if tag.has_value("placeholder") {
        Verdict::Violation(format!(
            "<{}> has no label; a placeholder is not a label (use <label for=\"id\">, aria-label or aria-labelledby)",
            tag.name
        ))
    } else {
        Verdict::Violation(format!(
            "<{}> has no label (use <label for=\"id\">, aria-label or aria-labelledby)",
            tag.name
        ))
    }
}

fn classify_input_type(m: &RuleMatch<'_>) -> Verdict {
    let Some(tag) = labelable_control(m) else {
        return Verdict::Pass;
    };
    if !tag.is_named("input") {
        return Verdict::Pass;
    }
    let Some(name) = tag.attr_text("name").map(str::to_ascii_lowercase) else {
        return Verdict::Pass;
    };
    let kind = tag.attr_text("type").unwrap_or("text").to_ascii_lowercase();
    if name.contains("email") && kind != "email" {
        return Verdict::Violation(format!(
            "Input \"{name}\" collects an email address but is not type=\"email\""
        ));
    }
    if looks_like_phone(&name) && kind != "tel" {
        return Verdict::Violation(format!(
            "Input \"{name}\" collects a phone number but is not type=\"tel\""
        ));
    }
    Verdict::Pass
}

fn looks_like_phone(name: &str) -> bool {
    name.contains("phone")
        || name
            .split(|c: char| !c.is_ascii_alphanumeric())
            .any(|part| part.starts_with("tel") || part == "mobile")
}

fn classify_label_mismatch(m: &RuleMatch<'_>) -> Verdict {
    let Some(tag) = labelable_control(m) else {
        return Verdict::Pass;
    };
    let (Some(id), Some(aria)) = (tag.attr_text("id"), tag.attr_text("aria-label")) else {
        return Verdict::Pass;
    };
    let Some(visible) = label_text(m.content(), id) else {
        return Verdict::Pass;
    };
    let (visible_lower, aria_lower) = (visible.to_lowercase(), aria.to_lowercase());
    if visible_lower.is_empty()
        || aria_lower.contains(&visible_lower)
        || visible_lower.contains(&aria_lower)
    {
        return Verdict::Pass;
    }
    Verdict::Violation(format!(
        "aria-label \"{aria}\" does not contain the visible label \"{visible}\""
    ))
}

/// Visible text of the `<label>` pointing at `id`.
fn label_text(content: &str, id: &str) -> Option<String> {
    find_tags(content, "label")
        .iter()
        .find(|label| {
            label
                .attr_text("for")
                .or_else(|| label.attr_text("htmlFor"))
                .is_some_and(|target| target == id)
        })
        .and_then(|label| element_inner(content, label, 1000))
        .map(visible_text)
}

#[cfg(test)]
#[path = "input_assistance_tests.rs"]
mod tests;
