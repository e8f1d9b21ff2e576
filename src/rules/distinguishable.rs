//! Guideline 1.4 (Distinguishable): audio that starts by itself, images
//! standing in for text, and widths that defeat reflow.

use std::sync::LazyLock;

use regex::Regex;

use crate::checker::{
    Checker, ContextWindow, Issue, Rule, RuleMatch, Severity, Verdict, evaluate,
};
use crate::error::Result;
use crate::source::{FileKind, ScanTarget};

use super::markup::{AttrValue, OpenTag, find_tags};

/// Narrowest viewport content must reflow into.
const REFLOW_WIDTH_PX: u32 = 320;

static TEXT_ALT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:button|heading|title|text|quote|caption)s?\b").expect("Invalid regex")
});

pub struct DistinguishableChecker {
    rules: Vec<Rule>,
    allowlist: Vec<String>,
}

impl DistinguishableChecker {
    /// # Errors
    /// Returns an error if a rule pattern fails to compile.
    pub fn new(allowlist: Vec<String>) -> Result<Self> {
        let rules = vec![Rule::new(
            "reflow",
            "SC 1.4.10",
            Severity::Warning,
            r#"(?:min-width|minWidth)\s*[:=]\s*["'{]?\s*(\d+)(?:px)?|\bmin-w-\[(\d+)px\]"#,
            ContextWindow::Chars {
                before: 0,
                after: 0,
            },
            classify_min_width,
        )?];
        Ok(Self { rules, allowlist })
    }
}

impl Checker for DistinguishableChecker {
    fn name(&self) -> &'static str {
        "distinguishable"
    }

    fn title(&self) -> &'static str {
        "WCAG 2.1 Guideline 1.4 - Distinguishable"
    }

    fn accepts(&self, _kind: FileKind) -> bool {
        true
    }

    fn check(&self, target: &ScanTarget) -> Vec<Issue> {
        if target.matches_any(&self.allowlist) {
            return Vec::new();
        }
        let mut issues = evaluate(target, &self.rules);
        issues.extend(check_audio_control(target));
        issues.extend(check_images_of_text(target));
        issues.sort_by_key(|issue| issue.line);
        issues
    }
}

fn classify_min_width(m: &RuleMatch<'_>) -> Verdict {
    let width = m
        .group(1)
        .or_else(|| m.group(2))
        .and_then(|w| w.parse::<u32>().ok());
    match width {
        Some(px) if px > REFLOW_WIDTH_PX => Verdict::Violation(format!(
            "min-width of {px}px may force horizontal scrolling at a {REFLOW_WIDTH_PX}px viewport"
        )),
        _ => Verdict::Pass,
    }
}

/// Boolean JSX attribute that is switched on: bare, or any value but
/// `{false}`.
fn is_enabled(tag: &OpenTag<'_>, name: &str) -> bool {
    match tag.attr(name) {
        None => false,
        Some(Some(AttrValue::Expr(expr))) => expr.trim() != "false",
        Some(_) => true,
    }
}

fn issue_at(
    target: &ScanTarget,
    rule_id: &'static str,
    criterion: &'static str,
    severity: Severity,
    offset: usize,
    message: String,
) -> Issue {
    let line = target.line_of(offset);
    Issue::new(rule_id, criterion, severity, &target.relative, message)
        .with_line(line)
        .with_snippet(target.line_text(line))
}

fn check_audio_control(target: &ScanTarget) -> Vec<Issue> {
    let content = target.content.as_str();
    let mut issues = Vec::new();
    for name in ["audio", "video"] {
        for tag in find_tags(content, name) {
            if tag.is_component() || !is_enabled(&tag, "autoplay") {
                continue;
            }
            // Muted media plays no sound to control.
            if is_enabled(&tag, "controls") || is_enabled(&tag, "muted") {
                continue;
            }
            issues.push(issue_at(
                target,
                "audio-control",
                "SC 1.4.2",
                Severity::Error,
                tag.start,
                format!("Auto-playing <{name}> has no controls to pause it or turn the sound down"),
            ));
        }
    }
    issues
}

fn check_images_of_text(target: &ScanTarget) -> Vec<Issue> {
    let path = target.relative.to_ascii_lowercase();
    if path.contains("logo") || path.contains("og-image") {
        return Vec::new();
    }
    let content = target.content.as_str();
    find_tags(content, "img")
        .into_iter()
        .chain(find_tags(content, "Image").into_iter().filter(|t| t.name == "Image"))
        .filter_map(|tag| {
            let alt = tag.attr_text("alt")?;
            TEXT_ALT.is_match(alt).then(|| {
                issue_at(
                    target,
                    "images-of-text",
                    "SC 1.4.5",
                    Severity::Warning,
                    tag.start,
                    format!("Image may contain text (alt \"{alt}\"); use real text unless it is a logo"),
                )
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "distinguishable_tests.rs"]
mod tests;
