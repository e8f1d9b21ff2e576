//! Mobile readiness: responsive image hints, the viewport meta tag and a
//! readable base font size.

use std::sync::LazyLock;

use regex::Regex;

use crate::checker::{
    Checker, ContextWindow, Issue, Rule, RuleMatch, Severity, Verdict, evaluate,
};
use crate::error::Result;
use crate::source::{FileKind, ScanTarget};

use super::markup::find_tags;

const CRITERION: &str = "Mobile Performance";

/// Smallest root font size that stays readable on a phone.
const MIN_BASE_FONT_PX: f64 = 16.0;

static NEXT_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"from\s+["']next/image["']"#).expect("Invalid regex"));
static VIEWPORT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"name\s*=\s*["']viewport["']"#).expect("Invalid regex"));
static DEVICE_WIDTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"width\s*=\s*device-width").expect("Invalid regex"));

pub struct MobileChecker {
    rules: Vec<Rule>,
    allowlist: Vec<String>,
}

impl MobileChecker {
    /// # Errors
    /// Returns an error if a rule pattern fails to compile.
    pub fn new(allowlist: Vec<String>) -> Result<Self> {
        let rules = vec![Rule::new(
            "base-font-size",
            CRITERION,
            Severity::Error,
            r"\b(html|body)\s*\{[^}]*?font-size\s*:\s*(\d+(?:\.\d+)?)px",
            ContextWindow::Chars {
                before: 0,
                after: 0,
            },
            classify_base_font,
        )?];
        Ok(Self { rules, allowlist })
    }
}

impl Checker for MobileChecker {
    fn name(&self) -> &'static str {
        "mobile"
    }

    fn title(&self) -> &'static str {
        "Mobile Performance"
    }

    fn accepts(&self, _kind: FileKind) -> bool {
        true
    }

    fn check(&self, target: &ScanTarget) -> Vec<Issue> {
        if target.matches_any(&self.allowlist) {
            return Vec::new();
        }
        let mut issues = if target.kind == FileKind::Style {
            evaluate(target, &self.rules)
        } else {
            Vec::new()
        };
        issues.extend(check_image_sizes(target));
        issues.extend(check_viewport(target));
        issues
    }
}

fn classify_base_font(m: &RuleMatch<'_>) -> Verdict {
    // `.card-body` and `#body` are not the document root.
    let qualified = m.content()[..m.start]
        .chars()
        .next_back()
        .is_some_and(|c| matches!(c, '.' | '#' | '-' | '_'));
    if qualified {
        return Verdict::Pass;
    }
    let element = m.group(1).unwrap_or("html");
    match m.group(2).and_then(|s| s.parse::<f64>().ok()) {
        Some(px) if px < MIN_BASE_FONT_PX => Verdict::Violation(format!(
            "{element} font-size is {px}px; the base size should be at least {MIN_BASE_FONT_PX}px"
        )),
        _ => Verdict::Pass,
    }
}

/// `next/image` components without `sizes` download the largest source on
/// every viewport.
fn check_image_sizes(target: &ScanTarget) -> Vec<Issue> {
    let content = target.content.as_str();
    if !NEXT_IMAGE.is_match(content) {
        return Vec::new();
    }
    find_tags(content, "Image")
        .into_iter()
        .filter(|tag| tag.name == "Image" && !tag.has_attr("sizes"))
        .filter(|tag| !content[tag.start..tag.end].contains("{..."))
        .map(|tag| {
            let line = target.line_of(tag.start);
            Issue::new(
                "image-sizes",
                CRITERION,
                Severity::Error,
                &target.relative,
                "<Image> has no sizes prop, so phones download the desktop-sized image",
            )
            .with_line(line)
            .with_snippet(target.line_text(line))
        })
        .collect()
}

fn check_viewport(target: &ScanTarget) -> Option<Issue> {
    if target.file_name().split('.').next() != Some("_document") {
        return None;
    }
    let content = target.content.as_str();
    if VIEWPORT_NAME.is_match(content) && DEVICE_WIDTH.is_match(content) {
        return None;
    }
    Some(Issue::new(
        "viewport-meta",
        CRITERION,
        Severity::Error,
        &target.relative,
        "Document shell has no <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />",
    ))
}

#[cfg(test)]
#[path = "mobile_tests.rs"]
mod tests;
