//! Guideline 2.4 (Navigable): bypass blocks, page titles, focus order,
//! link purpose, descriptive headings and labels, and visible focus.

use std::sync::LazyLock;

use regex::Regex;

use crate::checker::{
    Checker, ContextWindow, Issue, Rule, RuleMatch, Severity, Verdict, evaluate,
};
use crate::config::NavigableConfig;
use crate::error::Result;
use crate::source::{FileKind, ScanTarget};

use super::compile;
use super::markup::{OpenTag, element_inner, find_tags, open_tag_at, visible_text};
use super::semantic::is_page;

/// Bound on link and heading content scanned for visible text.
const INNER_LIMIT: usize = 2000;

/// Link texts that say nothing about the destination.
const GENERIC_LINK_TEXT: &[&str] = &[
    "click here",
    "click",
    "here",
    "read more",
    "more",
    "link",
    "continue",
];

/// Heading texts left over from scaffolding.
const PLACEHOLDER_HEADINGS: &[&str] = &[
    "heading",
    "title",
    "placeholder",
    "todo",
    "tbd",
    "test",
    "lorem ipsum",
];

static SKIP_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)href\s*=\s*["'{`]*#(?:main|content)"#).expect("Invalid regex")
});
static MAIN_LANDMARK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<main[\s>]|\brole\s*=\s*["']main["']"#).expect("Invalid regex")
});
static NAV_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<nav[\s>]|<Navigation[\s/>]").expect("Invalid regex"));
static SHARED_LAYOUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bLayout\b|\bgetStaticProps\b").expect("Invalid regex"));
static NAME_IN_CONTENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:aria-label|title)\s*=").expect("Invalid regex"));
static FOCUS_STYLE_INLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)focus-visible:|\bring\b|ring-|border|shadow").expect("Invalid regex")
});
static FOCUS_STYLE_NEARBY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)focus:|focus-visible|focus-within|box-shadow").expect("Invalid regex")
});

pub struct NavigableChecker {
    rules: Vec<Rule>,
    title_component: Option<Regex>,
    allowlist: Vec<String>,
}

impl NavigableChecker {
    /// # Errors
    /// Returns an error if a rule pattern or a pattern built from
    /// configuration fails to compile.
    pub fn new(config: &NavigableConfig, allowlist: Vec<String>) -> Result<Self> {
        let title_component = if config.title_components.is_empty() {
            None
        } else {
            let names: Vec<_> = config
                .title_components
                .iter()
                .map(|n| regex::escape(n))
                .collect();
            Some(compile(&format!(r"<(?:{})[\s/>]", names.join("|")))?)
        };
        let rules = vec![
            Rule::new(
                "focus-order",
                "SC 2.4.3",
                Severity::Error,
                r#"(?i)\btabIndex\s*=\s*["'{]\s*(\d+)\s*["'}]"#,
                ContextWindow::Chars {
                    before: 0,
                    after: 0,
                },
                classify_tab_index,
            )?,
            Rule::new(
                "focus-visible",
                "SC 2.4.7",
                Severity::Error,
                r#"(?i)\boutline\s*:\s*["']?(?:none|0)\b"#,
                ContextWindow::Lines {
                    before: 3,
                    after: 2,
                },
                classify_outline,
            )?,
        ];
        Ok(Self {
            rules,
            title_component,
            allowlist,
        })
    }

    fn check_page_title(&self, target: &ScanTarget) -> Option<Issue> {
        if !is_page(target) {
            return None;
        }
        let content = target.content.as_str();
        if has_title_element(content) {
            return None;
        }
        if target.kind == FileKind::Markup {
            return Some(Issue::new(
                "page-titled",
                "SC 2.4.2",
                Severity::Error,
                &target.relative,
                "Page has no <title> describing its topic or purpose",
            ));
        }
        let re = self.title_component.as_ref()?;
        let Some(found) = re.find(content) else {
            return Some(Issue::new(
                "page-titled",
                "SC 2.4.2",
                Severity::Error,
                &target.relative,
                "Page does not render a title component or a <title> element",
            ));
        };
        let tag = open_tag_at(content, found.start())?;
        // Spread props may carry the title.
        let spread = content[tag.start..tag.end].contains("{...");
        if tag.has_value("title") || spread || is_landing_page(target) {
            return None;
        }
        Some(issue_at(
            target,
            "page-titled",
            "SC 2.4.2",
            tag.start,
            format!(
                "<{}> has no title prop; only the landing page may use the default title",
                tag.name
            ),
        ))
    }
}

impl Checker for NavigableChecker {
    fn name(&self) -> &'static str {
        "navigable"
    }

    fn title(&self) -> &'static str {
        "WCAG 2.1 Guideline 2.4 - Navigable"
    }

    fn accepts(&self, _kind: FileKind) -> bool {
        true
    }

    fn check(&self, target: &ScanTarget) -> Vec<Issue> {
        if target.matches_any(&self.allowlist) {
            return Vec::new();
        }
        let mut issues = evaluate(target, &self.rules);
        issues.extend(check_bypass_blocks(target));
        issues.extend(self.check_page_title(target));
        issues.extend(check_link_purpose(target));
        issues.extend(check_headings_and_labels(target));
        issues
    }
}

fn issue_at(
    target: &ScanTarget,
    rule_id: &'static str,
    criterion: &'static str,
    offset: usize,
    message: String,
) -> Issue {
    let line = target.line_of(offset);
    Issue::new(rule_id, criterion, Severity::Error, &target.relative, message)
        .with_line(line)
        .with_snippet(target.line_text(line))
}

fn has_title_element(content: &str) -> bool {
    find_tags(content, "title")
        .iter()
        .filter(|t| t.name == "title")
        .filter_map(|t| element_inner(content, t, INNER_LIMIT))
        .any(|inner| !visible_text(inner).is_empty())
}

fn is_landing_page(target: &ScanTarget) -> bool {
    let name = target.file_name();
    name.split('.').next() == Some("index")
        && (target.relative == format!("pages/{name}")
            || target.relative.ends_with(&format!("/pages/{name}")))
}

fn check_bypass_blocks(target: &ScanTarget) -> Option<Issue> {
    let content = target.content.as_str();
    let stem = target.file_name().split('.').next().unwrap_or("");
    if stem == "Layout" && target.kind == FileKind::Script {
        if SKIP_LINK.is_match(content) || MAIN_LANDMARK.is_match(content) {
            return None;
        }
        return Some(Issue::new(
            "bypass-blocks",
            "SC 2.4.1",
            Severity::Error,
            &target.relative,
            "Layout has neither a skip link to the main content nor a <main> landmark",
        ));
    }
    if !is_page(target) || MAIN_LANDMARK.is_match(content) || SKIP_LINK.is_match(content) {
        return None;
    }
    // Pages rendered inside the shared layout inherit its landmarks.
    if target.kind == FileKind::Script && SHARED_LAYOUT.is_match(content) {
        return None;
    }
    let nav = NAV_BLOCK.find(content)?;
    Some(issue_at(
        target,
        "bypass-blocks",
        "SC 2.4.1",
        nav.start(),
        "Page repeats navigation without a <main> landmark or skip link to bypass it".to_string(),
    ))
}

fn classify_tab_index(m: &RuleMatch<'_>) -> Verdict {
    match m.group(1).and_then(|n| n.parse::<u32>().ok()) {
        Some(n) if n > 0 => Verdict::Violation(format!(
            "tabIndex={n} overrides the natural focus order; use 0 or -1"
        )),
        _ => Verdict::Pass,
    }
}

fn classify_outline(m: &RuleMatch<'_>) -> Verdict {
    let line = m.target.line_text(m.line);
    if FOCUS_STYLE_INLINE.is_match(line) || FOCUS_STYLE_NEARBY.is_match(m.context) {
        Verdict::Pass
    } else {
        Verdict::Violation(
            "Focus outline removed without a replacement focus style".to_string(),
        )
    }
}

/// Links whose purpose cannot be told from their own text.
fn check_link_purpose(target: &ScanTarget) -> Vec<Issue> {
    let content = target.content.as_str();
    let links = find_tags(content, "Link")
        .into_iter()
        .filter(|t| t.name == "Link")
        .chain(
            find_tags(content, "a")
                .into_iter()
                .filter(|t| t.name == "a" && t.has_attr("href")),
        );
    let mut issues: Vec<Issue> = links
        .filter(|link| !link.self_closing)
        .filter_map(|link| {
            let inner = element_inner(content, &link, INNER_LIMIT)?;
            link_purpose_problem(&link, inner)
                .map(|message| issue_at(target, "link-purpose", "SC 2.4.4", link.start, message))
        })
        .collect();
    issues.sort_by_key(|issue| issue.line);
    issues
}

fn link_purpose_problem(link: &OpenTag<'_>, inner: &str) -> Option<String> {
    if link.has_aria_name() {
        return None;
    }
    let text = visible_text(inner);
    if text.is_empty() {
        let named = link.has_value("title")
            || NAME_IN_CONTENT.is_match(inner)
            || ["img", "Image"]
                .iter()
                .any(|name| find_tags(inner, name).iter().any(|img| img.has_value("alt")));
        return (inner.contains('<') && !named).then(|| {
            "Icon-only link needs an aria-label or title describing its destination".to_string()
        });
    }
    let normalized = text
        .trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '.' | '…' | '>' | '→' | '»'))
        .to_lowercase();
    GENERIC_LINK_TEXT
        .contains(&normalized.as_str())
        .then(|| format!("Link text \"{text}\" does not describe its destination"))
}

fn check_headings_and_labels(target: &ScanTarget) -> Vec<Issue> {
    let content = target.content.as_str();
    let mut issues = Vec::new();
    for level in 1..=6 {
        let name = format!("h{level}");
        for heading in find_tags(content, &name) {
            if heading.is_component() || heading.self_closing || heading.has_aria_name() {
                continue;
            }
            let Some(inner) = element_inner(content, &heading, INNER_LIMIT) else {
                continue;
            };
            let text = visible_text(inner);
            let message = if text.is_empty() {
                format!("<{name}> heading is empty")
            } else if PLACEHOLDER_HEADINGS.contains(&text.to_lowercase().as_str()) {
                format!("<{name}> heading \"{text}\" does not describe its section")
            } else {
                continue;
            };
            issues.push(issue_at(target, "heading-label-text", "SC 2.4.6", heading.start, message));
        }
    }
    for label in find_tags(content, "label") {
        if label.is_component() || label.self_closing || label.has_aria_name() {
            continue;
        }
        let inner = element_inner(content, &label, INNER_LIMIT);
        if inner.is_some_and(|inner| visible_text(inner).is_empty()) {
            issues.push(issue_at(
                target,
                "heading-label-text",
                "SC 2.4.6",
                label.start,
                "Form label has no text describing its control".to_string(),
            ));
        }
    }
    issues.sort_by_key(|issue| issue.line);
    issues
}

#[cfg(test)]
#[path = "navigable_tests.rs"]
mod tests;
