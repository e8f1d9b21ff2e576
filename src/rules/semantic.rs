//! SC 1.3.1 (Info and Relationships): heading hierarchy, landmarks, list
//! markup in navigation and table headers.

use regex::Regex;

use crate::checker::{Checker, Issue, Severity};
use crate::config::SemanticConfig;
use crate::error::Result;
use crate::source::{FileKind, ScanTarget};

use super::compile;
use super::markup::{element_inner, enclosing_open_tag, find_tags};

const CRITERION: &str = "SC 1.3.1";

/// Bound on the content scanned for a `<nav>` or `<table>`.
const BLOCK_LIMIT: usize = 20_000;

/// A heading found in a page, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub line: usize,
}

/// One heading hierarchy problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingViolation {
    pub line: Option<usize>,
    pub severity: Severity,
    pub message: String,
}

impl HeadingViolation {
    fn error(line: usize, message: String) -> Self {
        Self {
            line: Some(line),
            severity: Severity::Error,
            message,
        }
    }
}

/// Check a page's heading sequence. `implicit_h1` means a heading component
/// renders the page's `<h1>` ahead of the listed headings.
#[must_use]
pub fn heading_violations(headings: &[Heading], implicit_h1: bool) -> Vec<HeadingViolation> {
    let mut violations = Vec::new();
    let Some(first) = headings.first() else {
        if !implicit_h1 {
            violations.push(HeadingViolation {
                line: None,
                severity: Severity::Warning,
                message: "Page has no headings".to_string(),
            });
        }
        return violations;
    };

    if implicit_h1 {
        if first.level > 2 {
            violations.push(HeadingViolation::error(
                first.line,
                format!(
                    "Page header provides h1 but the next heading is h{} (expected h2)",
                    first.level
                ),
            ));
        }
    } else if first.level != 1 {
        violations.push(HeadingViolation::error(
            first.line,
            format!("First heading is h{}, expected h1", first.level),
        ));
    }

    for pair in headings.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);
        if curr.level > prev.level + 1 {
            violations.push(HeadingViolation::error(
                curr.line,
                format!(
                    "h{} -> h{} skips a level (expected h{} or higher)",
                    prev.level,
                    curr.level,
                    prev.level + 1
                ),
            ));
        }
    }

    let mut h1s = headings.iter().filter(|h| h.level == 1);
    let explicit = h1s.clone().count();
    let total = explicit + usize::from(implicit_h1);
    if total > 1 {
        // First h1 beyond the one the page is allowed.
        let extra = if implicit_h1 { h1s.next() } else { h1s.nth(1) };
        if let Some(extra) = extra {
            violations.push(HeadingViolation::error(
                extra.line,
                format!("Page has {total} h1 elements, expected exactly one"),
            ));
        }
    }
    violations
}

/// Page files are checked for heading hierarchy; components are not, since
/// their headings depend on where they are used.
#[must_use]
pub fn is_page(target: &ScanTarget) -> bool {
    if target.kind == FileKind::Markup
        && std::path::Path::new(&target.relative)
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"))
    {
        return true;
    }
    let relative = target.relative.as_str();
    let Some(rest) = relative
        .strip_prefix("pages/")
        .or_else(|| relative.find("/pages/").map(|i| &relative[i + "/pages/".len()..]))
    else {
        return false;
    };
    let stem = target.file_name().split('.').next().unwrap_or("");
    !rest.starts_with("api/") && stem != "_app" && stem != "_document"
}

struct Landmark {
    file: String,
    element: String,
    present: Regex,
}

pub struct SemanticChecker {
    heading_tag: Regex,
    heading_as: Regex,
    heading_component: Option<Regex>,
    landmarks: Vec<Landmark>,
    allowlist: Vec<String>,
}

impl SemanticChecker {
    /// # Errors
    /// Returns an error if a pattern built from configuration fails to compile.
    pub fn new(config: &SemanticConfig, allowlist: Vec<String>) -> Result<Self> {
        let heading_component = if config.heading_components.is_empty() {
            None
        } else {
            let names: Vec<_> = config
                .heading_components
                .iter()
                .map(|n| regex::escape(n))
                .collect();
            Some(compile(&format!(r"<(?:{})[\s/>]", names.join("|")))?)
        };
        let landmarks = config
            .landmarks
            .iter()
            .map(|(file, element)| {
                let role = landmark_role(element);
                let present = compile(&format!(
                    r#"(?i)<{}[\s>]|\brole\s*=\s*["']{}["']"#,
                    regex::escape(element),
                    regex::escape(role)
                ))?;
                Ok(Landmark {
                    file: file.clone(),
                    element: element.clone(),
                    present,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            heading_tag: compile(r"(?i)<h([1-6])[\s>/]")?,
            heading_as: compile(r#"\bas\s*=\s*["']h([1-6])["']"#)?,
            heading_component,
            landmarks,
            allowlist,
        })
    }

    fn headings(&self, target: &ScanTarget) -> Vec<Heading> {
        let content = target.content.as_str();
        let mut found: Vec<(usize, u8)> = self
            .heading_tag
            .captures_iter(content)
            .filter_map(|c| Some((c.get(0)?.start(), c.get(1)?.as_str().parse().ok()?)))
            .collect();
        for caps in self.heading_as.captures_iter(content) {
            let (Some(whole), Some(level)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let Some(tag) = enclosing_open_tag(content, whole.start()) else {
                continue;
            };
            if !tag.is_component() {
                continue;
            }
            if let Ok(level) = level.as_str().parse() {
                found.push((tag.start, level));
            }
        }
        found.sort_unstable();
        found
            .into_iter()
            .map(|(offset, level)| Heading {
                level,
                line: target.line_of(offset),
            })
            .collect()
    }

    fn check_headings(&self, target: &ScanTarget) -> Vec<Issue> {
        if !is_page(target) {
            return Vec::new();
        }
        let implicit_h1 = self
            .heading_component
            .as_ref()
            .is_some_and(|re| re.is_match(&target.content));
        heading_violations(&self.headings(target), implicit_h1)
            .into_iter()
            .map(|v| {
                let mut issue =
                    Issue::new("heading-order", CRITERION, v.severity, &target.relative, v.message);
                if let Some(line) = v.line {
                    issue = issue.with_line(line).with_snippet(target.line_text(line));
                }
                issue
            })
            .collect()
    }

    fn check_landmarks(&self, target: &ScanTarget) -> Vec<Issue> {
        self.landmarks
            .iter()
            .filter(|l| {
                target.relative == l.file || target.relative.ends_with(&format!("/{}", l.file))
            })
            .filter(|l| !l.present.is_match(&target.content))
            .map(|l| {
                Issue::new(
                    "landmark",
                    CRITERION,
                    Severity::Error,
                    &target.relative,
                    format!("{} must render a <{}> landmark", l.file, l.element),
                )
            })
            .collect()
    }
}

/// ARIA role equivalent to a landmark element.
fn landmark_role(element: &str) -> &str {
    match element {
        "nav" => "navigation",
        "footer" => "contentinfo",
        "header" => "banner",
        "aside" => "complementary",
        other => other,
    }
}

fn check_nav_lists(target: &ScanTarget) -> Vec<Issue> {
    let content = target.content.as_str();
    find_tags(content, "nav")
        .into_iter()
        .filter(|nav| !nav.is_component())
        .filter_map(|nav| {
            let inner = element_inner(content, &nav, BLOCK_LIMIT)?;
            let has_links = !find_tags(inner, "a").is_empty() || !find_tags(inner, "Link").is_empty();
            let has_list = !find_tags(inner, "ul").is_empty() || !find_tags(inner, "ol").is_empty();
            (has_links && !has_list).then(|| {
                let line = target.line_of(nav.start);
                Issue::new(
                    "nav-list",
                    CRITERION,
                    Severity::Warning,
                    &target.relative,
                    "Navigation links are not marked up as a list (<ul>/<ol> with <li>)",
                )
                .with_line(line)
                .with_snippet(target.line_text(line))
            })
        })
        .collect()
}

fn check_tables(target: &ScanTarget) -> Vec<Issue> {
    let content = target.content.as_str();
    let mut issues = Vec::new();
    for table in find_tags(content, "table") {
        if table.is_component() || table.self_closing {
            continue;
        }
        let Some(inner) = element_inner(content, &table, BLOCK_LIMIT) else {
            continue;
        };
        let headers: Vec<_> = find_tags(inner, "th")
            .into_iter()
            .filter(|th| !th.is_component())
            .collect();
        let line = target.line_of(table.start);
        let issue = |severity, message: &str| {
            Issue::new("table-headers", CRITERION, severity, &target.relative, message)
                .with_line(line)
                .with_snippet(target.line_text(line))
        };
        if headers.is_empty() {
            // Rows supplied by children cannot be inspected here.
            if !find_tags(inner, "tr").is_empty() {
                issues.push(issue(Severity::Error, "Table has rows but no <th> header cells"));
            }
        } else if headers.iter().any(|th| !th.has_attr("scope")) {
            issues.push(issue(
                Severity::Warning,
                "Table header cells should declare scope=\"col\" or scope=\"row\"",
            ));
        }
    }
    issues
}

impl Checker for SemanticChecker {
    fn name(&self) -> &'static str {
        "semantic"
    }

    fn title(&self) -> &'static str {
        "WCAG 2.1 SC 1.3.1 - Semantic Structure"
    }

    fn check(&self, target: &ScanTarget) -> Vec<Issue> {
        if target.matches_any(&self.allowlist) {
            return Vec::new();
        }
        let mut issues = self.check_headings(target);
        issues.extend(self.check_landmarks(target));
        issues.extend(check_nav_lists(target));
        issues.extend(check_tables(target));
        issues
    }
}

#[cfg(test)]
#[path = "semantic_tests.rs"]
mod tests;
