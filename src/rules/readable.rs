//! Guideline 3.1 (Readable): the page language and language changes
//! inside it.

use std::sync::LazyLock;

use regex::Regex;

use crate::checker::{Checker, Issue, Severity};
use crate::source::{FileKind, ScanTarget};

use super::markup::{enclosing_open_tag, find_tags};

/// Shape required of the document language: `en` or `en-US`.
static PAGE_LANG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}(?:-[A-Z]{2})?$").expect("Invalid regex"));
/// Looser BCP 47 shape accepted on passages.
static PART_LANG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{2,3}(?:-[A-Za-z0-9]{2,8})*$").expect("Invalid regex")
});
static LANG_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\blang\s*=").expect("Invalid regex"));

pub struct ReadableChecker {
    allowlist: Vec<String>,
}

impl ReadableChecker {
    #[must_use]
    pub const fn new(allowlist: Vec<String>) -> Self {
        Self { allowlist }
    }
}

impl Checker for ReadableChecker {
    fn name(&self) -> &'static str {
        "readable"
    }

    fn title(&self) -> &'static str {
        "WCAG 2.1 Guideline 3.1 - Readable"
    }

    fn check(&self, target: &ScanTarget) -> Vec<Issue> {
        if target.matches_any(&self.allowlist) {
            return Vec::new();
        }
        let mut issues: Vec<Issue> = check_page_language(target).into_iter().collect();
        issues.extend(check_passage_language(target));
        issues
    }
}

/// The Next.js document shell, which owns the `<Html>` element.
fn is_document_shell(target: &ScanTarget) -> bool {
    target.file_name().split('.').next() == Some("_document")
}

fn check_page_language(target: &ScanTarget) -> Option<Issue> {
    let content = target.content.as_str();
    let shell = is_document_shell(target);
    if !shell && target.kind != FileKind::Markup {
        return None;
    }
    let issue = |message: String, offset: Option<usize>| {
        let issue =
            Issue::new("page-language", "SC 3.1.1", Severity::Error, &target.relative, message);
        match offset {
            Some(offset) => {
                let line = target.line_of(offset);
                issue.with_line(line).with_snippet(target.line_text(line))
            }
            None => issue,
        }
    };
    let Some(html) = find_tags(content, "html").into_iter().next() else {
        return shell.then(|| {
            issue(
                "Document shell should render <Html> from next/document so the page language can be set"
                    .to_string(),
                None,
            )
        });
    };
    let lang = match html.attr("lang") {
        None | Some(None) => {
            return Some(issue(
                format!("<{}> must declare the page language, e.g. lang=\"en\"", html.name),
                Some(html.start),
            ));
        }
        // Expressions are resolved at build time.
        Some(Some(value)) => value.text()?,
    };
    (!PAGE_LANG.is_match(lang)).then(|| {
        issue(
            format!("lang=\"{lang}\" is not a valid language code (e.g. \"en\", \"en-US\", \"de\")"),
            Some(html.start),
        )
    })
}

/// Passages marked with a `lang` that cannot be a language tag.
fn check_passage_language(target: &ScanTarget) -> Vec<Issue> {
    let content = target.content.as_str();
    let mut issues = Vec::new();
    for found in LANG_ATTR.find_iter(content) {
        let Some(tag) = enclosing_open_tag(content, found.start()) else {
            continue;
        };
        if tag.is_named("html") {
            continue;
        }
        let Some(lang) = tag.attr_text("lang") else {
            continue;
        };
        if PART_LANG.is_match(lang.trim()) {
            continue;
        }
        let line = target.line_of(tag.start);
        issues.push(
            Issue::new(
                "language-of-parts",
                "SC 3.1.2",
                Severity::Warning,
                &target.relative,
                format!(
                    "lang=\"{lang}\" on <{}> is not a language tag such as \"fr\" or \"pt-BR\"",
                    tag.name
                ),
            )
            .with_line(line)
            .with_snippet(target.line_text(line)),
        );
    }
    issues
}

#[cfg(test)]
#[path = "readable_tests.rs"]
mod tests;
