//! Internal link integrity across rendered pages.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::checker::{Issue, Severity};

use super::Page;

pub const LINK_CRITERION: &str = "Internal Links";

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("Invalid selector"));

static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("Invalid regex"));

/// Route an internal `href` on the page at `page_route` points to, or
/// `None` when the href is external, fragment-only, `mailto:`/`tel:` or
/// empty. Query and fragment are dropped and relative paths are resolved
/// against the page's directory.
#[must_use]
pub fn resolve_href(page_route: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') || href.starts_with("//") || SCHEME.is_match(href)
    {
        return None;
    }
    let path = href.split(['?', '#']).next().unwrap_or("");
    if path.is_empty() {
        return Some(page_route.to_string());
    }

    let mut segments: Vec<&str> = if path.starts_with('/') {
        Vec::new()
    } else {
        let dir = page_route.rsplit_once('/').map_or("", |(dir, _)| dir);
        dir.split('/').filter(|s| !s.is_empty()).collect()
    };
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    Some(format!("/{}", segments.join("/")))
}

/// One `broken-link` error per anchor whose internal target is not in
/// `routes`.
#[must_use]
pub fn check_links(pages: &[Page], routes: &BTreeSet<String>) -> Vec<Issue> {
    pages
        .iter()
        .flat_map(|page| check_page(page, routes))
        .collect()
}

fn check_page(page: &Page, routes: &BTreeSet<String>) -> Vec<Issue> {
    let document = Html::parse_document(page.html());
    let mut cursor: HashMap<String, usize> = HashMap::new();
    let mut issues = Vec::new();

    for anchor in document.select(&ANCHOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(target) = resolve_href(&page.route, href) else {
            continue;
        };
        if routes.contains(&target) {
            continue;
        }
        tracing::trace!(page = %page.route, href, target = %target, "broken link");
        let mut issue = Issue::new(
            "broken-link",
            LINK_CRITERION,
            Severity::Error,
            &page.route,
            format!("Broken link to '{href}'"),
        );
        if let Some(line) = locate_href(page, href, &mut cursor) {
            issue = issue.with_line(line);
        }
        issues.push(issue);
    }
    issues
}

/// Line of the next raw occurrence of `href`, advancing past earlier hits
/// so repeated links map to successive lines.
fn locate_href(page: &Page, href: &str, cursor: &mut HashMap<String, usize>) -> Option<usize> {
    let html = page.html();
    let from = cursor.get(href).copied().unwrap_or(0);
    let found = html.get(from..)?.find(href)? + from;
    cursor.insert(href.to_string(), found + href.len());
    Some(page.target.line_of(found))
}

#[cfg(test)]
#[path = "links_tests.rs"]
mod tests;
