//! Title, description and canonical metadata of rendered pages.

use std::collections::HashMap;
use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::checker::{Issue, Severity};
use crate::config::SeoConfig;

use super::Page;

pub const SEO_CRITERION: &str = "SEO Metadata";

static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("head title").expect("Invalid selector"));
static DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name="description"]"#).expect("Invalid selector"));
static CANONICAL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"link[rel="canonical"]"#).expect("Invalid selector"));

/// Metadata read from a page head. Blank values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub canonical: Option<String>,
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[must_use]
pub fn extract_meta(html: &str) -> PageMeta {
    let document = Html::parse_document(html);
    let title = document
        .select(&TITLE)
        .next()
        .and_then(|t| non_blank(&t.text().collect::<String>()));
    let attr_of = |selector: &Selector, attr: &str| {
        document
            .select(selector)
            .next()
            .and_then(|el| el.value().attr(attr))
            .and_then(non_blank)
    };
    PageMeta {
        title,
        description: attr_of(&DESCRIPTION, "content"),
        canonical: attr_of(&CANONICAL, "href"),
    }
}

/// Framework internals and error pages are not validated.
#[must_use]
pub fn is_skipped(page: &Page, config: &SeoConfig) -> bool {
    let name = page.file_name();
    (!config.skip_prefix.is_empty() && name.starts_with(&config.skip_prefix))
        || config.skip_files.iter().any(|skip| skip == name)
}

/// Checks `pages` in order; a duplicated title or description is reported
/// on every page after the first that used it.
#[must_use]
pub fn check_seo(pages: &[Page], config: &SeoConfig) -> Vec<Issue> {
    let mut seen_titles: HashMap<String, String> = HashMap::new();
    let mut seen_descriptions: HashMap<String, String> = HashMap::new();
    let mut issues = Vec::new();

    for page in pages.iter().filter(|p| !is_skipped(p, config)) {
        let meta = extract_meta(page.html());
        let issue = |rule_id, severity, message: String| {
            Issue::new(rule_id, SEO_CRITERION, severity, &page.route, message)
        };

        match &meta.title {
            None => issues.push(issue("seo-title", Severity::Error, "Title tag missing".into())),
            Some(title) => {
                let len = title.chars().count();
                if len < config.title_min || len > config.title_max {
                    issues.push(issue(
                        "seo-title",
                        Severity::Warning,
                        format!(
                            "Title length {len} chars (recommended {}-{})",
                            config.title_min, config.title_max
                        ),
                    ));
                }
                if let Some(first) = seen_titles.get(title) {
                    issues.push(issue(
                        "duplicate-title",
                        Severity::Error,
                        format!("Title duplicates {first}: \"{title}\""),
                    ));
                } else {
                    seen_titles.insert(title.clone(), page.route.clone());
                }
            }
        }

        match &meta.description {
            None => issues.push(issue(
                "seo-description",
                Severity::Error,
                "Meta description missing".into(),
            )),
            Some(description) => {
                let len = description.chars().count();
                if len < config.description_min || len > config.description_max {
                    issues.push(issue(
                        "seo-description",
                        Severity::Warning,
                        format!(
                            "Description length {len} chars (recommended {}-{})",
                            config.description_min, config.description_max
                        ),
                    ));
                }
                if let Some(first) = seen_descriptions.get(description) {
                    issues.push(issue(
                        "duplicate-description",
                        Severity::Error,
                        format!("Description duplicates {first}"),
                    ));
                } else {
                    seen_descriptions.insert(description.clone(), page.route.clone());
                }
            }
        }

        match &meta.canonical {
            None => issues.push(issue(
                "seo-canonical",
                Severity::Warning,
                "Canonical URL missing".into(),
            )),
            Some(url) if !url.starts_with("https://") => issues.push(issue(
                "seo-canonical",
                Severity::Error,
                format!("Canonical URL should use HTTPS: {url}"),
            )),
            Some(_) => {}
        }
    }
    issues
}

#[cfg(test)]
#[path = "seo_tests.rs"]
mod tests;
