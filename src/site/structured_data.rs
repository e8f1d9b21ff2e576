//! JSON-LD validation for rendered pages.
//!
//! Each `<script type="application/ld+json">` block is parsed on its own.
//! A block that fails to parse yields a single `jsonld-syntax` error and
//! nothing else. Otherwise every node (the block itself, each element of
//! a top-level array, or each entry of `@graph`) is checked for context,
//! type whitelist, the properties its type requires and URL shape.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde_json::{Map, Value};

use crate::checker::{Issue, Severity};

use super::Page;

pub const STRUCTURED_DATA_CRITERION: &str = "Structured Data";

pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// schema.org types the site is expected to publish.
pub const KNOWN_TYPES: &[&str] = &[
    "Organization",
    "Article",
    "BlogPosting",
    "BreadcrumbList",
    "LocalBusiness",
    "JobPosting",
    "Service",
    "Person",
    "WebSite",
    "WebPage",
    "FAQPage",
];

const URL_PROPERTIES: &[&str] = &["url", "sameAs", "image", "logo"];

const ADDRESS_FIELDS: &[&str] = &[
    "streetAddress",
    "addressLocality",
    "postalCode",
    "addressCountry",
];

const MIN_FAQ_QUESTIONS: usize = 2;

static JSON_LD_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<script\b[^>]*\btype\s*=\s*["']?application/ld\+json["']?[^>]*>(.*?)</script\s*>"#,
    )
    .expect("Invalid regex")
});

static URL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^https?://",
        r"(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+[A-Z]{2,6}\.?|",
        r"localhost|",
        r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})",
        r"(?::\d+)?",
        r"(?:/?|[/?]\S+)$",
    ))
    .expect("Invalid regex")
});

/// A JSON-LD payload and the byte offset of its `<script>` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonLdBlock<'a> {
    pub offset: usize,
    pub body: &'a str,
}

/// All JSON-LD blocks of a page, in document order.
#[must_use]
pub fn extract_blocks(html: &str) -> Vec<JsonLdBlock<'_>> {
    JSON_LD_BLOCK
        .captures_iter(html)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let body = caps.get(1)?;
            Some(JsonLdBlock {
                offset: whole.start(),
                body: body.as_str(),
            })
        })
        .collect()
}

/// ISO-8601 date or date-time, with or without an offset.
#[must_use]
pub fn is_iso8601(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").is_ok()
        || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

#[must_use]
pub fn is_url_shaped(value: &str) -> bool {
    URL_SHAPE.is_match(value)
}

/// A finding inside one block, before it is attributed to a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub rule_id: &'static str,
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    fn error(rule_id: &'static str, message: impl Into<String>) -> Self {
        Self {
            rule_id,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    fn warning(rule_id: &'static str, message: impl Into<String>) -> Self {
        Self {
            rule_id,
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// Validate one JSON-LD payload.
#[must_use]
pub fn validate_block(body: &str) -> Vec<Finding> {
    let data: Value = match serde_json::from_str(body) {
        Ok(data) => data,
        Err(e) => return vec![Finding::error("jsonld-syntax", format!("JSON syntax error: {e}"))],
    };
    let mut findings = Vec::new();
    match &data {
        Value::Array(nodes) => {
            for node in nodes {
                validate_top_level(node, &mut findings);
            }
        }
        node => validate_top_level(node, &mut findings),
    }
    findings
}

fn validate_top_level(node: &Value, findings: &mut Vec<Finding>) {
    let Some(object) = node.as_object() else {
        findings.push(Finding::error(
            "jsonld-type",
            "JSON-LD node must be an object",
        ));
        return;
    };
    check_context(object, findings);

    match object.get("@graph") {
        Some(Value::Array(graph)) => {
            for child in graph {
                match child.as_object() {
                    Some(child) => validate_node(child, findings),
                    None => findings.push(Finding::error(
                        "jsonld-type",
                        "@graph entries must be objects",
                    )),
                }
            }
        }
        Some(_) => findings.push(Finding::error("jsonld-type", "@graph must be an array")),
        None => validate_node(object, findings),
    }
}

fn check_context(object: &Map<String, Value>, findings: &mut Vec<Finding>) {
    match object.get("@context") {
        None => findings.push(Finding::error("jsonld-context", "Missing @context")),
        Some(Value::String(context))
            if context.trim_end_matches('/') == SCHEMA_CONTEXT => {}
        Some(other) => findings.push(Finding::error(
            "jsonld-context",
            format!("Invalid @context: {other}, expected {SCHEMA_CONTEXT}"),
        )),
    }
}

/// Types of a node, or a finding explaining why they are unusable.
fn node_types(object: &Map<String, Value>) -> Result<Vec<&str>, Finding> {
    let types: Vec<&str> = match object.get("@type") {
        None => return Err(Finding::error("jsonld-type", "@type is missing")),
        Some(Value::String(t)) => vec![t.as_str()],
        Some(Value::Array(items)) => {
            let mut types = Vec::with_capacity(items.len());
            for item in items {
                let Some(t) = item.as_str() else {
                    return Err(Finding::error(
                        "jsonld-type",
                        format!("@type entries must be strings, got {item}"),
                    ));
                };
                types.push(t);
            }
            types
        }
        Some(other) => {
            return Err(Finding::error(
                "jsonld-type",
                format!("@type must be a string or an array, got {other}"),
            ));
        }
    };

    if types.is_empty() {
        return Err(Finding::error("jsonld-type", "@type is empty"));
    }
    let unknown: Vec<&str> = types
        .iter()
        .copied()
        .filter(|t| !KNOWN_TYPES.contains(t))
        .collect();
    if !unknown.is_empty() {
        return Err(Finding::error(
            "jsonld-type",
            format!(
                "Unrecognized @type values: {}. Valid types: {}",
                unknown.join(", "),
                KNOWN_TYPES.join(", ")
            ),
        ));
    }
    Ok(types)
}

fn validate_node(object: &Map<String, Value>, findings: &mut Vec<Finding>) {
    let types = match node_types(object) {
        Ok(types) => types,
        Err(finding) => {
            findings.push(finding);
            return;
        }
    };
    for schema_type in types {
        check_type(schema_type, object, findings);
    }
    check_urls(object, findings);
}

fn require(
    schema_type: &str,
    object: &Map<String, Value>,
    properties: &[&str],
    findings: &mut Vec<Finding>,
) {
    for property in properties {
        if is_missing(object.get(*property)) {
            findings.push(Finding::error(
                "jsonld-required",
                format!("{schema_type} missing '{property}'"),
            ));
        }
    }
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn check_type(schema_type: &str, object: &Map<String, Value>, findings: &mut Vec<Finding>) {
    match schema_type {
        "Organization" | "WebSite" => require(schema_type, object, &["name", "url"], findings),
        "Person" => require(schema_type, object, &["name"], findings),
        "BreadcrumbList" => require(schema_type, object, &["itemListElement"], findings),
        "Article" | "BlogPosting" => {
            require(
                schema_type,
                object,
                &["headline", "author", "datePublished"],
                findings,
            );
            check_dates(object, &["datePublished", "dateModified"], findings);
        }
        "JobPosting" => {
            require(
                schema_type,
                object,
                &["title", "description", "datePosted", "hiringOrganization"],
                findings,
            );
            check_dates(object, &["datePosted", "validThrough"], findings);
        }
        "FAQPage" => check_faq(object, findings),
        "LocalBusiness" => {
            require(schema_type, object, &["name"], findings);
            check_address(object, findings);
        }
        _ => {}
    }
}

fn check_dates(object: &Map<String, Value>, properties: &[&str], findings: &mut Vec<Finding>) {
    for property in properties {
        match object.get(*property) {
            None => {}
            Some(Value::String(date)) if is_iso8601(date) => {}
            Some(other) => findings.push(Finding::error(
                "jsonld-date",
                format!("Invalid {property} format: {other} (expected ISO 8601)"),
            )),
        }
    }
}

fn has_type(value: &Value, expected: &str) -> bool {
    match value.get("@type") {
        Some(Value::String(t)) => t == expected,
        Some(Value::Array(items)) => items.iter().any(|t| t.as_str() == Some(expected)),
        _ => false,
    }
}

fn check_faq(object: &Map<String, Value>, findings: &mut Vec<Finding>) {
    let questions: &[Value] = match object.get("mainEntity") {
        Some(Value::Array(items)) => items.as_slice(),
        Some(single @ Value::Object(_)) => std::slice::from_ref(single),
        _ => &[],
    };
    if questions.len() < MIN_FAQ_QUESTIONS {
        findings.push(Finding::error(
            "jsonld-faq",
            format!(
                "FAQPage needs at least {MIN_FAQ_QUESTIONS} questions in 'mainEntity', found {}",
                questions.len()
            ),
        ));
    }
    for (i, question) in questions.iter().enumerate() {
        let n = i + 1;
        if !has_type(question, "Question") {
            findings.push(Finding::error(
                "jsonld-faq",
                format!("FAQPage question {n} must have @type Question"),
            ));
            continue;
        }
        if is_missing(question.get("name")) {
            findings.push(Finding::error(
                "jsonld-faq",
                format!("FAQPage question {n} missing 'name'"),
            ));
        }
        match question.get("acceptedAnswer") {
            Some(answer) if has_type(answer, "Answer") => {
                if is_missing(answer.get("text")) {
                    findings.push(Finding::error(
                        "jsonld-faq",
                        format!("FAQPage question {n} answer missing 'text'"),
                    ));
                }
            }
            _ => findings.push(Finding::error(
                "jsonld-faq",
                format!("FAQPage question {n} needs an acceptedAnswer of @type Answer"),
            )),
        }
    }
}

fn check_address(object: &Map<String, Value>, findings: &mut Vec<Finding>) {
    let Some(address) = object.get("address").filter(|a| has_type(a, "PostalAddress")) else {
        findings.push(Finding::error(
            "jsonld-address",
            "LocalBusiness needs an 'address' of @type PostalAddress",
        ));
        return;
    };
    for field in ADDRESS_FIELDS {
        if is_missing(address.get(*field)) {
            findings.push(Finding::error(
                "jsonld-address",
                format!("LocalBusiness address missing '{field}'"),
            ));
        }
    }
}

/// String URLs carried by a property: a string, a list of strings or an
/// object with a `url` (e.g. `ImageObject`).
fn url_values(value: &Value) -> Vec<&str> {
    match value {
        Value::String(url) => vec![url.as_str()],
        Value::Array(items) => items.iter().flat_map(url_values).collect(),
        Value::Object(object) => object
            .get("url")
            .and_then(Value::as_str)
            .into_iter()
            .collect(),
        _ => Vec::new(),
    }
}

fn check_urls(object: &Map<String, Value>, findings: &mut Vec<Finding>) {
    for property in URL_PROPERTIES {
        let Some(value) = object.get(*property) else {
            continue;
        };
        for url in url_values(value) {
            if !is_url_shaped(url) {
                findings.push(Finding::warning(
                    "jsonld-url",
                    format!("Invalid URL format for '{property}': {url}"),
                ));
            } else if !url.to_ascii_lowercase().starts_with("https://") {
                findings.push(Finding::warning(
                    "jsonld-url",
                    format!("'{property}' should use HTTPS: {url}"),
                ));
            }
        }
    }
}

/// Validate every JSON-LD block of every page.
#[must_use]
pub fn check_structured_data(pages: &[Page]) -> Vec<Issue> {
    let mut issues = Vec::new();
    for page in pages {
        let blocks = extract_blocks(page.html());
        tracing::trace!(page = %page.route, blocks = blocks.len(), "json-ld blocks");
        for block in blocks {
            let line = page.target.line_of(block.offset);
            issues.extend(validate_block(block.body).into_iter().map(|finding| {
                Issue::new(
                    finding.rule_id,
                    STRUCTURED_DATA_CRITERION,
                    finding.severity,
                    &page.route,
                    finding.message,
                )
                .with_line(line)
            }));
        }
    }
    issues
}

#[cfg(test)]
#[path = "structured_data_tests.rs"]
mod tests;
