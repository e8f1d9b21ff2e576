//! SC 1.3.5 (Identify Input Purpose): `autocomplete` tokens.

use crate::checker::{
    Checker, ContextWindow, Issue, Rule, RuleMatch, Severity, Verdict, evaluate,
};
use crate::error::Result;
use crate::source::ScanTarget;

/// Autofill field names and the standalone tokens allowed by HTML.
const VALID_TOKENS: &[&str] = &[
    "name",
    "honorific-prefix",
    "given-name",
    "additional-name",
    "family-name",
    "honorific-suffix",
    "nickname",
    "username",
    "new-password",
    "current-password",
    "one-time-code",
    "organization-title",
    "organization",
    "street-address",
    "address-line1",
    "address-line2",
    "address-line3",
    "address-level4",
    "address-level3",
    "address-level2",
    "address-level1",
    "country",
    "country-name",
    "postal-code",
    "cc-name",
    "cc-given-name",
    "cc-additional-name",
    "cc-family-name",
    "cc-number",
    "cc-exp",
    "cc-exp-month",
    "cc-exp-year",
    "cc-csc",
    "cc-type",
    "transaction-currency",
    "transaction-amount",
    "language",
    "bday",
    "bday-day",
    "bday-month",
    "bday-year",
    "sex",
    "url",
    "photo",
    "tel",
    "tel-country-code",
    "tel-national",
    "tel-area-code",
    "tel-local",
    "tel-local-prefix",
    "tel-local-suffix",
    "tel-extension",
    "email",
    "impp",
    "on",
    "off",
    "shipping",
    "billing",
    "webauthn",
];

/// Contact modifiers; only valid in front of a field name.
const CONTACT_MODIFIERS: &[&str] = &["home", "work", "mobile", "fax", "pager"];

/// Frequent invented tokens and the field name meant.
const COMMON_MISTAKES: &[(&str, &str)] = &[
    ("phone", "tel"),
    ("telephone", "tel"),
    ("phone-number", "tel"),
    ("mobile", "tel"),
    ("e-mail", "email"),
    ("mail", "email"),
    ("zip", "postal-code"),
    ("zip-code", "postal-code"),
    ("zipcode", "postal-code"),
    ("postcode", "postal-code"),
    ("firstname", "given-name"),
    ("first-name", "given-name"),
    ("lastname", "family-name"),
    ("last-name", "family-name"),
    ("fullname", "name"),
    ("full-name", "name"),
    ("address", "street-address"),
    ("addr", "street-address"),
    ("city", "address-level2"),
    ("state", "address-level1"),
    ("region", "address-level1"),
    ("province", "address-level1"),
];

/// Tokens of `value` that are not valid autocomplete tokens, lowercased.
/// An empty value has none.
#[must_use]
pub fn invalid_tokens(value: &str) -> Vec<String> {
    let tokens: Vec<String> = value.split_whitespace().map(str::to_lowercase).collect();
    let last = tokens.len().saturating_sub(1);
    tokens
        .iter()
        .enumerate()
        .filter(|(i, token)| {
            let valid = VALID_TOKENS.contains(&token.as_str())
                || token.starts_with("section-")
                || (*i < last && CONTACT_MODIFIERS.contains(&token.as_str()));
            !valid
        })
        .map(|(_, token)| token.clone())
        .collect()
}

/// Field name a common mistake was meant to be.
#[must_use]
pub fn suggestion(token: &str) -> Option<&'static str> {
    COMMON_MISTAKES
        .iter()
        .find(|(wrong, _)| *wrong == token)
        .map(|(_, right)| *right)
}

pub struct AutocompleteChecker {
    rules: Vec<Rule>,
    allowlist: Vec<String>,
}

impl AutocompleteChecker {
    /// # Errors
    /// Returns an error if a rule pattern fails to compile.
    pub fn new(allowlist: Vec<String>) -> Result<Self> {
        let rules = vec![Rule::new(
            "autocomplete-valid",
            "SC 1.3.5",
            Severity::Error,
            r#"(?i)\bautocomplete\s*=\s*["']([^"']*)["']"#,
            ContextWindow::Chars {
                before: 0,
                after: 0,
            },
            classify_autocomplete,
        )?];
        Ok(Self { rules, allowlist })
    }
}

impl Checker for AutocompleteChecker {
    fn name(&self) -> &'static str {
        "autocomplete"
    }

    fn title(&self) -> &'static str {
        "WCAG 2.1 SC 1.3.5 - Identify Input Purpose"
    }

    fn check(&self, target: &ScanTarget) -> Vec<Issue> {
        if target.matches_any(&self.allowlist) {
            return Vec::new();
        }
        evaluate(target, &self.rules)
    }
}

fn classify_autocomplete(m: &RuleMatch<'_>) -> Verdict {
    let value = m.group(1).unwrap_or("");
    let invalid = invalid_tokens(value);
    if invalid.is_empty() {
        return Verdict::Pass;
    }
    let hints: Vec<String> = invalid
        .iter()
        .filter_map(|token| suggestion(token).map(|right| format!("'{token}' should be '{right}'")))
        .collect();
    let hint = if hints.is_empty() {
        "see the HTML autofill field names".to_string()
    } else {
        hints.join("; ")
    };
    Verdict::Violation(format!("Invalid autocomplete value \"{value}\": {hint}"))
}

#[cfg(test)]
#[path = "autocomplete_tests.rs"]
mod tests;
