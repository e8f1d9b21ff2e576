//! Text alternatives for images, icon-only controls and share buttons.

use crate::checker::{
    Checker, ContextWindow, Issue, Rule, RuleMatch, Severity, Verdict, evaluate,
};
use crate::error::Result;
use crate::source::ScanTarget;

use super::markup::{OpenTag, element_inner, find_tags, open_tag_at, visible_text};

const WINDOW: ContextWindow = ContextWindow::Chars {
    before: 0,
    after: 200,
};

pub struct TextAlternativesChecker {
    rules: Vec<Rule>,
    allowlist: Vec<String>,
}

impl TextAlternativesChecker {
    /// # Errors
    /// Returns an error if a rule pattern fails to compile.
    pub fn new(allowlist: Vec<String>) -> Result<Self> {
        let rules = vec![
            Rule::new(
                "img-alt",
                "SC 1.1.1",
                Severity::Error,
                r"<(?:img|Image)[\s/>]",
                WINDOW,
                classify_image,
            )?,
            Rule::new(
                "icon-button",
                "SC 4.1.2",
                Severity::Warning,
                r"(?i)<button[\s>]",
                WINDOW,
                classify_icon_button,
            )?,
            Rule::new(
                "share-button-label",
                "SC 2.4.4",
                Severity::Error,
                r"<[A-Z][A-Za-z]*ShareButton[\s/>]",
                WINDOW,
                classify_share_button,
            )?,
        ];
        Ok(Self { rules, allowlist })
    }
}

impl Checker for TextAlternativesChecker {
    fn name(&self) -> &'static str {
        "text-alternatives"
    }

    fn title(&self) -> &'static str {
        "WCAG 2.1 SC 1.1.1 - Text Alternatives"
    }

    fn check(&self, target: &ScanTarget) -> Vec<Issue> {
        if target.matches_any(&self.allowlist) {
            return Vec::new();
        }
        evaluate(target, &self.rules)
    }
}

/// Spread props may carry any attribute.
fn has_spread(content: &str, tag: &OpenTag<'_>) -> bool {
    content[tag.start..tag.end].contains("{...")
}

fn classify_image(m: &RuleMatch<'_>) -> Verdict {
    let content = m.content();
    let Some(tag) = open_tag_at(content, m.start) else {
        return Verdict::Pass;
    };
    // An empty alt marks the image as decorative.
    if tag.has_attr("alt") || has_spread(content, &tag) {
        Verdict::Pass
    } else {
        Verdict::Violation(format!(
            "<{}> has no alt attribute (use alt=\"\" for decorative images)",
            tag.name
        ))
    }
}

fn classify_icon_button(m: &RuleMatch<'_>) -> Verdict {
    let content = m.content();
    let Some(tag) = open_tag_at(content, m.start) else {
        return Verdict::Pass;
    };
    if tag.is_component() || tag.has_aria_name() || tag.has_value("title") {
        return Verdict::Pass;
    }
    let Some(inner) = element_inner(content, &tag, 2000) else {
        return Verdict::Pass;
    };
    let has_icon = !find_tags(inner, "svg").is_empty()
        || !find_tags(inner, "img").is_empty()
        || has_component_with_suffix(inner, "Icon");
    if has_icon && visible_text(inner).is_empty() {
        Verdict::Violation(
            "Icon-only button needs aria-label, title or visible text".to_string(),
        )
    } else {
        Verdict::Pass
    }
}

/// True when `inner` contains a component whose name ends with `suffix`,
/// such as `<CloseIcon />`.
fn has_component_with_suffix(inner: &str, suffix: &str) -> bool {
    inner.match_indices('<').any(|(at, _)| {
        open_tag_at(inner, at).is_some_and(|t| t.is_component() && t.name.ends_with(suffix))
    })
}

fn classify_share_button(m: &RuleMatch<'_>) -> Verdict {
    let Some(tag) = open_tag_at(m.content(), m.start) else {
        return Verdict::Pass;
    };
    if tag.has_aria_name() {
        Verdict::Pass
    } else {
        Verdict::Violation(format!("<{}> needs an aria-label", tag.name))
    }
}

#[cfg(test)]
#[path = "text_alternatives_tests.rs"]
mod tests;
