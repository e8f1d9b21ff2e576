//! Guideline 2.3 (Seizures and Physical Reactions): content that may flash
//! more than three times per second, and animation without a reduced
//! motion fallback.

use std::sync::LazyLock;

use regex::Regex;

use crate::checker::{
    Checker, ContextWindow, Issue, Rule, RuleMatch, Severity, Verdict, evaluate,
};
use crate::error::Result;
use crate::source::{FileKind, ScanTarget};

/// Cycles shorter than this can exceed three flashes per second.
const FLASH_THRESHOLD_MS: f64 = 333.0;

const NEARBY: ContextWindow = ContextWindow::Lines {
    before: 4,
    after: 5,
};

static VISIBILITY_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)opacity|visibility|display").expect("Invalid regex"));
static INFINITE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)infinite").expect("Invalid regex"));
static TOGGLE_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)toggle|opacity|visible|hidden|display|show|hide").expect("Invalid regex")
});
static ANIMATED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@keyframes|animation:").expect("Invalid regex"));
static REDUCED_MOTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)prefers-reduced-motion").expect("Invalid regex"));
static KEYFRAMES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@keyframes\s+[\w-]+").expect("Invalid regex"));

pub struct SeizuresChecker {
    rules: Vec<Rule>,
    allowlist: Vec<String>,
}

impl SeizuresChecker {
    /// # Errors
    /// Returns an error if a rule pattern fails to compile.
    pub fn new(allowlist: Vec<String>) -> Result<Self> {
        let rules = vec![
            Rule::new(
                "three-flashes",
                "SC 2.3.1",
                Severity::Error,
                r"(?im)^[^\n]*?\b(?:blink|flash|strobe)\b[^\n]*",
                ContextWindow::Chars {
                    before: 0,
                    after: 0,
                },
                classify_flash_word,
            )?,
            Rule::new(
                "three-flashes",
                "SC 2.3.1",
                Severity::Error,
                r"animation(?:-duration)?:\s*(?:[\w-]+\s+)?(\d+(?:\.\d+)?)(m?s)\b",
                NEARBY,
                classify_rapid_animation,
            )?,
            Rule::new(
                "three-flashes",
                "SC 2.3.1",
                Severity::Error,
                r"\bsetInterval\s*\([^,\n]*,\s*(\d+)\s*\)",
                NEARBY,
                classify_rapid_interval,
            )?,
        ];
        Ok(Self { rules, allowlist })
    }
}

impl Checker for SeizuresChecker {
    fn name(&self) -> &'static str {
        "seizures"
    }

    fn title(&self) -> &'static str {
        "WCAG 2.1 Guideline 2.3 - Seizures and Physical Reactions"
    }

    fn accepts(&self, _kind: FileKind) -> bool {
        true
    }

    fn check(&self, target: &ScanTarget) -> Vec<Issue> {
        if target.matches_any(&self.allowlist) {
            return Vec::new();
        }
        let mut issues = evaluate(target, &self.rules);
        issues.extend(check_reduced_motion(target));
        issues
    }
}

fn classify_flash_word(m: &RuleMatch<'_>) -> Verdict {
    // A system font stack, not an effect.
    if m.text().contains("BlinkMacSystemFont") {
        Verdict::Pass
    } else {
        Verdict::Violation(
            "Possible flashing or blinking content; it must not flash more than three times per second"
                .to_string(),
        )
    }
}

fn duration_ms(value: &str, unit: &str) -> Option<f64> {
    let value: f64 = value.parse().ok()?;
    Some(if unit == "ms" { value } else { value * 1000.0 })
}

fn classify_rapid_animation(m: &RuleMatch<'_>) -> Verdict {
    let Some(ms) = m
        .group(1)
        .zip(m.group(2))
        .and_then(|(value, unit)| duration_ms(value, unit))
    else {
        return Verdict::Pass;
    };
    let flashing = VISIBILITY_WORDS.is_match(m.context) && INFINITE.is_match(m.context);
    if ms < FLASH_THRESHOLD_MS && flashing {
        Verdict::Violation(format!(
            "Infinite {ms}ms animation of opacity or visibility could flash more than three times per second"
        ))
    } else {
        Verdict::Pass
    }
}

fn classify_rapid_interval(m: &RuleMatch<'_>) -> Verdict {
    let Some(ms) = m.group(1).and_then(|d| d.parse::<f64>().ok()) else {
        return Verdict::Pass;
    };
    if ms < FLASH_THRESHOLD_MS && TOGGLE_WORDS.is_match(m.context) {
        Verdict::Violation(format!(
            "setInterval every {ms}ms toggles visibility and could flash more than three times per second"
        ))
    } else {
        Verdict::Pass
    }
}

/// Stylesheets that animate without honouring `prefers-reduced-motion`,
/// reported once at the first keyframes block.
fn check_reduced_motion(target: &ScanTarget) -> Option<Issue> {
    if target.kind != FileKind::Style {
        return None;
    }
    let content = target.content.as_str();
    if !ANIMATED.is_match(content) || REDUCED_MOTION.is_match(content) {
        return None;
    }
    let keyframes = KEYFRAMES.find(content)?;
    let line = target.line_of(keyframes.start());
    Some(
        Issue::new(
            "reduced-motion",
            "SC 2.3.3",
            Severity::Warning,
            &target.relative,
            "Animations should be disabled under @media (prefers-reduced-motion: reduce)",
        )
        .with_line(line)
        .with_snippet(target.line_text(line)),
    )
}

#[cfg(test)]
#[path = "seizures_tests.rs"]
mod tests;
