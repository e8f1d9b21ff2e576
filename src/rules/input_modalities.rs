//! Guideline 2.5 (Input Modalities): multipoint gestures, down-event
//! actions, accessible names that hide the visible label, motion input and
//! input-method detection.

use std::sync::LazyLock;

use regex::Regex;

use crate::checker::{
    Checker, ContextWindow, Issue, Rule, RuleMatch, Severity, Verdict, evaluate,
};
use crate::error::Result;
use crate::source::ScanTarget;

use super::markup::{element_inner, find_tags, visible_text};

/// Bound on button content scanned for visible text.
const INNER_LIMIT: usize = 2000;

static SINGLE_POINTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bon(?:Click|PointerDown)\s*=").expect("Invalid regex"));
static PRESS_FEEDBACK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)setFocus|setActive|setHover|highlight").expect("Invalid regex")
});
static UI_ALTERNATIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[Bb]utton|\bonClick\s*=|<input").expect("Invalid regex"));
static RESTRICTS_INPUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)return\s+null|disabled\s*=\s*\{?\s*true|display:\s*none").expect("Invalid regex")
});

pub struct InputModalitiesChecker {
    rules: Vec<Rule>,
    allowlist: Vec<String>,
}

impl InputModalitiesChecker {
    /// # Errors
    /// Returns an error if a rule pattern fails to compile.
    pub fn new(allowlist: Vec<String>) -> Result<Self> {
        let rules = vec![
            Rule::new(
                "pointer-gestures",
                "SC 2.5.1",
                Severity::Error,
                r"\btouches\.length\s*(?:>\s*1|>=\s*2|===?\s*2)",
                ContextWindow::Lines {
                    before: 9,
                    after: 10,
                },
                classify_gesture,
            )?,
            Rule::new(
                "pointer-cancellation",
                "SC 2.5.2",
                Severity::Error,
                r"(?i)\b(onMouseDown|onPointerDown|onTouchStart)\s*=\s*\{[^}\n]*(?:submit|delete|send|post|update|save|create)[^}\n]*\}",
                ContextWindow::Lines {
                    before: 2,
                    after: 3,
                },
                classify_down_event,
            )?,
            Rule::new(
                "motion-actuation",
                "SC 2.5.4",
                Severity::Error,
                r"(?im)^[^\n]*?(devicemotion|deviceorientation|accelerometer|gyroscope)[^\n]*",
                ContextWindow::Lines {
                    before: 14,
                    after: 15,
                },
                classify_motion,
            )?,
            Rule::new(
                "concurrent-input",
                "SC 2.5.6",
                Severity::Warning,
                r"(?im)^[^\n]*?(isTouchDevice[^\n]*?return|matchMedia[^\n]*?pointer[^\n]*?coarse|ontouchstart[^\n]*?in[^\n]*?window)[^\n]*",
                ContextWindow::Lines {
                    before: 4,
                    after: 10,
                },
                classify_input_detection,
            )?,
        ];
        Ok(Self { rules, allowlist })
    }
}

impl Checker for InputModalitiesChecker {
    fn name(&self) -> &'static str {
        "input-modalities"
    }

    fn title(&self) -> &'static str {
        "WCAG 2.1 Guideline 2.5 - Input Modalities"
    }

    fn check(&self, target: &ScanTarget) -> Vec<Issue> {
        if target.matches_any(&self.allowlist) {
            return Vec::new();
        }
        let mut issues = evaluate(target, &self.rules);
        issues.extend(check_label_in_name(target));
        issues
    }
}

fn classify_gesture(m: &RuleMatch<'_>) -> Verdict {
    if SINGLE_POINTER.is_match(m.context) {
        Verdict::Pass
    } else {
        Verdict::Violation(
            "Multipoint gesture has no single-pointer alternative such as a button or onClick".to_string(),
        )
    }
}

fn classify_down_event(m: &RuleMatch<'_>) -> Verdict {
    // Visual press feedback on the down event is fine.
    if PRESS_FEEDBACK.is_match(m.context) {
        return Verdict::Pass;
    }
    let event = m.group(1).unwrap_or("down event");
    Verdict::Violation(format!(
        "{event} triggers an action on the down event; use onClick so it can be cancelled"
    ))
}

fn classify_motion(m: &RuleMatch<'_>) -> Verdict {
    if UI_ALTERNATIVE.is_match(m.context) {
        return Verdict::Pass;
    }
    let source = match m.group(1).map(str::to_ascii_lowercase).as_deref() {
        Some("devicemotion") => "devicemotion event",
        Some("deviceorientation") => "deviceorientation event",
        Some("accelerometer") => "accelerometer API",
        _ => "gyroscope API",
    };
    Verdict::Violation(format!(
        "Functionality driven by the {source} needs a UI alternative and a way to disable motion input"
    ))
}

fn classify_input_detection(m: &RuleMatch<'_>) -> Verdict {
    if !RESTRICTS_INPUT.is_match(m.context) {
        return Verdict::Pass;
    }
    let detection = m.group(1).unwrap_or("").to_ascii_lowercase();
    let description = if detection.starts_with("istouchdevice") {
        "Touch device detection"
    } else if detection.starts_with("matchmedia") {
        "Pointer type detection"
    } else {
        "Touch capability detection"
    };
    Verdict::Violation(format!(
        "{description} is used to restrict functionality; allow concurrent input methods"
    ))
}

/// Buttons whose `aria-label` does not contain their visible text, so
/// speech users saying the visible label miss the control.
fn check_label_in_name(target: &ScanTarget) -> Vec<Issue> {
    let content = target.content.as_str();
    find_tags(content, "button")
        .into_iter()
        .filter(|tag| !tag.self_closing)
        .filter_map(|tag| {
            let label = tag.attr_text("aria-label")?.trim().to_lowercase();
            let text = visible_text(element_inner(content, &tag, INNER_LIMIT)?).to_lowercase();
            // Dynamic text cannot be compared.
            if text.contains("{…}") || text.chars().count() <= 2 {
                return None;
            }
            if label.contains(&text) || text.contains(&label) {
                return None;
            }
            let line = target.line_of(tag.start);
            Some(
                Issue::new(
                    "label-in-name",
                    "SC 2.5.3",
                    Severity::Error,
                    &target.relative,
                    format!("aria-label \"{label}\" does not contain the visible text \"{text}\""),
                )
                .with_line(line)
                .with_snippet(target.line_text(line)),
            )
        })
        .collect()
}

#[cfg(test)]
#[path = "input_modalities_tests.rs"]
mod tests;
