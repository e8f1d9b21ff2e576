//! Guideline 2.1 (Keyboard Accessible): pointer-only handlers, dialogs
//! without an escape route and single-character shortcuts.

use std::sync::LazyLock;

use regex::Regex;

use crate::checker::{
    Checker, ContextWindow, Issue, Rule, RuleMatch, Severity, Verdict, evaluate,
};
use crate::error::Result;
use crate::source::ScanTarget;

static KEY_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bonKey(?:Down|Press|Up)\s*=").expect("Invalid regex"));
static BUTTON_ROLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\brole\s*=\s*["']button["']"#).expect("Invalid regex"));
static NATIVE_CONTROL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(?:button|Button|Link|input|select|textarea)\b|<a[\s>]").expect("Invalid regex")
});
static CLICK_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bonClick\s*=").expect("Invalid regex"));
static FOCUS_EQUIVALENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bonFocus\s*=|\ballowHover\s*=\s*\{?\s*true|<Menu\b").expect("Invalid regex")
});
static CLOSE_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:onClose|handler)\s*=").expect("Invalid regex"));
static HEADLESS_UI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"from\s+["']@headlessui/react["']"#).expect("Invalid regex")
});
static MODIFIER_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:ctrlKey|altKey|metaKey|shiftKey)\b").expect("Invalid regex")
});
static TEXT_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:<(?:input|textarea|select)\b)|tagName[^\n]*?(?:INPUT|TEXTAREA)")
        .expect("Invalid regex")
});

pub struct KeyboardChecker {
    rules: Vec<Rule>,
    allowlist: Vec<String>,
}

impl KeyboardChecker {
    /// # Errors
    /// Returns an error if a rule pattern fails to compile.
    pub fn new(allowlist: Vec<String>) -> Result<Self> {
        let rules = vec![
            Rule::new(
                "keyboard-handler",
                "SC 2.1.1",
                Severity::Error,
                r"<(?:div|span)\b[^>\n]*\bonClick\s*=",
                ContextWindow::Lines {
                    before: 4,
                    after: 5,
                },
                classify_click_handler,
            )?,
            Rule::new(
                "focusable-handler",
                "SC 2.1.1",
                Severity::Error,
                r#"\btabIndex\s*=\s*["'{]\s*0\s*["'}]"#,
                ContextWindow::Lines {
                    before: 9,
                    after: 10,
                },
                classify_focusable,
            )?,
            Rule::new(
                "hover-focus",
                "SC 2.1.1",
                Severity::Error,
                r"\bonMouseEnter\s*=",
                ContextWindow::Lines {
                    before: 4,
                    after: 5,
                },
                classify_hover,
            )?,
            Rule::new(
                "dialog-escape",
                "SC 2.1.2",
                Severity::Error,
                r"<(?:Dialog|Modal)[\s/>]",
                ContextWindow::Lines {
                    before: 4,
                    after: 50,
                },
                classify_dialog,
            )?,
            Rule::new(
                "character-shortcut",
                "SC 2.1.4",
                Severity::Error,
                r#"\b(?:key|keyCode)\s*===?\s*(?:["']([A-Za-z])["']|(6[5-9]|[78][0-9]|90)\b)"#,
                ContextWindow::Lines {
                    before: 2,
                    after: 3,
                },
                classify_shortcut,
            )?,
        ];
        Ok(Self { rules, allowlist })
    }
}

impl Checker for KeyboardChecker {
    fn name(&self) -> &'static str {
        "keyboard"
    }

    fn title(&self) -> &'static str {
        "WCAG 2.1 Guideline 2.1 - Keyboard Accessible"
    }

    fn check(&self, target: &ScanTarget) -> Vec<Issue> {
        if target.matches_any(&self.allowlist) {
            return Vec::new();
        }
        evaluate(target, &self.rules)
    }
}

fn classify_click_handler(m: &RuleMatch<'_>) -> Verdict {
    let ctx = m.context;
    if KEY_HANDLER.is_match(ctx) || BUTTON_ROLE.is_match(ctx) || NATIVE_CONTROL.is_match(ctx) {
        Verdict::Pass
    } else {
        Verdict::Violation(
            "Click handler on a non-interactive element has no keyboard equivalent; use a <button> or add onKeyDown".to_string(),
        )
    }
}

fn classify_focusable(m: &RuleMatch<'_>) -> Verdict {
    let ctx = m.context;
    if KEY_HANDLER.is_match(ctx) || CLICK_HANDLER.is_match(ctx) || NATIVE_CONTROL.is_match(ctx) {
        Verdict::Pass
    } else {
        Verdict::Violation(
            "Element is focusable with tabIndex={0} but does nothing from the keyboard".to_string(),
        )
    }
}

fn classify_hover(m: &RuleMatch<'_>) -> Verdict {
    if FOCUS_EQUIVALENT.is_match(m.context) {
        Verdict::Pass
    } else {
        Verdict::Violation(
            "Hover behaviour has no focus equivalent; pair onMouseEnter with onFocus".to_string(),
        )
    }
}

fn classify_dialog(m: &RuleMatch<'_>) -> Verdict {
    // Headless UI dialogs close on Escape by themselves.
    if CLOSE_HANDLER.is_match(m.context) || HEADLESS_UI.is_match(m.content()) {
        Verdict::Pass
    } else {
        Verdict::Violation(
            "Dialog has no close handler; keyboard users may be trapped inside it".to_string(),
        )
    }
}

fn classify_shortcut(m: &RuleMatch<'_>) -> Verdict {
    if MODIFIER_KEY.is_match(m.context) || TEXT_ENTRY.is_match(m.context) {
        return Verdict::Pass;
    }
    let key = m
        .group(1)
        .map_or_else(|| format!("keyCode {}", m.group(2).unwrap_or("?")), |k| format!("'{k}'"));
    Verdict::Violation(format!(
        "Single-character shortcut {key} has no modifier; provide a way to turn it off or remap it"
    ))
}

#[cfg(test)]
#[path = "keyboard_tests.rs"]
mod tests;
