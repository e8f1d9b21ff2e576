//! Guideline 4.1 (Compatible): accessible names, ARIA usage and status
//! messages.

use regex::Regex;

use crate::checker::engine::{ceil_boundary, floor_boundary};
use crate::checker::{
    Checker, ContextWindow, Issue, Rule, RuleMatch, Severity, Verdict, evaluate,
};
use crate::error::Result;
use crate::source::ScanTarget;

use super::markup::{ElementRole, OpenTag, ancestors, element_role, enclosing_open_tag, open_tag_at};
use super::{compile, content_names, has_label, is_hidden_input, label_targets};

const NAME_CRITERION: &str = "SC 4.1.2";
const STATUS_CRITERION: &str = "SC 4.1.3";

/// How far back the open-element stack is reconstructed.
const PARENT_WINDOW: usize = 2000;

/// Distance around a state update searched for message vocabulary.
const STATUS_WINDOW: usize = 200;

/// ARIA state attribute -> roles that support it.
const ARIA_ATTRIBUTE_ROLES: &[(&str, &[&str])] = &[
    (
        "aria-expanded",
        &[
            "application",
            "button",
            "checkbox",
            "combobox",
            "gridcell",
            "link",
            "listbox",
            "menuitem",
            "menuitemcheckbox",
            "menuitemradio",
            "row",
            "rowheader",
            "columnheader",
            "tab",
            "treeitem",
            "switch",
        ],
    ),
    ("aria-pressed", &["button"]),
    (
        "aria-checked",
        &[
            "checkbox",
            "menuitemcheckbox",
            "menuitemradio",
            "option",
            "radio",
            "switch",
            "treeitem",
        ],
    ),
    (
        "aria-selected",
        &[
            "gridcell",
            "option",
            "row",
            "tab",
            "columnheader",
            "rowheader",
            "treeitem",
        ],
    ),
    (
        "aria-valuenow",
        &[
            "progressbar",
            "scrollbar",
            "slider",
            "spinbutton",
            "meter",
            "separator",
        ],
    ),
    (
        "aria-required",
        &[
            "checkbox",
            "combobox",
            "gridcell",
            "listbox",
            "radiogroup",
            "spinbutton",
            "textbox",
            "tree",
            "columnheader",
            "rowheader",
            "searchbox",
        ],
    ),
    ("aria-multiselectable", &["grid", "listbox", "tablist", "tree"]),
];

/// Child role -> roles one of its ancestors must carry.
const REQUIRED_PARENT_ROLES: &[(&str, &[&str])] = &[
    ("menuitem", &["menu", "menubar", "group"]),
    ("menuitemcheckbox", &["menu", "menubar", "group"]),
    ("menuitemradio", &["menu", "menubar", "group"]),
    ("tab", &["tablist"]),
    ("listitem", &["list"]),
    ("option", &["listbox", "group"]),
    ("treeitem", &["tree", "group"]),
    ("row", &["table", "grid", "treegrid", "rowgroup"]),
    ("cell", &["row"]),
    ("gridcell", &["row"]),
    ("columnheader", &["row"]),
    ("rowheader", &["row"]),
];

const NATIVE_INTERACTIVE: &[&str] = &["button", "a", "input", "select", "textarea"];

pub struct CompatibleChecker {
    rules: Vec<Rule>,
    state_update: Regex,
    message_word: Regex,
    status_region: Regex,
    lowercase_tag: Regex,
    allowlist: Vec<String>,
}

impl CompatibleChecker {
    /// # Errors
    /// Returns an error if a rule pattern fails to compile.
    pub fn new(allowlist: Vec<String>) -> Result<Self> {
        let tag_window = ContextWindow::Chars {
            before: 0,
            after: 200,
        };
        let rules = vec![
            Rule::new(
                "interactive-name",
                NAME_CRITERION,
                Severity::Error,
                r"(?i)<(?:button|a|input|select|textarea)[\s>/]",
                tag_window,
                classify_native_name,
            )?,
            Rule::new(
                "interactive-name",
                NAME_CRITERION,
                Severity::Error,
                r#"(?i)\brole\s*=\s*["'](button|link|tab|menuitem|option)["']"#,
                tag_window,
                classify_role_name,
            )?,
            Rule::new(
                "dialog-name",
                NAME_CRITERION,
                Severity::Error,
                r#"(?i)\brole\s*=\s*["'](dialog|alertdialog)["']"#,
                tag_window,
                classify_dialog_name,
            )?,
            Rule::new(
                "aria-attribute-role",
                NAME_CRITERION,
                Severity::Error,
                r"(?i)\b(aria-(?:expanded|pressed|checked|selected|valuenow|required|multiselectable))\s*=",
                tag_window,
                classify_attribute_role,
            )?,
            Rule::new(
                "aria-role-parent",
                NAME_CRITERION,
                Severity::Error,
                r#"(?i)\brole\s*=\s*["'](menuitem|menuitemcheckbox|menuitemradio|tab|listitem|option|treeitem|row|cell|gridcell|columnheader|rowheader)["']"#,
                tag_window,
                classify_role_parent,
            )?,
        ];
        Ok(Self {
            rules,
            state_update: compile(r"\bset[A-Z]\w*\(|\bsetState\(|\bdispatch\(|\bfetch\(")?,
            message_word: compile(r"(?i)\b(?:error|success|message|status|alert|toast)\b")?,
            status_region: compile(r#"(?i)aria-live\s*=|\brole\s*=\s*["'](?:status|alert)["']"#)?,
            lowercase_tag: compile(r"<[a-z]")?,
            allowlist,
        })
    }

    /// One issue per file that updates message-like state without any live
    /// region to announce it.
    fn check_status_messages(&self, target: &ScanTarget) -> Option<Issue> {
        let content = target.content.as_str();
        let near_message = self.state_update.find_iter(content).any(|m| {
            let from = floor_boundary(content, m.start().saturating_sub(STATUS_WINDOW));
            let to = ceil_boundary(content, m.end() + STATUS_WINDOW);
            self.message_word.is_match(&content[from..to])
        });
        if !near_message || self.status_region.is_match(content) {
            return None;
        }
        Some(
            Issue::new(
                "status-messages",
                STATUS_CRITERION,
                Severity::Error,
                &target.relative,
                "State updates near message-like text but no aria-live or role=\"status\"/\"alert\" region announces them",
            )
            .with_line(1),
        )
    }
}

impl Checker for CompatibleChecker {
    fn name(&self) -> &'static str {
        "compatible"
    }

    fn title(&self) -> &'static str {
        "WCAG 2.1 Guideline 4.1 - Compatible"
    }

    fn check(&self, target: &ScanTarget) -> Vec<Issue> {
        if target.matches_any(&self.allowlist) {
            return Vec::new();
        }
        // Files without lowercase tags carry no markup, only generics.
        if !self.lowercase_tag.is_match(&target.content) {
            return Vec::new();
        }
        let mut issues = evaluate(target, &self.rules);
        issues.extend(self.check_status_messages(target));
        issues
    }
}

const NAME_MESSAGE: &str = "Interactive element has no accessible name (aria-label, aria-labelledby or visible text)";

fn classify_native_name(m: &RuleMatch<'_>) -> Verdict {
    let content = m.content();
    let Some(tag) = open_tag_at(content, m.start) else {
        return Verdict::Pass;
    };
    if tag.is_component() || (tag.is_named("a") && !tag.has_attr("href")) {
        return Verdict::Pass;
    }
    if has_accessible_name(content, &tag) {
        Verdict::Pass
    } else {
        Verdict::Violation(format!("<{}>: {NAME_MESSAGE}", tag.name))
    }
}

fn classify_role_name(m: &RuleMatch<'_>) -> Verdict {
    let content = m.content();
    let Some(tag) = enclosing_open_tag(content, m.start) else {
        return Verdict::Pass;
    };
    // Native controls are covered by the tag rule.
    if tag.is_component() || NATIVE_INTERACTIVE.iter().any(|n| tag.is_named(n)) {
        return Verdict::Pass;
    }
    if has_accessible_name(content, &tag) {
        Verdict::Pass
    } else {
        let role = m.group(1).unwrap_or("");
        Verdict::Violation(format!("role=\"{role}\": {NAME_MESSAGE}"))
    }
}

fn has_accessible_name(content: &str, tag: &OpenTag<'_>) -> bool {
    if tag.has_aria_name() {
        return true;
    }
    let is_form_control = ["input", "select", "textarea"]
        .iter()
        .any(|n| tag.is_named(n));
    if tag.is_named("input") && input_names_itself(tag) {
        return true;
    }
    if is_form_control {
        return has_label(content, tag, &label_targets(content));
    }
    content_names(content, tag)
}

fn input_names_itself(tag: &OpenTag<'_>) -> bool {
    if is_hidden_input(tag) {
        return true;
    }
    let kind = tag.attr_text("type").unwrap_or("text").to_ascii_lowercase();
    match kind.as_str() {
        "submit" | "reset" => true,
        "button" => tag.has_value("value"),
        "image" => tag.has_value("alt"),
        _ => false,
    }
}

fn classify_dialog_name(m: &RuleMatch<'_>) -> Verdict {
    let Some(tag) = enclosing_open_tag(m.content(), m.start) else {
        return Verdict::Pass;
    };
    if tag.has_aria_name() {
        return Verdict::Pass;
    }
    let role = m.group(1).unwrap_or("dialog");
    Verdict::Violation(format!(
        "Element with role=\"{role}\" needs an accessible name (aria-label or aria-labelledby)"
    ))
}

fn classify_attribute_role(m: &RuleMatch<'_>) -> Verdict {
    let Some(attr) = m.group(1) else {
        return Verdict::Pass;
    };
    let Some(tag) = enclosing_open_tag(m.content(), m.start) else {
        return Verdict::Pass;
    };
    let attr = attr.to_ascii_lowercase();
    let Some((_, allowed)) = ARIA_ATTRIBUTE_ROLES.iter().find(|(a, _)| *a == attr) else {
        return Verdict::Pass;
    };
    match element_role(&tag) {
        ElementRole::Role(role) if allowed.iter().any(|r| r.eq_ignore_ascii_case(role)) => {
            Verdict::Pass
        }
        ElementRole::Role(role) => Verdict::Violation(format!(
            "{attr} is not supported by role \"{role}\" (allowed: {})",
            allowed.join(", ")
        )),
        ElementRole::Opaque => Verdict::Pass,
        // Input types without a mapped role are left alone.
        ElementRole::NoRole if tag.is_named("input") => Verdict::Pass,
        ElementRole::NoRole => Verdict::Violation(format!(
            "{attr} on <{}> has no supporting role (allowed: {})",
            tag.name,
            allowed.join(", ")
        )),
    }
}

fn classify_role_parent(m: &RuleMatch<'_>) -> Verdict {
    let Some(role) = m.group(1).map(str::to_ascii_lowercase) else {
        return Verdict::Pass;
    };
    let Some((_, parents)) = REQUIRED_PARENT_ROLES.iter().find(|(r, _)| *r == role) else {
        return Verdict::Pass;
    };
    let content = m.content();
    let Some(tag) = enclosing_open_tag(content, m.start) else {
        return Verdict::Pass;
    };
    let stack = ancestors(content, tag.start, PARENT_WINDOW);
    // A component root: its container lives in another file.
    if stack.is_empty() {
        return Verdict::Pass;
    }
    let satisfied = stack.iter().rev().any(|ancestor| {
        ancestor.is_component()
            || match element_role(ancestor) {
                ElementRole::Role(r) => parents.iter().any(|p| p.eq_ignore_ascii_case(r)),
                ElementRole::Opaque => true,
                ElementRole::NoRole => false,
            }
    });
    if satisfied {
        Verdict::Pass
    } else {
        Verdict::Violation(format!(
            "role=\"{role}\" must be contained in an element with role {}",
            parents.join("/")
        ))
    }
}

#[cfg(test)]
#[path = "compatible_tests.rs"]
mod tests;
