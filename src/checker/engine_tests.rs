use super::*;

fn flag_all(m: &RuleMatch<'_>) -> Verdict {
    Verdict::Violation(format!("found {}", m.text()))
}

fn flag_unless_labelled(m: &RuleMatch<'_>) -> Verdict {
    if m.context.contains("aria-label") {
        Verdict::Pass
    } else {
        Verdict::Violation("unlabelled".to_string())
    }
}

fn downgrade(_: &RuleMatch<'_>) -> Verdict {
    Verdict::ViolationAt(Severity::Warning, "soft".to_string())
}

fn echo_context(m: &RuleMatch<'_>) -> Verdict {
    Verdict::Violation(m.context.to_string())
}

fn rule(id: &'static str, pattern: &str, window: ContextWindow, classify: Classifier) -> Rule {
    Rule::new(id, "SC 0.0.0", Severity::Error, pattern, window, classify).unwrap()
}

#[test]
fn evaluate_reports_every_non_overlapping_match() {
    let target = ScanTarget::from_content("a.tsx", "<b>\n<b>\n<i>");
    let rules = [rule(
        "bold",
        "<b>",
        ContextWindow::Chars { before: 0, after: 0 },
        flag_all,
    )];

    let issues = evaluate(&target, &rules);

    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].line, Some(1));
    assert_eq!(issues[1].line, Some(2));
    assert_eq!(issues[0].message, "found <b>");
    assert_eq!(issues[0].source, "a.tsx");
}

#[test]
fn exception_in_context_window_suppresses_issue() {
    let target = ScanTarget::from_content("a.tsx", r#"<button aria-label="x">"#);
    let rules = [rule(
        "name",
        "<button",
        ContextWindow::Chars { before: 0, after: 40 },
        flag_unless_labelled,
    )];

    assert!(evaluate(&target, &rules).is_empty());
}

#[test]
fn context_outside_window_is_not_seen() {
    let target = ScanTarget::from_content("a.tsx", "<button>                    aria-label");
    let rules = [rule(
        "name",
        "<button",
        ContextWindow::Chars { before: 0, after: 5 },
        flag_unless_labelled,
    )];

    assert_eq!(evaluate(&target, &rules).len(), 1);
}

#[test]
fn verdict_can_override_severity() {
    let target = ScanTarget::from_content("a.tsx", "x");
    let rules = [rule(
        "soft",
        "x",
        ContextWindow::Chars { before: 0, after: 0 },
        downgrade,
    )];

    let issues = evaluate(&target, &rules);
    assert_eq!(issues[0].severity, Severity::Warning);
}

#[test]
fn line_window_takes_whole_lines() {
    let target = ScanTarget::from_content("a.ts", "one\ntwo\nTHREE\nfour\nfive");
    let rules = [rule(
        "ctx",
        "THREE",
        ContextWindow::Lines { before: 1, after: 1 },
        echo_context,
    )];

    let issues = evaluate(&target, &rules);
    assert_eq!(issues[0].message, "two\nTHREE\nfour\n");
    assert_eq!(issues[0].line, Some(3));
}

#[test]
fn line_window_clamps_at_file_edges() {
    let target = ScanTarget::from_content("a.ts", "FIRST\nsecond");
    let rules = [rule(
        "ctx",
        "FIRST",
        ContextWindow::Lines { before: 10, after: 10 },
        echo_context,
    )];

    let issues = evaluate(&target, &rules);
    assert_eq!(issues[0].message, "FIRST\nsecond");
}

#[test]
fn char_window_respects_utf8_boundaries() {
    let target = ScanTarget::from_content("a.tsx", "ééé<b>ééé");
    let rules = [rule(
        "ctx",
        "<b>",
        ContextWindow::Chars { before: 1, after: 1 },
        echo_context,
    )];

    let issues = evaluate(&target, &rules);
    assert_eq!(issues[0].message, "é<b>é");
}

#[test]
fn issues_sorted_by_line_then_rule_id() {
    let target = ScanTarget::from_content("a.tsx", "x y\nx");
    let window = ContextWindow::Chars { before: 0, after: 0 };
    let rules = [
        rule("zeta", "y", window, flag_all),
        rule("alpha", "x", window, flag_all),
    ];

    let ids: Vec<_> = evaluate(&target, &rules)
        .iter()
        .map(|i| (i.line, i.rule_id))
        .collect();
    assert_eq!(
        ids,
        vec![(Some(1), "alpha"), (Some(1), "zeta"), (Some(2), "alpha")]
    );
}

#[test]
fn snippet_is_matched_line() {
    let target = ScanTarget::from_content("a.tsx", "first\n   <img src=\"a.png\">   \nlast");
    let rules = [rule(
        "img",
        "<img",
        ContextWindow::Chars { before: 0, after: 0 },
        flag_all,
    )];

    let issues = evaluate(&target, &rules);
    assert_eq!(issues[0].snippet.as_deref(), Some("<img src=\"a.png\">"));
}

#[test]
fn invalid_pattern_is_reported() {
    let err = Rule::new(
        "bad",
        "SC 0",
        Severity::Error,
        "(unclosed",
        ContextWindow::Chars { before: 0, after: 0 },
        flag_all,
    )
    .unwrap_err();
    assert!(matches!(err, WcagGuardError::InvalidRegex { .. }));
}
