use super::*;

fn issue(criterion: &'static str, source: &str, line: usize, severity: Severity) -> Issue {
    Issue::new("rule", criterion, severity, source, "message").with_line(line)
}

#[test]
fn empty_report_passes() {
    let report = Report::new("Empty", "files");
    assert!(report.is_empty());
    assert!(!report.has_blocking());
    assert_eq!(report.exit_code(), EXIT_SUCCESS);
}

#[test]
fn warnings_alone_do_not_block() {
    let mut report = Report::new("Warn", "files");
    report.push(issue("SC 1.3.1", "a.tsx", 1, Severity::Warning));

    assert_eq!(report.warning_count(), 1);
    assert_eq!(report.error_count(), 0);
    assert_eq!(report.exit_code(), EXIT_SUCCESS);
}

#[test]
fn any_error_blocks() {
    let mut report = Report::new("Fail", "files");
    report.push(issue("SC 1.3.1", "a.tsx", 1, Severity::Warning));
    report.push(issue("SC 4.1.2", "b.tsx", 3, Severity::Error));

    assert!(report.has_blocking());
    assert_eq!(report.exit_code(), EXIT_VIOLATIONS_FOUND);
}

#[test]
fn groups_are_ordered_by_criterion_then_file_then_line() {
    let mut report = Report::new("Order", "files");
    report.extend([
        issue("SC 4.1.2", "b.tsx", 9, Severity::Error),
        issue("SC 1.1.1", "z.tsx", 1, Severity::Error),
        issue("SC 4.1.2", "a.tsx", 7, Severity::Error),
        issue("SC 4.1.2", "a.tsx", 2, Severity::Error),
    ]);

    let groups = report.groups();
    let criteria: Vec<_> = groups.keys().copied().collect();
    assert_eq!(criteria, vec!["SC 1.1.1", "SC 4.1.2"]);

    let locations: Vec<_> = groups["SC 4.1.2"].iter().map(|i| i.location()).collect();
    assert_eq!(locations, vec!["a.tsx:2", "a.tsx:7", "b.tsx:9"]);
}

#[test]
fn ordering_is_independent_of_insertion_order() {
    let issues = vec![
        issue("SC 2.2.1", "t.tsx", 4, Severity::Error),
        Issue::new("beta", "SC 2.2.1", Severity::Error, "t.tsx", "m").with_line(4),
        issue("SC 1.3.5", "f.tsx", 1, Severity::Warning),
    ];

    let mut forward = Report::new("A", "files");
    forward.extend(issues.clone());
    let mut backward = Report::new("A", "files");
    backward.extend(issues.into_iter().rev());

    assert_eq!(forward.sorted_issues(), backward.sorted_issues());
}

#[test]
fn checked_counts_accumulate() {
    let mut report = Report::new("Count", "pages");
    report.add_checked(3);
    report.add_checked(2);
    assert_eq!(report.checked(), 5);
    assert_eq!(report.unit(), "pages");
}
