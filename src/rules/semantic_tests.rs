use super::*;

fn levels(levels: &[u8]) -> Vec<Heading> {
    levels
        .iter()
        .enumerate()
        .map(|(i, &level)| Heading { level, line: i + 1 })
        .collect()
}

fn check(path: &str, src: &str) -> Vec<Issue> {
    let checker = SemanticChecker::new(&SemanticConfig::default(), Vec::new()).unwrap();
    checker.check(&ScanTarget::from_content(path, src))
}

#[test]
fn skipped_level_is_one_violation() {
    let violations = heading_violations(&levels(&[1, 2, 4]), false);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].line, Some(3));
    assert_eq!(violations[0].severity, Severity::Error);
}

#[test]
fn consecutive_levels_pass() {
    assert!(heading_violations(&levels(&[1, 2, 3]), false).is_empty());
    assert!(heading_violations(&levels(&[1, 2, 3, 2, 2, 3]), false).is_empty());
}

#[test]
fn first_heading_must_be_h1() {
    let violations = heading_violations(&levels(&[2, 3]), false);
    assert_eq!(violations.len(), 1);
    assert!(violations[0].message.contains("First heading is h2"));
}

#[test]
fn second_h1_is_reported_once() {
    let violations = heading_violations(&levels(&[1, 2, 1, 1]), false);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].line, Some(3));
    assert!(violations[0].message.contains("3 h1"));
}

#[test]
fn page_without_headings_warns() {
    let violations = heading_violations(&[], false);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].severity, Severity::Warning);
    assert_eq!(violations[0].line, None);

    assert!(heading_violations(&[], true).is_empty());
}

#[test]
fn implicit_h1_expects_h2_next() {
    assert!(heading_violations(&levels(&[2, 3]), true).is_empty());
    assert_eq!(heading_violations(&levels(&[3]), true).len(), 1);
}

#[test]
fn implicit_h1_plus_explicit_h1_is_multiple() {
    let violations = heading_violations(&levels(&[1]), true);
    assert_eq!(violations.len(), 1);
    assert!(violations[0].message.contains("2 h1"));
}

#[test]
fn page_detection() {
    let page = |path: &str| is_page(&ScanTarget::from_content(path, ""));
    assert!(page("pages/index.tsx"));
    assert!(page("src/pages/blog/[slug].tsx"));
    assert!(page("out/about.html"));
    assert!(!page("pages/api/contact.ts"));
    assert!(!page("pages/_app.tsx"));
    assert!(!page("pages/_document.tsx"));
    assert!(!page("components/Hero.tsx"));
}

#[test]
fn page_heading_jump_is_reported_on_its_line() {
    let src = "<Layout>\n  <h1>About</h1>\n  <h3>Team</h3>\n</Layout>";
    let issues = check("pages/about.tsx", src);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].rule_id, "heading-order");
    assert_eq!(issues[0].line, Some(3));
}

#[test]
fn components_are_not_checked_for_headings() {
    assert!(check("components/Card.tsx", "<h3>Title</h3>").is_empty());
}

#[test]
fn heading_component_and_as_prop_are_understood() {
    let src = "<PageHeader title=\"Jobs\" />\n<GradientHeader as=\"h2\">Open roles</GradientHeader>\n<h3>Berlin</h3>";
    assert!(check("pages/jobs.tsx", src).is_empty());

    let skipped = "<PageHeader title=\"Jobs\" />\n<GradientHeader as=\"h4\">Open roles</GradientHeader>";
    assert_eq!(check("pages/jobs.tsx", skipped).len(), 1);
}

#[test]
fn layout_requires_main_landmark() {
    let issues = check("components/Layout.tsx", "<div>{children}</div>");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].rule_id, "landmark");
    assert!(issues[0].message.contains("<main>"));

    assert!(check("components/Layout.tsx", "<main>{children}</main>").is_empty());
    assert!(check("components/Layout.tsx", "<div role=\"main\">{children}</div>").is_empty());
}

#[test]
fn landmark_file_match_is_exact() {
    assert!(check("components/MainLayout.tsx", "<div />").is_empty());
    assert_eq!(check("components/Footer.tsx", "<div />").len(), 1);
    assert!(check("components/Footer.tsx", "<footer>(c)</footer>").is_empty());
}

#[test]
fn nav_links_without_list_warn() {
    let issues = check(
        "components/Navigation.tsx",
        "<nav>\n  <a href=\"/\">Home</a>\n  <Link href=\"/jobs\">Jobs</Link>\n</nav>",
    );
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].rule_id, "nav-list");
    assert_eq!(issues[0].severity, Severity::Warning);

    let listed = "<nav><ul><li><a href=\"/\">Home</a></li></ul></nav>";
    assert!(check("components/Navigation.tsx", listed).is_empty());
}

#[test]
fn table_without_headers_is_error() {
    let issues = check("components/Prices.tsx", "<table><tr><td>1</td></tr></table>");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, Severity::Error);
}

#[test]
fn header_without_scope_warns_once() {
    let src = "<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>";
    let issues = check("components/Prices.tsx", src);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, Severity::Warning);

    let scoped = "<table><tr><th scope=\"col\">A</th></tr></table>";
    assert!(check("components/Prices.tsx", scoped).is_empty());
}

#[test]
fn table_with_child_rows_is_not_judged() {
    assert!(check("components/Table.tsx", "<table className=\"t\">{children}</table>").is_empty());
    assert!(check("components/Markdown.tsx", "table: (props) => <table {...props} />").is_empty());
}
