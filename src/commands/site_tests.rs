use std::fs;

use tempfile::TempDir;

use super::*;
use crate::checker::Severity;
use crate::error::WcagGuardError;

fn write(dir: &Path, relative: &str, content: &[u8]) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn sample_site() -> TempDir {
    let dir = TempDir::new().unwrap();
    let build = dir.path().join("build");
    write(
        &build,
        "index.html",
        br#"<html><head><title>Home</title></head><body>
<a href="/about">About</a>
<a href="/robots.txt">Robots</a>
<a href="/careers">Careers</a>
</body></html>"#,
    );
    write(
        &build,
        "about.html",
        br#"<html><head><title>About</title>
<script type="application/ld+json">{"@context": "https://schema.org", "@type": "Organization", "name": "Acme"}</script>
</head><body><a href="/">Home</a></body></html>"#,
    );
    write(&build, "_app.html", b"<html></html>");
    write(&dir.path().join("public"), "robots.txt", b"User-agent: *");
    dir
}

fn load(dir: &TempDir) -> SiteBuild {
    SiteBuild::load(&dir.path().join("build"), &dir.path().join("public")).unwrap()
}

#[test]
fn missing_build_dir_is_a_precondition_error() {
    let dir = TempDir::new().unwrap();
    let err = SiteBuild::load(&dir.path().join("out"), &dir.path().join("public")).unwrap_err();
    assert!(matches!(err, WcagGuardError::MissingBuildDir { .. }));
}

#[test]
fn empty_build_dir_is_a_precondition_error() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("out")).unwrap();
    let err = SiteBuild::load(&dir.path().join("out"), &dir.path().join("public")).unwrap_err();
    assert!(matches!(err, WcagGuardError::NoPages { .. }));
}

#[test]
fn links_report_flags_only_broken_links() {
    let dir = sample_site();
    let report = site_report(SiteCheck::Links, &load(&dir), &Config::default()).unwrap();

    assert_eq!(report.checked(), 3);
    let issues = report.sorted_issues();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].source, "/");
    assert_eq!(issues[0].line, Some(4));
    assert_eq!(issues[0].message, "Broken link to '/careers'");
}

#[test]
fn structured_data_report() {
    let dir = sample_site();
    let report = site_report(SiteCheck::StructuredData, &load(&dir), &Config::default()).unwrap();

    let issues = report.sorted_issues();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].source, "/about");
    assert_eq!(issues[0].rule_id, "jsonld-required");
    assert_eq!(issues[0].line, Some(2));
}

#[test]
fn seo_report_skips_framework_pages() {
    let dir = sample_site();
    let report = site_report(SiteCheck::Seo, &load(&dir), &Config::default()).unwrap();

    assert_eq!(report.checked(), 2);
    assert!(report.sorted_issues().iter().all(|i| i.source != "/_app"));
    assert!(report.has_blocking());
}

#[test]
fn unreadable_page_is_a_warning() {
    let dir = sample_site();
    write(&dir.path().join("build"), "broken.html", &[0xff, 0xfe, 0xfd]);

    let build = load(&dir);
    assert_eq!(build.page_files.len(), 4);
    assert_eq!(build.pages.len(), 3);

    let report = site_report(SiteCheck::StructuredData, &build, &Config::default()).unwrap();
    let read_errors: Vec<_> = report
        .sorted_issues()
        .into_iter()
        .filter(|i| i.rule_id == "read-error")
        .collect();
    assert_eq!(read_errors.len(), 1);
    assert_eq!(read_errors[0].source, "broken.html");
    assert_eq!(read_errors[0].severity, Severity::Warning);
}

#[test]
fn unreadable_page_still_counts_as_a_route() {
    let dir = sample_site();
    write(&dir.path().join("build"), "careers.html", &[0xff, 0xfe]);

    let report = site_report(SiteCheck::Links, &load(&dir), &Config::default()).unwrap();
    assert!(report.sorted_issues().iter().all(|i| i.rule_id != "broken-link"));
}
