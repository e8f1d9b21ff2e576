//! Integration tests for the source-tree commands.

mod common;

use common::{ACCESSIBLE_NAV, BARE_VIDEO, INACCESSIBLE_NAV, TestFixture};
use predicates::prelude::*;

#[test]
fn compatible_fails_on_unnamed_controls() {
    let fixture = TestFixture::new();
    fixture.create_file("components/Nav.tsx", INACCESSIBLE_NAV);

    wcag_guard!()
        .current_dir(fixture.path())
        .args(["--color", "never", "compatible"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("WCAG 2.1 Guideline 4.1 - Compatible"))
        .stdout(predicate::str::contains("SC 4.1.2 (2)"))
        .stdout(predicate::str::contains("components/Nav.tsx:4: <button>"))
        .stdout(predicate::str::contains("components/Nav.tsx:5: <a>"))
        .stdout(predicate::str::contains("✗ FAIL: 2 blocking issue(s) found"));
}

#[test]
fn clean_tree_passes_every_family() {
    let fixture = TestFixture::new();
    fixture.create_file("components/Nav.tsx", ACCESSIBLE_NAV);

    wcag_guard!()
        .current_dir(fixture.path())
        .args(["--color", "never", "source"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WCAG 2.1 Source Audit"))
        .stdout(predicate::str::contains("Summary: 1 files checked, 0 errors, 0 warnings"))
        .stdout(predicate::str::contains("✓ PASS"));
}

#[test]
fn excluded_directories_are_not_scanned() {
    let fixture = TestFixture::new();
    fixture.create_file("node_modules/lib/Nav.tsx", INACCESSIBLE_NAV);
    fixture.create_file("components/Nav.tsx", ACCESSIBLE_NAV);

    wcag_guard!()
        .current_dir(fixture.path())
        .args(["--color", "never", "compatible"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary: 1 files checked"));
}

#[test]
fn allowlisted_files_are_exempt() {
    let fixture = TestFixture::new();
    fixture.create_file("components/common/Nav.tsx", INACCESSIBLE_NAV);

    wcag_guard!()
        .current_dir(fixture.path())
        .args(["compatible"])
        .assert()
        .success();
}

#[test]
fn root_flag_selects_project() {
    let fixture = TestFixture::new();
    fixture.create_file("site/components/Intro.tsx", BARE_VIDEO);

    wcag_guard!()
        .current_dir(fixture.path())
        .args(["--color", "never", "--root", "site", "media"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("components/Intro.tsx:2"))
        .stdout(predicate::str::contains("SC 1.2.2"));
}

#[test]
fn json_output_is_machine_readable() {
    let fixture = TestFixture::new();
    fixture.create_file("components/Intro.tsx", BARE_VIDEO);

    let output = wcag_guard!()
        .current_dir(fixture.path())
        .args(["media", "--format", "json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"]["checked"], 1);
    assert_eq!(json["summary"]["passed"], false);
    let issues = json["issues"].as_array().unwrap();
    assert!(issues.iter().all(|i| i["source"] == "components/Intro.tsx"));
    assert!(issues.iter().any(|i| i["rule_id"] == "media-autoplay"));
}

#[test]
fn output_file_receives_report() {
    let fixture = TestFixture::new();
    fixture.create_file("components/Nav.tsx", ACCESSIBLE_NAV);

    wcag_guard!()
        .current_dir(fixture.path())
        .args(["--color", "never", "semantic", "--output", "reports/semantic.txt"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = std::fs::read_to_string(fixture.path().join("reports/semantic.txt")).unwrap();
    assert!(written.contains("SC 1.3.1 - Semantic Structure"));
}

#[test]
fn repeated_runs_are_identical() {
    let fixture = TestFixture::new();
    fixture.create_file("components/Nav.tsx", INACCESSIBLE_NAV);
    fixture.create_file("components/Intro.tsx", BARE_VIDEO);
    fixture.create_file("pages/about.tsx", "<h2>About</h2>\n<h4>Team</h4>\n");

    let run = || {
        wcag_guard!()
            .current_dir(fixture.path())
            .args(["--color", "never", "source"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn unreadable_file_warns_and_continues() {
    let fixture = TestFixture::new();
    fixture.create_bytes("components/Broken.tsx", &[0xff, 0xfe, 0x00]);
    fixture.create_file("components/Nav.tsx", INACCESSIBLE_NAV);

    wcag_guard!()
        .current_dir(fixture.path())
        .args(["--color", "never", "compatible"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Warning"))
        .stdout(predicate::str::contains("components/Broken.tsx: File could not be read"))
        .stdout(predicate::str::contains("components/Nav.tsx:4"));
}

#[test]
fn invalid_include_glob_is_a_precondition_error() {
    let fixture = TestFixture::new();
    fixture.create_config("[scanner]\ninclude = [\"**/*.{tsx\"]\n");

    wcag_guard!()
        .current_dir(fixture.path())
        .args(["--color", "never", "source"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid glob pattern"));
}

#[test]
fn verbose_logs_go_to_stderr() {
    let fixture = TestFixture::new();
    fixture.create_file("components/Nav.tsx", ACCESSIBLE_NAV);

    wcag_guard!()
        .current_dir(fixture.path())
        .env_remove("RUST_LOG")
        .args(["-v", "--color", "never", "media", "--format", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("collected files"))
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn navigable_flags_generic_link_text() {
    let fixture = TestFixture::new();
    fixture.create_file(
        "components/Teaser.tsx",
        "export const Teaser = () => (\n  <p>New case study. <a href=\"/cases/robotics\">Read more</a></p>\n);\n",
    );

    wcag_guard!()
        .current_dir(fixture.path())
        .args(["--color", "never", "navigable"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("WCAG 2.1 Guideline 2.4 - Navigable"))
        .stdout(predicate::str::contains(
            "components/Teaser.tsx:2: Link text \"Read more\" does not describe its destination",
        ));
}
