//! Integration tests for the `contrast`, `images` and `og-images` commands.

mod common;

use common::TestFixture;
use predicates::prelude::*;

#[test]
fn default_palette_passes() {
    let fixture = TestFixture::new();

    wcag_guard!()
        .current_dir(fixture.path())
        .args(["--color", "never", "contrast"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary: 16 color pairs checked, 0 errors"));
}

#[test]
fn verbose_contrast_prints_every_case() {
    let fixture = TestFixture::new();

    wcag_guard!()
        .current_dir(fixture.path())
        .args(["--color", "never", "-v", "contrast"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Header Dark Mode (Large)"))
        .stdout(predicate::str::contains("(needs 3:1)  PASS"));
}

#[test]
fn failing_pair_from_config() {
    let fixture = TestFixture::new();
    fixture.create_config(
        r##"
[contrast.palette]
"sky" = "#36AADD"
"white" = "#FFFFFF"

[[contrast.cases]]
name = "Light Link"
foreground = "sky"
background = "white"
"##,
    );

    wcag_guard!()
        .current_dir(fixture.path())
        .args(["--color", "never", "contrast"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Light Link: sky on white is 2.64:1, needs 4.5:1"));
}

#[test]
fn unknown_palette_color_is_a_config_error() {
    let fixture = TestFixture::new();
    fixture.create_config(
        r#"
[[contrast.cases]]
name = "Brand"
foreground = "brand-500"
background = "white"
"#,
    );

    wcag_guard!()
        .current_dir(fixture.path())
        .args(["--color", "never", "contrast"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Unknown palette color"));
}

#[test]
fn no_config_ignores_broken_config() {
    let fixture = TestFixture::new();
    fixture.create_config("version = \"9\"\n");

    wcag_guard!()
        .current_dir(fixture.path())
        .args(["--no-config", "contrast"])
        .assert()
        .success();

    wcag_guard!()
        .current_dir(fixture.path())
        .args(["contrast"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unsupported config version"));
}

#[test]
fn images_report_format_and_budget() {
    let fixture = TestFixture::new();
    fixture.create_bytes("public/assets/hero.webp", &[0u8; 2048]);
    fixture.create_bytes("public/assets/team.jpg", &vec![0u8; 150 * 1024]);
    fixture.create_bytes("public/assets/logo.svg", &vec![0u8; 500 * 1024]);

    wcag_guard!()
        .current_dir(fixture.path())
        .args(["--color", "never", "images"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Image Optimization (2)"))
        .stdout(predicate::str::contains(
            "public/assets/team.jpg: .jpg image (150.0KB) should be converted to .webp",
        ))
        .stdout(predicate::str::contains(
            "public/assets/team.jpg: 150.0KB exceeds the 100.0KB budget by 50.0KB",
        ))
        .stdout(predicate::str::contains("Summary: 2 images checked"));
}

#[test]
fn images_without_asset_dir_pass() {
    let fixture = TestFixture::new();

    wcag_guard!()
        .current_dir(fixture.path())
        .args(["images"])
        .assert()
        .success();
}

fn write_preview(fixture: &TestFixture, relative: &str, width: u32, height: u32) {
    fixture.create_dir(relative.rsplit_once('/').map_or("", |(dir, _)| dir));
    image::RgbImage::new(width, height)
        .save(fixture.path().join(relative))
        .unwrap();
}

#[test]
fn og_images_report_dimensions() {
    let fixture = TestFixture::new();
    write_preview(&fixture, "public/assets/og-images/home/image.png", 1200, 630);
    write_preview(&fixture, "public/assets/og-images/blog/image.png", 1000, 500);

    wcag_guard!()
        .current_dir(fixture.path())
        .args(["--color", "never", "og-images"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Open Graph Images (1)"))
        .stdout(predicate::str::contains(
            "public/assets/og-images/blog/image.png: Image is 1000×500px, expected 1200×630px",
        ))
        .stdout(predicate::str::contains("Total size: "))
        .stdout(predicate::str::contains("Summary: 2 images checked"));
}

#[test]
fn og_images_without_asset_dir_fail() {
    let fixture = TestFixture::new();

    wcag_guard!()
        .current_dir(fixture.path())
        .args(["--color", "never", "og-images"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Asset directory not found"));
}
