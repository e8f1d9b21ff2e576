use std::path::Path;

use super::*;
use tempfile::TempDir;

fn write_bytes(root: &Path, relative: &str, len: usize) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, vec![0u8; len]).unwrap();
}

fn rules(scan: &ImageScan) -> Vec<(&str, &'static str)> {
    scan.issues
        .iter()
        .map(|i| (i.source.as_str(), i.rule_id))
        .collect()
}

#[test]
fn human_size_units() {
    assert_eq!(human_size(512), "512B");
    assert_eq!(human_size(1536), "1.5KB");
    assert_eq!(human_size(102_400), "100.0KB");
    assert_eq!(human_size(3 * 1024 * 1024), "3.0MB");
}

#[test]
fn extension_filter_ignores_case_and_dots() {
    let filter = ExtensionFilter::new(&[".PNG".to_string(), "webp".to_string()]);
    assert!(filter.should_include(Path::new("a/hero.png")));
    assert!(filter.should_include(Path::new("a/hero.WEBP")));
    assert!(!filter.should_include(Path::new("a/readme.md")));
    assert!(!filter.should_include(Path::new("a/noext")));
}

#[test]
fn optimized_images_pass() {
    let dir = TempDir::new().unwrap();
    write_bytes(dir.path(), "public/assets/hero.webp", 2048);
    write_bytes(dir.path(), "public/assets/logo.svg", 500_000);

    let scan = check_images(dir.path(), &ImagesConfig::default()).unwrap();
    assert_eq!(scan.checked, 1);
    assert!(scan.issues.is_empty());
}

#[test]
fn wrong_format_and_oversize_are_errors() {
    let dir = TempDir::new().unwrap();
    write_bytes(dir.path(), "public/assets/team/photo.jpg", 200 * 1024);
    write_bytes(dir.path(), "public/assets/banner.webp", 150 * 1024);

    let scan = check_images(dir.path(), &ImagesConfig::default()).unwrap();
    assert_eq!(scan.checked, 2);
    let found = rules(&scan);
    assert!(found.contains(&("public/assets/team/photo.jpg", "image-format")));
    assert!(found.contains(&("public/assets/team/photo.jpg", "image-size")));
    assert!(found.contains(&("public/assets/banner.webp", "image-size")));
    assert_eq!(found.len(), 3);
    assert!(scan.issues.iter().all(|i| i.severity == Severity::Error));

    let size = scan
        .issues
        .iter()
        .find(|i| i.source.ends_with("banner.webp"))
        .unwrap();
    assert_eq!(size.message, "150.0KB exceeds the 100.0KB budget by 50.0KB");
}

#[test]
fn exactly_at_budget_passes() {
    let dir = TempDir::new().unwrap();
    write_bytes(dir.path(), "public/assets/edge.webp", 100 * 1024);
    let scan = check_images(dir.path(), &ImagesConfig::default()).unwrap();
    assert!(scan.issues.is_empty());
}

#[test]
fn unlisted_extensions_are_ignored() {
    let dir = TempDir::new().unwrap();
    write_bytes(dir.path(), "public/assets/data.json", 300 * 1024);
    let scan = check_images(dir.path(), &ImagesConfig::default()).unwrap();
    assert_eq!(scan.checked, 0);
}

#[test]
fn missing_directory_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let scan = check_images(dir.path(), &ImagesConfig::default()).unwrap();
    assert_eq!(scan.checked, 0);
    assert!(scan.issues.is_empty());
}

#[test]
fn custom_preferred_format_and_dirs() {
    let dir = TempDir::new().unwrap();
    write_bytes(dir.path(), "static/img/a.webp", 10);
    write_bytes(dir.path(), "static/img/b.avif", 10);
    let config = ImagesConfig {
        dirs: vec!["static/img".to_string()],
        extensions: vec!["webp".to_string(), "avif".to_string()],
        preferred_format: "avif".to_string(),
        ..ImagesConfig::default()
    };
    let scan = check_images(dir.path(), &config).unwrap();
    assert_eq!(rules(&scan), vec![("static/img/a.webp", "image-format")]);
}
