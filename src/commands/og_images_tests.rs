use tempfile::TempDir;

use super::*;
use crate::WcagGuardError;

fn write_preview(dir: &TempDir, relative: &str, width: u32, height: u32) {
    let path = dir.path().join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    image::RgbImage::new(width, height).save(path).unwrap();
}

#[test]
fn valid_previews_pass_with_a_size_note() {
    let dir = TempDir::new().unwrap();
    write_preview(&dir, "public/assets/og-images/home/image.png", 1200, 630);

    let report = og_images_report(dir.path(), &OgImagesConfig::default()).unwrap();
    assert_eq!(report.checked(), 1);
    assert_eq!(report.unit(), "images");
    assert!(report.is_empty());
    assert!(report.notes()[0].starts_with("Total size: "));
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn wrong_dimensions_fail_the_report() {
    let dir = TempDir::new().unwrap();
    write_preview(&dir, "public/assets/og-images/home/image.png", 600, 315);

    let report = og_images_report(dir.path(), &OgImagesConfig::default()).unwrap();
    let rules: Vec<_> = report.sorted_issues().iter().map(|i| i.rule_id).collect();
    assert_eq!(rules, vec!["og-image-dimensions"]);
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn missing_directory_is_a_precondition_failure() {
    let dir = TempDir::new().unwrap();
    let err = og_images_report(dir.path(), &OgImagesConfig::default()).unwrap_err();
    assert!(matches!(err, WcagGuardError::MissingAssetDir { .. }));
}
