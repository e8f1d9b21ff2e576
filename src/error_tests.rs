use std::path::PathBuf;

use super::*;

#[test]
fn error_display_config() {
    let err = WcagGuardError::Config("empty include list".to_string());
    assert_eq!(err.to_string(), "Configuration error: empty include list");
}

#[test]
fn error_display_file_read() {
    let err = WcagGuardError::FileRead {
        path: PathBuf::from("pages/index.tsx"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
    };
    assert!(err.to_string().contains("pages/index.tsx"));
}

#[test]
fn error_display_missing_build_dir() {
    let err = WcagGuardError::MissingBuildDir {
        path: PathBuf::from(".next/server/pages"),
    };
    let text = err.to_string();
    assert!(text.contains(".next/server/pages"));
    assert!(text.contains("Run the site build first"));
}

#[test]
fn error_type_groups_preconditions() {
    let missing = WcagGuardError::MissingBuildDir {
        path: PathBuf::from("out"),
    };
    let empty = WcagGuardError::NoPages {
        path: PathBuf::from("out"),
    };
    assert_eq!(missing.error_type(), "Precondition");
    assert_eq!(empty.error_type(), "Precondition");
    assert_eq!(WcagGuardError::Config("x".into()).error_type(), "Config");
}

#[test]
fn error_message_strips_category() {
    let err = WcagGuardError::Config("bad range".to_string());
    assert_eq!(err.message(), "bad range");
}

#[test]
fn error_detail_returns_source_info() {
    let err = WcagGuardError::Config("x".to_string());
    assert!(err.detail().is_none());

    let err = WcagGuardError::FileRead {
        path: PathBuf::from("a.tsx"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
    };
    assert!(err.detail().unwrap().contains("file not found"));
}

#[test]
fn suggestion_file_read_not_found() {
    let err = WcagGuardError::FileRead {
        path: PathBuf::from("a.tsx"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    };
    assert!(err.suggestion().unwrap().contains("file path exists"));
}

#[test]
fn suggestion_unknown_color_mentions_palette() {
    let err = WcagGuardError::UnknownColor {
        name: "brand-900".to_string(),
    };
    assert!(err.suggestion().unwrap().contains("[contrast.palette]"));
}

#[test]
fn suggestion_other_io_error_has_none() {
    let err = WcagGuardError::Io(std::io::Error::other("boom"));
    assert!(err.suggestion().is_none());
}

#[test]
fn missing_asset_dir_is_a_precondition() {
    let err = WcagGuardError::MissingAssetDir {
        path: PathBuf::from("public/assets/og-images"),
    };
    assert_eq!(err.error_type(), "Precondition");
    assert!(err.to_string().contains("public/assets/og-images"));
    assert!(err.suggestion().is_some_and(|s| s.contains("og_images.dir")));
}
