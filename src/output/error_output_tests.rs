use super::*;

fn render_error(use_colors: bool, detail: Option<&str>, suggestion: Option<&str>) -> String {
    let out = ErrorOutput::new(if use_colors {
        ColorMode::Always
    } else {
        ColorMode::Never
    });
    let mut buf = Vec::new();
    out.write_error(&mut buf, "Precondition", "Build directory not found", detail, suggestion);
    String::from_utf8(buf).unwrap()
}

#[test]
fn error_without_colors_basic() {
    assert_eq!(
        render_error(false, None, None),
        "✖ Precondition: Build directory not found\n"
    );
}

#[test]
fn error_without_colors_full() {
    let result = render_error(
        false,
        Some(".next/server/pages"),
        Some("Build the site first, or point --build-dir at the rendered pages"),
    );
    assert_eq!(
        result,
        "✖ Precondition: Build directory not found\n  × .next/server/pages\n  help: Build the site first, or point --build-dir at the rendered pages\n"
    );
}

#[test]
fn warning_without_colors() {
    let out = ErrorOutput::new(ColorMode::Never);
    let mut buf = Vec::new();
    out.write_warning(&mut buf, "Skipping components/Broken.tsx", Some("invalid UTF-8"), None);
    let result = String::from_utf8(buf).unwrap();
    assert_eq!(result, "⚠ Warning: Skipping components/Broken.tsx\n  × invalid UTF-8\n");
}

#[test]
fn error_with_colors_contains_ansi() {
    let result = render_error(true, Some("detail"), Some("fix it"));
    assert!(result.contains(ansi::RED));
    assert!(result.contains(ansi::DIM));
    assert!(result.contains(ansi::CYAN));
    assert!(result.contains("Precondition:"));
}

#[test]
fn warning_with_colors_uses_yellow() {
    let out = ErrorOutput::new(ColorMode::Always);
    let mut buf = Vec::new();
    out.write_warning(&mut buf, "careful", None, None);
    let result = String::from_utf8(buf).unwrap();
    assert!(result.contains(ansi::YELLOW));
    assert!(result.contains("⚠ Warning:"));
}
