use super::*;

use std::collections::HashSet;

use markup::open_tag_at;

use crate::source::ScanTarget;

#[test]
fn every_family_builds_from_defaults() {
    let checkers = build_checkers(&Family::ALL, &Config::default()).unwrap();
    assert_eq!(checkers.len(), Family::ALL.len());

    let names: HashSet<_> = checkers.iter().map(|c| c.name()).collect();
    assert_eq!(names.len(), checkers.len());
}

#[test]
fn label_targets_reads_for_and_html_for() {
    let src = r#"<label for="a">A</label><label htmlFor="b">B</label><label>C</label>"#;
    assert_eq!(label_targets(src), vec!["a", "b"]);
}

#[test]
fn has_label_by_id_or_wrapping() {
    let src = r#"<label for="q">Q</label><input id="q"><input id="z">"#;
    let targets = label_targets(src);
    let first = open_tag_at(src, src.find("<input").unwrap()).unwrap();
    let second = open_tag_at(src, src.rfind("<input").unwrap()).unwrap();
    assert!(has_label(src, &first, &targets));
    assert!(!has_label(src, &second, &targets));
}

#[test]
fn content_names_accepts_text_or_image_alt() {
    let named = "<a href=\"/\">Home</a>";
    let tag = open_tag_at(named, 0).unwrap();
    assert!(content_names(named, &tag));

    let empty_alt = "<a href=\"/\"><img src=\"x.png\" alt=\"\" /></a>";
    let tag = open_tag_at(empty_alt, 0).unwrap();
    assert!(!content_names(empty_alt, &tag));
}

#[test]
fn hidden_input_detection() {
    let hidden = open_tag_at(r#"<input type="HIDDEN">"#, 0).unwrap();
    let text = open_tag_at(r#"<input type="text">"#, 0).unwrap();
    assert!(is_hidden_input(&hidden));
    assert!(!is_hidden_input(&text));
}

#[test]
fn invalid_auxiliary_pattern_is_reported() {
    let err = compile("(unclosed").unwrap_err();
    assert!(matches!(err, WcagGuardError::InvalidRegex { .. }));
}

/// Inputs that once tripped byte-offset arithmetic in the tag scanner.
fn hostile_sources() -> Vec<String> {
    let wide_attr = format!("<img alt=\"{}\" />", "é".repeat(3000));
    let near_bound = format!("<a title=\"{}\">ü</a>", "ü".repeat(2047));
    vec![
        "<label>Use { for café</label>\n<h2>{ naïve</h2>\n<a href=\"/\">{ ∞</a>".to_string(),
        "<button aria-label=\"Schließen\">{ Schließen</button>".to_string(),
        wide_attr.clone(),
        format!("<Link href=\"/\">{wide_attr}</Link>"),
        near_bound,
        "<div onClick={() => {\n<nav><a href=\"#\">日本語".to_string(),
        "<<<>>>{{{}}</a></Link><h1 <label for=".to_string(),
        "html { font-size: 1₤px } body { outline: nöne }".to_string(),
        format!("<video autoplay src=\"{}\">", "ß".repeat(5000)),
        "é".repeat(10_000),
    ]
}

#[test]
fn every_family_survives_hostile_markup() {
    let checkers = build_checkers(&Family::ALL, &Config::default()).unwrap();
    let paths = [
        "components/Widget.tsx",
        "pages/index.tsx",
        "pages/_document.tsx",
        "components/Layout.tsx",
        "public/page.html",
        "styles/site.css",
    ];
    for source in hostile_sources() {
        for path in paths {
            let target = ScanTarget::from_content(path, &source);
            for checker in &checkers {
                if checker.accepts(target.kind) {
                    let _ = checker.check(&target);
                }
            }
        }
    }
}

#[test]
fn unclosed_brace_in_multibyte_link_text_is_reported_not_fatal() {
    let checkers = build_checkers(&[Family::Navigable], &Config::default()).unwrap();
    let src = "<a href=\"/\"><Icon /></a>\n<a href=\"/x\">{ café</a>";
    let target = ScanTarget::from_content("components/Nav.tsx", src);
    let issues = checkers[0].check(&target);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].rule_id, "link-purpose");
    assert_eq!(issues[0].line, Some(1));
}
