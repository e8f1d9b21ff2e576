use super::*;
use crate::config::ContrastCaseConfig;

fn light_link() -> ContrastCaseConfig {
    ContrastCaseConfig {
        name: "Light Link".to_string(),
        foreground: "secondary-500".to_string(),
        background: "white".to_string(),
        required: None,
        large_text: false,
    }
}

#[test]
fn default_palette_has_no_issues() {
    let report = contrast_report(&ContrastConfig::default(), false).unwrap();
    assert_eq!(report.checked(), 16);
    assert!(report.is_empty());
    assert!(report.notes().is_empty());
    assert_eq!(report.unit(), "color pairs");
}

#[test]
fn verbose_lists_every_case() {
    let report = contrast_report(&ContrastConfig::default(), true).unwrap();
    assert_eq!(report.notes().len(), 16);
    assert!(report.notes()[0].starts_with("Button Primary"));
    assert!(report.notes().iter().all(|n| n.ends_with("PASS")));
}

#[test]
fn failing_case_is_an_error() {
    let mut config = ContrastConfig::default();
    config.cases = vec![light_link()];

    let report = contrast_report(&config, false).unwrap();
    let issues = report.sorted_issues();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].source, "Light Link");
    assert_eq!(issues[0].criterion, CONTRAST_CRITERION);
    assert_eq!(issues[0].message, "secondary-500 on white is 2.64:1, needs 4.5:1");
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn large_text_is_mentioned() {
    let mut config = ContrastConfig::default();
    let mut case = light_link();
    case.large_text = true;
    config.cases = vec![case];

    let report = contrast_report(&config, false).unwrap();
    assert!(report.sorted_issues()[0].message.ends_with("needs 3:1 (large text)"));
}

#[test]
fn outcome_line_shows_status() {
    let mut config = ContrastConfig::default();
    config.cases = vec![light_link()];
    let report = contrast_report(&config, true).unwrap();
    let line = &report.notes()[0];
    assert!(line.contains("2.64:1"));
    assert!(line.ends_with("FAIL"));
}

#[test]
fn unknown_color_is_an_error() {
    let mut config = ContrastConfig::default();
    let mut case = light_link();
    case.foreground = "brand".to_string();
    config.cases = vec![case];

    assert!(contrast_report(&config, false).is_err());
}
