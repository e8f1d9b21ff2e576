use super::*;

fn check(src: &str) -> Vec<Issue> {
    let checker = InputModalitiesChecker::new(vec!["pages/api/".to_string()]).unwrap();
    checker.check(&ScanTarget::from_content("components/Gallery.tsx", src))
}

fn rule_ids(issues: &[Issue]) -> Vec<&'static str> {
    issues.iter().map(|i| i.rule_id).collect()
}

#[test]
fn pinch_gesture_without_single_pointer_alternative() {
    let src = "const onTouchMove = (e) => {\n  if (e.touches.length > 1) zoom(e);\n};";
    let issues = check(src);
    assert_eq!(rule_ids(&issues), ["pointer-gestures"]);
    assert_eq!(issues[0].criterion, "SC 2.5.1");
    assert_eq!(issues[0].line, Some(2));
}

#[test]
fn pinch_gesture_with_zoom_buttons_passes() {
    let src = "if (e.touches.length > 1) zoom(e);\n<button onClick={zoomIn}>Zoom in</button>";
    assert!(check(src).is_empty());
}

#[test]
fn destructive_action_on_down_event() {
    let issues = check("<div onMouseDown={() => deleteItem(id)}>Remove</div>");
    assert_eq!(rule_ids(&issues), ["pointer-cancellation"]);
    assert!(issues[0].message.starts_with("onMouseDown"));
}

#[test]
fn press_feedback_on_down_event_passes() {
    assert!(check("<li onPointerDown={() => { setActive(true); save(); }}>Item</li>").is_empty());
    assert!(check("<li onPointerDown={() => setPressed(true)}>Item</li>").is_empty());
}

#[test]
fn aria_label_hiding_visible_text() {
    let src = "<button aria-label=\"Close dialog\">\n  Dismiss\n</button>";
    let issues = check(src);
    assert_eq!(rule_ids(&issues), ["label-in-name"]);
    assert_eq!(issues[0].criterion, "SC 2.5.3");
    assert!(issues[0].message.contains("\"dismiss\""));
}

#[test]
fn aria_label_containing_visible_text_passes() {
    assert!(check("<Button aria-label=\"Search the blog\">Search</Button>").is_empty());
    assert!(check("<button aria-label=\"Close\">X</button>").is_empty());
    assert!(check("<button aria-label=\"Next page\">{t('next')}</button>").is_empty());
}

#[test]
fn motion_input_needs_ui_alternative() {
    let src = "window.addEventListener('devicemotion', (e) => {\n  if (shaken(e)) undo();\n});";
    let issues = check(src);
    assert_eq!(rule_ids(&issues), ["motion-actuation"]);
    assert!(issues[0].message.contains("devicemotion event"));

    let with_button = format!("{src}\n<button onClick={{undo}}>Undo</button>");
    assert!(check(&with_button).is_empty());
}

#[test]
fn input_detection_that_hides_features() {
    let src = "const coarse = window.matchMedia('(pointer: coarse)').matches;\nif (coarse) {\n  return null;\n}";
    let issues = check(src);
    assert_eq!(rule_ids(&issues), ["concurrent-input"]);
    assert_eq!(issues[0].severity, Severity::Warning);
    assert!(issues[0].message.starts_with("Pointer type detection"));
}

#[test]
fn input_detection_for_styling_only_passes() {
    let src = "const coarse = window.matchMedia('(pointer: coarse)').matches;\nconst size = coarse ? 48 : 32;";
    assert!(check(src).is_empty());
}
