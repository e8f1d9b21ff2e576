use super::*;

fn check_at(path: &str, src: &str) -> Vec<Issue> {
    let checker = KeyboardChecker::new(vec!["MenuToggle.tsx".to_string()]).unwrap();
    checker.check(&ScanTarget::from_content(path, src))
}

fn check(src: &str) -> Vec<Issue> {
    check_at("components/Card.tsx", src)
}

#[test]
fn clickable_div_without_key_handler() {
    let issues = check("<div className=\"card\" onClick={open}>\n  Details\n</div>");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].rule_id, "keyboard-handler");
    assert_eq!(issues[0].criterion, "SC 2.1.1");
    assert_eq!(issues[0].line, Some(1));
}

#[test]
fn clickable_div_with_key_handler_or_role_passes() {
    assert!(check("<div onClick={open} onKeyDown={openOnEnter}>Details</div>").is_empty());
    assert!(check("<span role=\"button\" onClick={open}>Details</span>").is_empty());
}

#[test]
fn clickable_div_wrapping_a_button_passes() {
    let src = "<div onClick={close}>\n  <button type=\"button\">Close</button>\n</div>";
    assert!(check(src).is_empty());
}

#[test]
fn focusable_element_needs_behaviour() {
    let issues = check("<div tabIndex={0}>Scrollable region</div>");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].rule_id, "focusable-handler");

    assert!(check("<div tabIndex={0} onKeyDown={move}>Grid</div>").is_empty());
}

#[test]
fn hover_without_focus_equivalent() {
    let issues = check("<li onMouseEnter={() => setOpen(true)}>Products</li>");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].rule_id, "hover-focus");

    let paired = "<li onMouseEnter={show}\n    onFocus={show}>Products</li>";
    assert!(check(paired).is_empty());
}

#[test]
fn dialog_without_close_handler_traps_focus() {
    let issues = check("<Modal isOpen={open}>\n  <p>Saved</p>\n</Modal>");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].rule_id, "dialog-escape");
    assert_eq!(issues[0].criterion, "SC 2.1.2");

    assert!(check("<Modal isOpen={open} onClose={close}>\n</Modal>").is_empty());
}

#[test]
fn headless_ui_dialogs_close_on_escape() {
    let src = "import { Dialog } from '@headlessui/react';\n\n<Dialog open={open}>\n</Dialog>";
    assert!(check(src).is_empty());
}

#[test]
fn dialog_subcomponents_are_not_dialogs() {
    assert!(check("<Dialog.Panel className=\"p-4\">Body</Dialog.Panel>").is_empty());
}

#[test]
fn single_character_shortcut() {
    let src = "window.addEventListener('keydown', (e) => {\n  if (e.key === 's') save();\n});";
    let issues = check(src);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].rule_id, "character-shortcut");
    assert_eq!(issues[0].criterion, "SC 2.1.4");
    assert!(issues[0].message.contains("'s'"));
}

#[test]
fn modified_shortcuts_pass() {
    let src = "if (e.ctrlKey && e.key === 's') {\n  save();\n}";
    assert!(check(src).is_empty());
}

#[test]
fn key_codes_in_letter_range_are_shortcuts() {
    let issues = check("if (event.keyCode === 70) openSearch();");
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("keyCode 70"));

    // Enter is not a character key.
    assert!(check("if (event.keyCode === 13) submit();").is_empty());
}

#[test]
fn shortcuts_scoped_to_text_entry_pass() {
    let src = "<input onKeyDown={(e) => {\n  if (e.key === 'a') add();\n}} />";
    assert!(check(src).is_empty());
}

#[test]
fn allowlisted_components_are_skipped() {
    let src = "<div onClick={toggle}>Menu</div>";
    assert!(check_at("components/MenuToggle.tsx", src).is_empty());
    assert_eq!(check(src).len(), 1);
}
