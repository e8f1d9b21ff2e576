use super::*;

#[test]
fn hidden_in_quiet_mode() {
    let progress = ScanProgress::new(100, true);
    progress.inc();
    progress.inc();
    progress.finish();
}

#[test]
fn hidden_without_tty() {
    let progress = ScanProgress::new_with_visibility(3, false, false);
    for _ in 0..3 {
        progress.inc();
    }
    progress.finish();
}

#[test]
fn clones_share_the_counter() {
    let progress = ScanProgress::new(100, true);
    let cloned = progress.clone();
    progress.inc();
    cloned.inc();
    assert_eq!(progress.position(), 2);
    progress.finish();
}
