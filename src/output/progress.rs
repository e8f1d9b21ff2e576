use std::io::IsTerminal;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar on stderr for per-file checks.
///
/// Hidden in quiet mode and when stderr is not a TTY. Clones share one
/// counter so rayon workers can tick it concurrently.
#[derive(Clone)]
pub struct ScanProgress {
    progress_bar: ProgressBar,
    counter: Arc<AtomicU64>,
}

impl ScanProgress {
    #[must_use]
    pub fn new(total: u64, quiet: bool) -> Self {
        Self::new_with_visibility(total, quiet, std::io::stderr().is_terminal())
    }

    fn new_with_visibility(total: u64, quiet: bool, is_tty: bool) -> Self {
        let progress_bar = if quiet || !is_tty {
            ProgressBar::hidden()
        } else {
            Self::visible_bar(total)
        };
        Self {
            progress_bar,
            counter: Arc::new(AtomicU64::new(0)),
        }
    }

    fn visible_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} Checking [{bar:40.cyan/blue}] {pos}/{len} files")
                .expect("Invalid template")
                .progress_chars("█▓░"),
        );
        pb
    }

    pub fn inc(&self) {
        let count = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        self.progress_bar.set_position(count);
    }

    #[cfg(test)]
    #[must_use]
    pub(crate) fn position(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }

    /// Clears the bar from the terminal.
    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
