//! Static image budget: raster format and file size.

use std::path::Path;

use crate::checker::{Issue, Severity};
use crate::config::ImagesConfig;
use crate::error::Result;
use crate::scanner::{DirectoryScanner, FileFilter, FileScanner};
use crate::source::relative_display;

/// Criterion heading for image findings; these are performance budgets,
/// not WCAG success criteria.
pub const IMAGE_CRITERION: &str = "Image Optimization";

const VECTOR_EXTENSION: &str = "svg";

/// Accepts files whose extension is in a fixed set, ignoring case.
pub struct ExtensionFilter {
    extensions: Vec<String>,
}

impl ExtensionFilter {
    #[must_use]
    pub fn new(extensions: &[String]) -> Self {
        Self {
            extensions: extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }
}

impl FileFilter for ExtensionFilter {
    fn should_include(&self, path: &Path) -> bool {
        extension_of(path).is_some_and(|ext| self.extensions.contains(&ext))
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// Outcome of an image scan.
#[derive(Debug, Default)]
pub struct ImageScan {
    /// Raster images inspected; vector files are not counted.
    pub checked: usize,
    pub issues: Vec<Issue>,
}

/// Format a byte count as `B`, `KB` or `MB` with one decimal.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes < KB {
        format!("{bytes}B")
    } else if bytes < MB {
        format!("{:.1}KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1}MB", bytes as f64 / MB as f64)
    }
}

/// Check every image under the configured directories of `root`.
///
/// Missing directories are skipped.
///
/// # Errors
/// Returns an error if a directory walk cannot be set up.
pub fn check_images(root: &Path, config: &ImagesConfig) -> Result<ImageScan> {
    let preferred = config.preferred_format.trim_start_matches('.').to_ascii_lowercase();
    let scanner = DirectoryScanner::new(ExtensionFilter::new(&config.extensions), Vec::new());
    let mut scan = ImageScan::default();

    for dir in &config.dirs {
        let dir_path = root.join(dir);
        if !dir_path.is_dir() {
            tracing::debug!(dir = %dir_path.display(), "image directory not found");
            continue;
        }
        for path in scanner.scan(&dir_path)? {
            let Some(ext) = extension_of(&path) else {
                continue;
            };
            if ext == VECTOR_EXTENSION {
                tracing::trace!(path = %path.display(), "skipping vector image");
                continue;
            }
            let size = match std::fs::metadata(&path) {
                Ok(meta) => meta.len(),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "cannot stat image");
                    continue;
                }
            };
            scan.checked += 1;
            let relative = relative_display(root, &path);

            if ext != preferred {
                scan.issues.push(Issue::new(
                    "image-format",
                    IMAGE_CRITERION,
                    Severity::Error,
                    &relative,
                    format!(".{ext} image ({}) should be converted to .{preferred}", human_size(size)),
                ));
            }
            if size > config.max_bytes {
                scan.issues.push(Issue::new(
                    "image-size",
                    IMAGE_CRITERION,
                    Severity::Error,
                    &relative,
                    format!(
                        "{} exceeds the {} budget by {}",
                        human_size(size),
                        human_size(config.max_bytes),
                        human_size(size - config.max_bytes)
                    ),
                ));
            }
        }
    }
    tracing::debug!(images = scan.checked, issues = scan.issues.len(), "image scan finished");
    Ok(scan)
}

#[cfg(test)]
#[path = "images_tests.rs"]
mod tests;
