//! Open Graph preview images: pixel dimensions and file size.

use std::path::Path;

use crate::checker::{Issue, Severity};
use crate::config::OgImagesConfig;
use crate::error::{Result, WcagGuardError};
use crate::images::human_size;
use crate::scanner::{DirectoryScanner, FileFilter, FileScanner};
use crate::source::relative_display;

/// Criterion heading for preview image findings; social previews are not
/// page content, so no WCAG criterion applies.
pub const OG_CRITERION: &str = "Open Graph Images";

/// Accepts files with one exact name, wherever they sit in the tree.
pub struct FileNameFilter {
    name: String,
}

impl FileNameFilter {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl FileFilter for FileNameFilter {
    fn should_include(&self, path: &Path) -> bool {
        path.file_name().is_some_and(|n| n == self.name.as_str())
    }
}

/// Outcome of a preview image scan.
#[derive(Debug, Default)]
pub struct OgImageScan {
    pub checked: usize,
    pub total_bytes: u64,
    pub issues: Vec<Issue>,
}

/// Check every preview image under the configured directory of `root`.
///
/// # Errors
/// Returns `MissingAssetDir` when the directory does not exist, or an
/// error if the directory walk cannot be set up.
pub fn check_og_images(root: &Path, config: &OgImagesConfig) -> Result<OgImageScan> {
    let dir = root.join(&config.dir);
    if !dir.is_dir() {
        return Err(WcagGuardError::MissingAssetDir { path: dir });
    }
    let scanner = DirectoryScanner::new(FileNameFilter::new(&config.file_name), Vec::new());
    let mut scan = OgImageScan::default();

    for path in scanner.scan(&dir)? {
        let size = match std::fs::metadata(&path) {
            Ok(meta) => meta.len(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot stat preview image");
                continue;
            }
        };
        scan.checked += 1;
        scan.total_bytes += size;
        let relative = relative_display(root, &path);
        scan.issues.extend(check_dimensions(&path, &relative, config));
        scan.issues.extend(check_size(size, &relative, config));
    }
    tracing::debug!(
        checked = scan.checked,
        total = %human_size(scan.total_bytes),
        "preview images scanned"
    );
    Ok(scan)
}

fn check_dimensions(path: &Path, relative: &str, config: &OgImagesConfig) -> Option<Issue> {
    match image::image_dimensions(path) {
        Ok((width, height)) if (width, height) == (config.width, config.height) => None,
        Ok((width, height)) => Some(Issue::new(
            "og-image-dimensions",
            OG_CRITERION,
            Severity::Error,
            relative,
            format!(
                "Image is {width}×{height}px, expected {}×{}px",
                config.width, config.height
            ),
        )),
        Err(e) => Some(Issue::new(
            "og-image-unreadable",
            OG_CRITERION,
            Severity::Error,
            relative,
            format!("Cannot read image dimensions: {e}"),
        )),
    }
}

fn check_size(size: u64, relative: &str, config: &OgImagesConfig) -> Option<Issue> {
    let (severity, limit, label) = if size > config.max_bytes {
        (Severity::Error, config.max_bytes, "maximum")
    } else if size > config.recommended_bytes {
        (Severity::Warning, config.recommended_bytes, "recommended size")
    } else {
        return None;
    };
    Some(Issue::new(
        "og-image-size",
        OG_CRITERION,
        severity,
        relative,
        format!("{} is over the {label} of {}", human_size(size), human_size(limit)),
    ))
}

#[cfg(test)]
#[path = "og_images_tests.rs"]
mod tests;
