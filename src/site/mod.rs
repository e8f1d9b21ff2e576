//! Checks over the rendered build: internal links, JSON-LD and SEO
//! metadata. These read HTML pages written by the site build rather than
//! the front-end source tree.

pub mod links;
pub mod routes;
pub mod seo;
pub mod structured_data;

use std::path::{Path, PathBuf};

use crate::error::{Result, WcagGuardError};
use crate::scanner::collect_files;
use crate::source::ScanTarget;

pub use routes::{collect_routes, route_for};

const PAGE_PATTERN: &str = "**/*.html";

/// A rendered page and the route it is served at.
#[derive(Debug, Clone)]
pub struct Page {
    pub route: String,
    /// Page file, relative to the build directory.
    pub target: ScanTarget,
}

impl Page {
    /// # Errors
    /// Returns `FileRead` if the page cannot be read as UTF-8.
    pub fn load(build_dir: &Path, path: &Path) -> Result<Self> {
        let target = ScanTarget::load(build_dir, path)?;
        Ok(Self {
            route: route_for(&target.relative),
            target,
        })
    }

    /// Build a page from in-memory HTML; `relative` is the file path under
    /// the build directory.
    #[must_use]
    pub fn from_content(relative: &str, html: &str) -> Self {
        Self {
            route: route_for(relative),
            target: ScanTarget::from_content(relative, html),
        }
    }

    #[must_use]
    pub fn html(&self) -> &str {
        &self.target.content
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        self.target.file_name()
    }
}

/// Every `.html` file under `build_dir`, sorted.
///
/// # Errors
/// Returns `MissingBuildDir` when the directory does not exist and
/// `NoPages` when it holds no HTML.
pub fn discover_pages(build_dir: &Path) -> Result<Vec<PathBuf>> {
    if !build_dir.is_dir() {
        return Err(WcagGuardError::MissingBuildDir {
            path: build_dir.to_path_buf(),
        });
    }
    let pages = collect_files(build_dir, &[PAGE_PATTERN.to_string()], &[], false)?;
    if pages.is_empty() {
        return Err(WcagGuardError::NoPages {
            path: build_dir.to_path_buf(),
        });
    }
    tracing::debug!(build_dir = %build_dir.display(), pages = pages.len(), "discovered pages");
    Ok(pages)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
