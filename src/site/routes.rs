//! Mapping build files to the URL routes they serve.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::scanner::collect_files;
use crate::source::relative_display;

/// Route for a page file relative to the build directory:
/// `about.html` is `/about`, `index.html` is `/` and `blog/index.html` is
/// `/blog`.
#[must_use]
pub fn route_for(relative: &str) -> String {
    let relative = relative.replace('\\', "/");
    let stem = relative
        .strip_suffix(".html")
        .or_else(|| relative.strip_suffix(".htm"))
        .unwrap_or(&relative);
    let route = format!("/{}", stem.trim_start_matches('/'));
    match route.strip_suffix("/index") {
        Some("") => "/".to_string(),
        Some(parent) => parent.to_string(),
        None => route,
    }
}

/// Every internal route: one per rendered page plus one per static file
/// under `public_dir` (served verbatim, e.g. `/robots.txt`).
///
/// # Errors
/// Returns an error if the public directory walk cannot be set up.
pub fn collect_routes(
    build_dir: &Path,
    pages: &[PathBuf],
    public_dir: &Path,
) -> Result<BTreeSet<String>> {
    let mut routes: BTreeSet<String> = pages
        .iter()
        .map(|page| route_for(&relative_display(build_dir, page)))
        .collect();

    if public_dir.is_dir() {
        let files = collect_files(public_dir, &["**/*".to_string()], &[], false)?;
        routes.extend(
            files
                .iter()
                .map(|file| format!("/{}", relative_display(public_dir, file))),
        );
    } else {
        tracing::debug!(public_dir = %public_dir.display(), "public directory not found");
    }
    tracing::debug!(routes = routes.len(), "collected internal routes");
    Ok(routes)
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
