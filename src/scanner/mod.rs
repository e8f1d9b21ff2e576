mod filter;

pub use filter::{FileFilter, GlobFilter};

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use walkdir::WalkDir;

use crate::error::Result;

/// Trait for scanning directories and finding files.
pub trait FileScanner {
    /// Scan a directory and return all matching file paths, sorted and
    /// without duplicates.
    ///
    /// # Errors
    /// Returns an error if the scanner cannot be set up for `root`.
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

/// Walks a tree, pruning excluded directory names before descending.
pub struct DirectoryScanner<F: FileFilter> {
    filter: F,
    exclude_dirs: Vec<String>,
    use_gitignore: bool,
}

impl<F: FileFilter> DirectoryScanner<F> {
    #[must_use]
    pub const fn new(filter: F, exclude_dirs: Vec<String>) -> Self {
        Self {
            filter,
            exclude_dirs,
            use_gitignore: false,
        }
    }

    #[must_use]
    pub const fn with_gitignore(mut self, enabled: bool) -> Self {
        self.use_gitignore = enabled;
        self
    }

    fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude_dirs.iter().any(|d| d == name)
    }

    fn accept(&self, root: &Path, path: &Path, found: &mut BTreeSet<PathBuf>) {
        let relative = path.strip_prefix(root).unwrap_or(path);
        if self.filter.should_include(relative) {
            found.insert(path.to_path_buf());
        }
    }

    fn walk_plain(&self, root: &Path) -> BTreeSet<PathBuf> {
        let mut found = BTreeSet::new();
        let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !self.is_excluded_dir(&entry.file_name().to_string_lossy())
        });

        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_file() => {
                    self.accept(root, entry.path(), &mut found);
                }
                Ok(_) => {}
                Err(e) => tracing::debug!(error = %e, "skipping unreadable entry"),
            }
        }
        found
    }

    fn walk_gitignore(&self, root: &Path) -> BTreeSet<PathBuf> {
        let mut found = BTreeSet::new();
        let exclude_dirs = self.exclude_dirs.clone();
        let walker = WalkBuilder::new(root)
            .hidden(false)
            .require_git(false)
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                entry.depth() == 0
                    || !is_dir
                    || !exclude_dirs
                        .iter()
                        .any(|d| *d == entry.file_name().to_string_lossy())
            })
            .build();

        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_some_and(|t| t.is_file()) => {
                    self.accept(root, entry.path(), &mut found);
                }
                Ok(_) => {}
                Err(e) => tracing::debug!(error = %e, "skipping unreadable entry"),
            }
        }
        found
    }
}

impl<F: FileFilter> FileScanner for DirectoryScanner<F> {
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let found = if self.use_gitignore {
            self.walk_gitignore(root)
        } else {
            self.walk_plain(root)
        };
        tracing::debug!(root = %root.display(), files = found.len(), "collected files");
        Ok(found.into_iter().collect())
    }
}

/// Collect the files under `root` that match `include` globs, never
/// descending into directories named in `exclude_dirs`.
///
/// # Errors
/// Returns an error if an include pattern is invalid.
pub fn collect_files(
    root: &Path,
    include: &[String],
    exclude_dirs: &[String],
    use_gitignore: bool,
) -> Result<Vec<PathBuf>> {
    let filter = GlobFilter::new(include)?;
    DirectoryScanner::new(filter, exclude_dirs.to_vec())
        .with_gitignore(use_gitignore)
        .scan(root)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
