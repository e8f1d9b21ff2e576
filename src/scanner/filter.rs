use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{Result, WcagGuardError};

pub trait FileFilter {
    /// `path` is relative to the scan root.
    fn should_include(&self, path: &Path) -> bool;
}

/// Selects files whose root-relative path matches any include glob.
pub struct GlobFilter {
    include: GlobSet,
}

impl GlobFilter {
    /// Create a new filter from include patterns.
    ///
    /// # Errors
    /// Returns an error if any pattern is invalid.
    pub fn new(include_patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in include_patterns {
            let glob = Glob::new(pattern).map_err(|e| WcagGuardError::InvalidPattern {
                pattern: pattern.clone(),
                source: e,
            })?;
            builder.add(glob);
        }
        let include = builder
            .build()
            .map_err(|e| WcagGuardError::InvalidPattern {
                pattern: "combined patterns".to_string(),
                source: e,
            })?;

        Ok(Self { include })
    }
}

impl FileFilter for GlobFilter {
    fn should_include(&self, path: &Path) -> bool {
        self.include.is_match(path)
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
