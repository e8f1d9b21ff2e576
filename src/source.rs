//! Scan targets: a file's text together with enough metadata to attribute
//! findings back to a line.

use std::path::{Path, PathBuf};

use crate::error::{Result, WcagGuardError};

/// Broad category of a scanned file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// HTML, MDX and other documents that are markup first.
    Markup,
    /// JavaScript/TypeScript, usually carrying JSX.
    Script,
    Style,
}

impl FileKind {
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("html" | "htm" | "mdx" | "md") => Self::Markup,
            Some("css" | "scss" | "sass" | "less") => Self::Style,
            _ => Self::Script,
        }
    }
}

/// Byte offsets of every line start, for offset -> line lookups.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    #[must_use]
    pub fn new(content: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            content
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { starts }
    }

    /// 1-based line containing `offset`.
    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        match self.starts.binary_search(&offset) {
            Ok(i) => i + 1,
            Err(i) => i,
        }
    }

    /// Byte offset where 1-based `line` starts, clamped to the last line.
    #[must_use]
    pub fn line_start(&self, line: usize) -> usize {
        let idx = line.saturating_sub(1).min(self.starts.len() - 1);
        self.starts[idx]
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}

/// An immutable file under inspection.
#[derive(Debug, Clone)]
pub struct ScanTarget {
    pub path: PathBuf,
    /// Root-relative path with forward slashes, used for display and
    /// allow-list matching.
    pub relative: String,
    pub content: String,
    pub kind: FileKind,
    lines: LineIndex,
}

impl ScanTarget {
    /// Read `path` as UTF-8 text.
    ///
    /// # Errors
    /// Returns `FileRead` if the file cannot be read or is not valid UTF-8.
    pub fn load(root: &Path, path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| WcagGuardError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8(bytes).map_err(|e| WcagGuardError::FileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;
        let relative = relative_display(root, path);
        Ok(Self::build(path.to_path_buf(), relative, content))
    }

    /// Build a target from in-memory text.
    #[must_use]
    pub fn from_content(relative: &str, content: &str) -> Self {
        Self::build(
            PathBuf::from(relative),
            relative.replace('\\', "/"),
            content.to_string(),
        )
    }

    fn build(path: PathBuf, relative: String, content: String) -> Self {
        let kind = FileKind::from_path(&path);
        let lines = LineIndex::new(&content);
        Self {
            path,
            relative,
            content,
            kind,
            lines,
        }
    }

    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        self.lines.line_of(offset)
    }

    #[must_use]
    pub const fn lines(&self) -> &LineIndex {
        &self.lines
    }

    /// Text of 1-based `line` without its terminator.
    #[must_use]
    pub fn line_text(&self, line: usize) -> &str {
        let start = self.lines.line_start(line);
        let rest = &self.content[start..];
        rest.split('\n').next().unwrap_or("").trim_end_matches('\r')
    }

    /// File name component of the relative path.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.relative.rsplit('/').next().unwrap_or(&self.relative)
    }

    /// True when the relative path starts or ends with any of `entries`.
    #[must_use]
    pub fn matches_any(&self, entries: &[String]) -> bool {
        entries.iter().any(|entry| {
            let entry = entry.trim_start_matches("./");
            self.relative.starts_with(entry) || self.relative.ends_with(entry)
        })
    }
}

/// Root-relative path with forward slashes.
#[must_use]
pub fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
