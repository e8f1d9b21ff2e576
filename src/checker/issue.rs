use serde::Serialize;

/// Maximum characters kept in a displayed snippet.
pub const SNIPPET_LIMIT: usize = 120;

/// Whether an issue fails the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocking: any error makes the run exit non-zero.
    Error,
    /// Informational only.
    Warning,
}

impl Severity {
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(self, Self::Error)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// A single finding, attributed to one rule at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Root-relative file path, page route or contrast case name.
    pub source: String,
    /// 1-based line, when the finding has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub rule_id: &'static str,
    pub criterion: &'static str,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl Issue {
    #[must_use]
    pub fn new(
        rule_id: &'static str,
        criterion: &'static str,
        severity: Severity,
        source: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            line: None,
            rule_id,
            criterion,
            severity,
            message: message.into(),
            snippet: None,
        }
    }

    #[must_use]
    pub const fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn with_snippet(mut self, text: &str) -> Self {
        let snippet = bounded_snippet(text);
        self.snippet = (!snippet.is_empty()).then_some(snippet);
        self
    }

    /// `source:line`, or just `source`.
    #[must_use]
    pub fn location(&self) -> String {
        match self.line {
            Some(line) => format!("{}:{line}", self.source),
            None => self.source.clone(),
        }
    }
}

/// Collapse whitespace and truncate to `SNIPPET_LIMIT` characters.
#[must_use]
pub fn bounded_snippet(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= SNIPPET_LIMIT {
        return collapsed;
    }
    let mut truncated: String = collapsed.chars().take(SNIPPET_LIMIT - 3).collect();
    truncated.push_str("...");
    truncated
}
