pub mod engine;
mod issue;
mod report;

pub use engine::{Classifier, ContextWindow, Rule, RuleMatch, Verdict, evaluate};
pub use issue::{Issue, SNIPPET_LIMIT, Severity, bounded_snippet};
pub use report::Report;

use crate::source::{FileKind, ScanTarget};

/// A family of source rules that can inspect one file at a time.
///
/// Implementations hold only immutable, precompiled state so a single
/// checker can be shared across worker threads.
pub trait Checker: Send + Sync {
    /// Stable identifier, also used as the CLI family name.
    fn name(&self) -> &'static str;

    /// Human-readable heading for reports.
    fn title(&self) -> &'static str;

    /// Whether files of `kind` are inspected. Stylesheets are skipped
    /// unless a family has rules for them.
    fn accepts(&self, kind: FileKind) -> bool {
        kind != FileKind::Style
    }

    /// Inspect a single file.
    fn check(&self, target: &ScanTarget) -> Vec<Issue>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
