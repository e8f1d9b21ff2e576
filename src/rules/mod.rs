//! Source rule families.
//!
//! Each family is a [`Checker`] built once from configuration and shared
//! across worker threads. Families combine pattern rules run through the
//! engine with whole-file checks that need the entire content.

pub mod autocomplete;
pub mod compatible;
pub mod distinguishable;
pub mod input_assistance;
pub mod input_modalities;
pub mod keyboard;
pub mod markup;
pub mod media;
pub mod mobile;
pub mod navigable;
pub mod predictable;
pub mod readable;
pub mod seizures;
pub mod semantic;
pub mod text_alternatives;
pub mod timing;

use regex::Regex;

use crate::checker::Checker;
use crate::config::Config;
use crate::error::{Result, WcagGuardError};

use markup::{OpenTag, element_inner, find_tags, is_inside, visible_text};

/// How far back a wrapping `<label>` is looked for.
const LABEL_WINDOW: usize = 500;

/// Bound on element content scanned for visible text.
const INNER_LIMIT: usize = 2000;

/// The source rule families, in the order `source` runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Compatible,
    InputAssistance,
    Semantic,
    Timing,
    TextAlternatives,
    Autocomplete,
    Media,
    Keyboard,
    Seizures,
    Navigable,
    InputModalities,
    Readable,
    Predictable,
    Distinguishable,
    Mobile,
}

impl Family {
    pub const ALL: [Self; 15] = [
        Self::Compatible,
        Self::InputAssistance,
        Self::Semantic,
        Self::Timing,
        Self::TextAlternatives,
        Self::Autocomplete,
        Self::Media,
        Self::Keyboard,
        Self::Seizures,
        Self::Navigable,
        Self::InputModalities,
        Self::Readable,
        Self::Predictable,
        Self::Distinguishable,
        Self::Mobile,
    ];

    /// Build the checker for this family.
    ///
    /// # Errors
    /// Returns an error if a rule pattern fails to compile.
    pub fn build(self, config: &Config) -> Result<Box<dyn Checker>> {
        let checker: Box<dyn Checker> = match self {
            Self::Compatible => Box::new(compatible::CompatibleChecker::new(
                config.allowlist.compatible.clone(),
            )?),
            Self::InputAssistance => Box::new(input_assistance::InputAssistanceChecker::new(
                config.allowlist.input_assistance.clone(),
            )?),
            Self::Semantic => Box::new(semantic::SemanticChecker::new(
                &config.semantic,
                config.allowlist.semantic.clone(),
            )?),
            Self::Timing => Box::new(timing::TimingChecker::new(
                config.allowlist.timing.clone(),
            )?),
            Self::TextAlternatives => Box::new(text_alternatives::TextAlternativesChecker::new(
                config.allowlist.text_alternatives.clone(),
            )?),
            Self::Autocomplete => Box::new(autocomplete::AutocompleteChecker::new(
                config.allowlist.autocomplete.clone(),
            )?),
            Self::Media => Box::new(media::MediaChecker::new(config.allowlist.media.clone())?),
            Self::Keyboard => Box::new(keyboard::KeyboardChecker::new(
                config.allowlist.keyboard.clone(),
            )?),
            Self::Seizures => Box::new(seizures::SeizuresChecker::new(
                config.allowlist.seizures.clone(),
            )?),
            Self::Navigable => Box::new(navigable::NavigableChecker::new(
                &config.navigable,
                config.allowlist.navigable.clone(),
            )?),
            Self::InputModalities => Box::new(input_modalities::InputModalitiesChecker::new(
                config.allowlist.input_modalities.clone(),
            )?),
            Self::Readable => Box::new(readable::ReadableChecker::new(
                config.allowlist.readable.clone(),
            )),
            Self::Predictable => Box::new(predictable::PredictableChecker::new(
                config.allowlist.predictable.clone(),
            )?),
            Self::Distinguishable => Box::new(distinguishable::DistinguishableChecker::new(
                config.allowlist.distinguishable.clone(),
            )?),
            Self::Mobile => Box::new(mobile::MobileChecker::new(config.allowlist.mobile.clone())?),
        };
        tracing::debug!(family = checker.name(), "checker built");
        Ok(checker)
    }
}

/// Build the checkers for `families`.
///
/// # Errors
/// Returns the first rule compilation error.
pub fn build_checkers(families: &[Family], config: &Config) -> Result<Vec<Box<dyn Checker>>> {
    families.iter().map(|family| family.build(config)).collect()
}

/// Compile an auxiliary pattern used by a whole-file check.
pub(crate) fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| WcagGuardError::InvalidRegex {
        pattern: pattern.to_string(),
        source,
    })
}

/// Ids targeted by a `<label for>` / `<label htmlFor>` anywhere in `content`.
pub(crate) fn label_targets(content: &str) -> Vec<&str> {
    find_tags(content, "label")
        .iter()
        .filter_map(|label| label.attr_text("for").or_else(|| label.attr_text("htmlFor")))
        .collect()
}

/// True when a form control is labelled by a `<label for=id>` or sits
/// inside a `<label>` element.
pub(crate) fn has_label(content: &str, tag: &OpenTag<'_>, targets: &[&str]) -> bool {
    let by_id = tag
        .attr_text("id")
        .is_some_and(|id| targets.iter().any(|t| *t == id));
    by_id || is_inside(content, tag.start, "label", LABEL_WINDOW)
}

/// Visible text of a non-void element, or `None` when the element does not
/// close within the scanned bound.
pub(crate) fn inner_text(content: &str, tag: &OpenTag<'_>) -> Option<String> {
    element_inner(content, tag, INNER_LIMIT).map(visible_text)
}

/// True when an element's content names it: visible text, or an image with
/// a non-empty `alt`. Elements that do not close in bound count as named.
pub(crate) fn content_names(content: &str, tag: &OpenTag<'_>) -> bool {
    let Some(inner) = element_inner(content, tag, INNER_LIMIT) else {
        return true;
    };
    !visible_text(inner).is_empty()
        || ["img", "Image"]
            .iter()
            .any(|name| find_tags(inner, name).iter().any(|img| img.has_value("alt")))
}

/// True for hidden inputs, which need no label.
pub(crate) fn is_hidden_input(tag: &OpenTag<'_>) -> bool {
    tag.is_named("input")
        && tag
            .attr_text("type")
            .is_some_and(|t| t.eq_ignore_ascii_case("hidden"))
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
