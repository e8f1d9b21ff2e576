//! Guideline 1.2 (Time-based Media): captions, descriptions, player
//! controls, autoplay and embedded players.

use crate::checker::{
    Checker, Classifier, ContextWindow, Issue, Rule, RuleMatch, Severity, Verdict, evaluate,
};
use crate::error::Result;
use crate::source::ScanTarget;

use super::markup::{OpenTag, element_inner, find_tags, open_tag_at};

const VIDEO: &str = r"(?i)<video[\s>/]";
const AUDIO: &str = r"(?i)<audio[\s>/]";
const IFRAME: &str = r"(?i)<iframe[\s>/]";

/// Bound on a media element's children.
const MEDIA_LIMIT: usize = 5000;

const TAG_WINDOW: ContextWindow = ContextWindow::Chars {
    before: 0,
    after: 0,
};

/// Text searched around an `<audio>` element for a transcript link.
const TRANSCRIPT_WINDOW: ContextWindow = ContextWindow::Chars {
    before: 500,
    after: 1000,
};

type RuleSpec = (
    &'static str,
    &'static str,
    Severity,
    &'static str,
    ContextWindow,
    Classifier,
);

const RULES: &[RuleSpec] = &[
    ("video-captions", "SC 1.2.2", Severity::Error, VIDEO, TAG_WINDOW, classify_captions),
    ("video-descriptions", "SC 1.2.5", Severity::Error, VIDEO, TAG_WINDOW, classify_descriptions),
    ("media-controls", "SC 2.1.1", Severity::Error, VIDEO, TAG_WINDOW, classify_controls),
    ("media-autoplay", "SC 2.2.2", Severity::Error, VIDEO, TAG_WINDOW, classify_video_autoplay),
    ("media-controls", "SC 2.1.1", Severity::Error, AUDIO, TAG_WINDOW, classify_controls),
    ("media-autoplay", "SC 2.2.2", Severity::Error, AUDIO, TAG_WINDOW, classify_audio_autoplay),
    ("audio-transcript", "SC 1.2.1", Severity::Warning, AUDIO, TRANSCRIPT_WINDOW, classify_transcript),
    ("embed-title", "SC 4.1.2", Severity::Error, IFRAME, TAG_WINDOW, classify_embed_title),
    ("embed-captions", "SC 1.2.2", Severity::Warning, IFRAME, TAG_WINDOW, classify_embed_captions),
];

pub struct MediaChecker {
    rules: Vec<Rule>,
    allowlist: Vec<String>,
}

impl MediaChecker {
    /// # Errors
    /// Returns an error if a rule pattern fails to compile.
    pub fn new(allowlist: Vec<String>) -> Result<Self> {
        let rules = RULES
            .iter()
            .map(|&(id, criterion, severity, pattern, window, classify)| {
                Rule::new(id, criterion, severity, pattern, window, classify)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules, allowlist })
    }
}

impl Checker for MediaChecker {
    fn name(&self) -> &'static str {
        "media"
    }

    fn title(&self) -> &'static str {
        "WCAG 2.1 Guideline 1.2 - Time-based Media"
    }

    fn check(&self, target: &ScanTarget) -> Vec<Issue> {
        if target.matches_any(&self.allowlist) {
            return Vec::new();
        }
        evaluate(target, &self.rules)
    }
}

fn media_tag<'a>(m: &RuleMatch<'a>) -> Option<OpenTag<'a>> {
    open_tag_at(m.content(), m.start).filter(|tag| !tag.is_component())
}

fn has_track(content: &str, tag: &OpenTag<'_>, kind: &str) -> bool {
    let inner = element_inner(content, tag, MEDIA_LIMIT).unwrap_or("");
    find_tags(inner, "track").iter().any(|track| {
        track
            .attr_text("kind")
            .is_some_and(|k| k.eq_ignore_ascii_case(kind))
    })
}

fn classify_captions(m: &RuleMatch<'_>) -> Verdict {
    match media_tag(m) {
        Some(tag) if !has_track(m.content(), &tag, "captions") => Verdict::Violation(
            "Video has no <track kind=\"captions\">".to_string(),
        ),
        _ => Verdict::Pass,
    }
}

fn classify_descriptions(m: &RuleMatch<'_>) -> Verdict {
    match media_tag(m) {
        Some(tag) if !has_track(m.content(), &tag, "descriptions") => Verdict::Violation(
            "Video has no <track kind=\"descriptions\"> audio description".to_string(),
        ),
        _ => Verdict::Pass,
    }
}

fn classify_controls(m: &RuleMatch<'_>) -> Verdict {
    match media_tag(m) {
        Some(tag) if !tag.has_attr("controls") => Verdict::Violation(format!(
            "<{}> has no controls attribute; keyboard users cannot operate it",
            tag.name
        )),
        _ => Verdict::Pass,
    }
}

fn classify_video_autoplay(m: &RuleMatch<'_>) -> Verdict {
    match media_tag(m) {
        Some(tag) if tag.has_attr("autoplay") && !tag.has_attr("muted") => {
            Verdict::Violation("Auto-playing video must be muted".to_string())
        }
        _ => Verdict::Pass,
    }
}

fn classify_audio_autoplay(m: &RuleMatch<'_>) -> Verdict {
    match media_tag(m) {
        Some(tag) if tag.has_attr("autoplay") => {
            Verdict::Violation("Audio must not play automatically".to_string())
        }
        _ => Verdict::Pass,
    }
}

fn classify_transcript(m: &RuleMatch<'_>) -> Verdict {
    if media_tag(m).is_none() || m.context.to_ascii_lowercase().contains("transcript") {
        Verdict::Pass
    } else {
        Verdict::Violation("Audio has no transcript link nearby".to_string())
    }
}

/// Raw tag text of an embedded YouTube or Vimeo player.
fn video_embed<'a>(m: &RuleMatch<'a>) -> Option<(OpenTag<'a>, String)> {
    let tag = media_tag(m)?;
    let raw = m.content()[tag.start..tag.end].to_ascii_lowercase();
    (raw.contains("youtube") || raw.contains("vimeo")).then_some((tag, raw))
}

fn classify_embed_title(m: &RuleMatch<'_>) -> Verdict {
    match video_embed(m) {
        Some((tag, _)) if !tag.has_value("title") => {
            Verdict::Violation("Embedded video player needs a title attribute".to_string())
        }
        _ => Verdict::Pass,
    }
}

fn classify_embed_captions(m: &RuleMatch<'_>) -> Verdict {
    match video_embed(m) {
        Some((_, raw)) if raw.contains("youtube") && !raw.contains("cc_load_policy=1") => {
            Verdict::Violation(
                "YouTube embed should enable captions with cc_load_policy=1".to_string(),
            )
        }
        _ => Verdict::Pass,
    }
}

#[cfg(test)]
#[path = "media_tests.rs"]
mod tests;
