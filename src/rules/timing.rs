//! Guideline 2.2 (Enough Time): time limits and moving or auto-updating
//! content.

use std::sync::LazyLock;

use regex::Regex;

use crate::checker::{
    Checker, ContextWindow, Issue, Rule, RuleMatch, Severity, Verdict, evaluate,
};
use crate::error::Result;
use crate::source::ScanTarget;

/// Timers at or above this many milliseconds are treated as time limits.
const SHORT_DELAY_MS: u64 = 5000;

static SESSION_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bsession|\blogout|\btimeout\b|\bexpir").expect("Invalid regex")
});
static COUNTDOWN_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)countdown|\btimer\b|remaining|time\s*left").expect("Invalid regex")
});
static SUBMIT_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)submit").expect("Invalid regex"));
static SAFE_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)animation|transition|delay|fade|slide|debounce|throttle")
        .expect("Invalid regex")
});
static CAROUSEL_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)carousel|slider|slideshow|swiper").expect("Invalid regex")
});
static PAUSE_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)pause|stop|controls").expect("Invalid regex"));
static REFRESH_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)fetch|update|refresh|poll|load").expect("Invalid regex"));
static CLEAR_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)clearInterval|stop|pause").expect("Invalid regex"));
static DELAY_ARG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:setTimeout|setInterval)\s*\((?s:.{0,400}?),\s*(\d+)\s*\)")
        .expect("Invalid regex")
});

pub struct TimingChecker {
    rules: Vec<Rule>,
    allowlist: Vec<String>,
}

impl TimingChecker {
    /// # Errors
    /// Returns an error if a rule pattern fails to compile.
    pub fn new(allowlist: Vec<String>) -> Result<Self> {
        let rules = vec![
            Rule::new(
                "timing-adjustable",
                "SC 2.2.1",
                Severity::Error,
                r"\b(?:setTimeout|setInterval)\s*\(",
                ContextWindow::Lines {
                    before: 10,
                    after: 10,
                },
                classify_time_limit,
            )?,
            Rule::new(
                "pause-stop-hide",
                "SC 2.2.2",
                Severity::Error,
                r"(?i)auto_?play\s*[:=]\s*\{?\s*true",
                ContextWindow::Lines {
                    before: 10,
                    after: 20,
                },
                classify_autoplay,
            )?,
            Rule::new(
                "pause-stop-hide",
                "SC 2.2.2",
                Severity::Error,
                r"(?i)<marquee[\s>]|\bticker\b",
                ContextWindow::Chars {
                    before: 0,
                    after: 0,
                },
                |_| {
                    Verdict::Violation(
                        "Scrolling or marquee content needs a way to pause, stop or hide it".to_string(),
                    )
                },
            )?,
            Rule::new(
                "pause-stop-hide",
                "SC 2.2.2",
                Severity::Error,
                r"\bsetInterval\s*\(",
                ContextWindow::Lines {
                    before: 5,
                    after: 5,
                },
                classify_polling,
            )?,
        ];
        Ok(Self { rules, allowlist })
    }
}

impl Checker for TimingChecker {
    fn name(&self) -> &'static str {
        "enough-time"
    }

    fn title(&self) -> &'static str {
        "WCAG 2.1 Guideline 2.2 - Enough Time"
    }

    fn check(&self, target: &ScanTarget) -> Vec<Issue> {
        if target.matches_any(&self.allowlist) {
            return Vec::new();
        }
        evaluate(target, &self.rules)
    }
}

/// Literal millisecond argument of the timer call starting at the match.
fn literal_delay(m: &RuleMatch<'_>) -> Option<u64> {
    DELAY_ARG
        .captures(&m.content()[m.start..])
        .and_then(|c| c.get(1))
        .and_then(|d| d.as_str().parse().ok())
}

fn classify_time_limit(m: &RuleMatch<'_>) -> Verdict {
    if literal_delay(m).is_some_and(|ms| ms < SHORT_DELAY_MS) {
        return Verdict::Pass;
    }
    let context = m.context;
    let limited = SESSION_WORDS.is_match(context)
        || COUNTDOWN_WORDS.is_match(context)
        || SUBMIT_WORDS.is_match(context);
    if limited && !SAFE_WORDS.is_match(context) {
        Verdict::Violation(
            "Possible time limit; users must be able to turn off, adjust or extend it".to_string(),
        )
    } else {
        Verdict::Pass
    }
}

fn classify_autoplay(m: &RuleMatch<'_>) -> Verdict {
    if CAROUSEL_WORDS.is_match(m.context) && !PAUSE_WORDS.is_match(m.context) {
        Verdict::Violation("Auto-playing carousel has no pause or stop control".to_string())
    } else {
        Verdict::Pass
    }
}

fn classify_polling(m: &RuleMatch<'_>) -> Verdict {
    let Some(ms) = literal_delay(m) else {
        return Verdict::Pass;
    };
    if ms > SHORT_DELAY_MS && REFRESH_WORDS.is_match(m.context) && !CLEAR_WORDS.is_match(m.context)
    {
        Verdict::Violation(format!(
            "Content refreshes every {ms} ms with no way to pause or stop the updates"
        ))
    } else {
        Verdict::Pass
    }
}

#[cfg(test)]
#[path = "timing_tests.rs"]
mod tests;
