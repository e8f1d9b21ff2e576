//! WCAG 2.1 contrast ratio arithmetic and palette case evaluation.

use indexmap::IndexMap;

use crate::config::ContrastCaseConfig;
use crate::error::{Result, WcagGuardError};

/// Minimum ratio for normal text (SC 1.4.3).
pub const AA_NORMAL: f64 = 4.5;
/// Minimum ratio for large text (SC 1.4.3).
pub const AA_LARGE: f64 = 3.0;

const LINEAR_THRESHOLD: f64 = 0.039_28;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Parse `#rgb` or `#rrggbb`; the leading `#` is optional.
///
/// # Errors
/// Returns `InvalidColor` for any other shape.
pub fn hex_to_rgb(value: &str) -> Result<Rgb> {
    let invalid = || WcagGuardError::InvalidColor {
        value: value.to_string(),
    };
    let hex = value.trim().trim_start_matches('#');
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match hex.len() {
        3 => {
            let double = |i: usize| channel(&hex[i..=i].repeat(2));
            Ok(Rgb {
                r: double(0)?,
                g: double(1)?,
                b: double(2)?,
            })
        }
        6 => Ok(Rgb {
            r: channel(&hex[0..2])?,
            g: channel(&hex[2..4])?,
            b: channel(&hex[4..6])?,
        }),
        _ => Err(invalid()),
    }
}

fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= LINEAR_THRESHOLD {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[must_use]
pub fn relative_luminance(color: Rgb) -> f64 {
    0.0722f64.mul_add(
        linearize(color.b),
        0.2126f64.mul_add(linearize(color.r), 0.7152 * linearize(color.g)),
    )
}

/// Contrast ratio between two colors, from 1.0 to 21.0. Symmetric.
#[must_use]
pub fn contrast_ratio(fg: Rgb, bg: Rgb) -> f64 {
    let a = relative_luminance(fg);
    let b = relative_luminance(bg);
    let (lighter, darker) = if a >= b { (a, b) } else { (b, a) };
    (lighter + 0.05) / (darker + 0.05)
}

#[must_use]
pub const fn required_ratio(large_text: bool) -> f64 {
    if large_text { AA_LARGE } else { AA_NORMAL }
}

#[must_use]
pub fn meets_aa(ratio: f64, large_text: bool) -> bool {
    ratio >= required_ratio(large_text)
}

/// Large text is at least 18pt, or 14pt when bold.
#[must_use]
pub fn is_large_text(points: f64, bold: bool) -> bool {
    points >= 18.0 || (bold && points >= 14.0)
}

/// Result of one palette case.
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastOutcome {
    pub name: String,
    pub foreground: String,
    pub background: String,
    pub large_text: bool,
    pub ratio: f64,
    pub required: f64,
    pub passed: bool,
}

/// Resolve a palette name or hex literal.
fn resolve(palette: &IndexMap<String, String>, color: &str) -> Result<Rgb> {
    if color.starts_with('#') {
        return hex_to_rgb(color);
    }
    let hex = palette
        .get(color)
        .ok_or_else(|| WcagGuardError::UnknownColor {
            name: color.to_string(),
        })?;
    hex_to_rgb(hex)
}

/// Evaluate every case against the palette, in case order.
///
/// # Errors
/// Returns `UnknownColor` or `InvalidColor` for an unresolvable color.
pub fn evaluate_cases(
    palette: &IndexMap<String, String>,
    cases: &[ContrastCaseConfig],
) -> Result<Vec<ContrastOutcome>> {
    cases
        .iter()
        .map(|case| {
            let fg = resolve(palette, &case.foreground)?;
            let bg = resolve(palette, &case.background)?;
            let ratio = contrast_ratio(fg, bg);
            let required = case.required.unwrap_or_else(|| required_ratio(case.large_text));
            tracing::trace!(case = %case.name, ratio, required, "contrast case");
            Ok(ContrastOutcome {
                name: case.name.clone(),
                foreground: case.foreground.clone(),
                background: case.background.clone(),
                large_text: case.large_text,
                ratio,
                required,
                passed: ratio >= required,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "contrast_tests.rs"]
mod tests;
