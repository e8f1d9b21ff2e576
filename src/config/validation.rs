//! Configuration semantic validation.
//!
//! Checks cross-field constraints that serde cannot express.

use crate::config::Config;
use crate::{Result, WcagGuardError};

/// Validates semantic correctness of a configuration.
///
/// # Errors
/// Returns an error if length ranges are inverted, an image budget is zero or
/// inverted, no include pattern is configured, or a contrast case is
/// misconfigured.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_scanner_section(config)?;
    validate_seo_section(config)?;
    validate_images_section(config)?;
    validate_contrast_section(config)?;
    validate_og_images_section(config)?;
    Ok(())
}

fn validate_scanner_section(config: &Config) -> Result<()> {
    if config.scanner.include.is_empty() {
        return Err(WcagGuardError::Config(
            "scanner.include must list at least one glob pattern".to_string(),
        ));
    }
    Ok(())
}

fn validate_seo_section(config: &Config) -> Result<()> {
    let seo = &config.seo;
    if seo.title_min > seo.title_max {
        return Err(WcagGuardError::Config(format!(
            "seo.title_min ({}) must not exceed seo.title_max ({})",
            seo.title_min, seo.title_max
        )));
    }
    if seo.description_min > seo.description_max {
        return Err(WcagGuardError::Config(format!(
            "seo.description_min ({}) must not exceed seo.description_max ({})",
            seo.description_min, seo.description_max
        )));
    }
    Ok(())
}

fn validate_images_section(config: &Config) -> Result<()> {
    if config.images.max_bytes == 0 {
        return Err(WcagGuardError::Config(
            "images.max_bytes must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

fn validate_contrast_section(config: &Config) -> Result<()> {
    for (i, case) in config.contrast.cases.iter().enumerate() {
        for color in [&case.foreground, &case.background] {
            let is_literal = color.starts_with('#');
            if !is_literal && !config.contrast.palette.contains_key(color) {
                return Err(WcagGuardError::UnknownColor {
                    name: format!("{color} (contrast.cases[{i}] \"{}\")", case.name),
                });
            }
        }
        if let Some(required) = case.required
            && !(1.0..=21.0).contains(&required)
        {
            return Err(WcagGuardError::Config(format!(
                "contrast.cases[{i}].required must be between 1.0 and 21.0, got {required}"
            )));
        }
    }
    Ok(())
}

fn validate_og_images_section(config: &Config) -> Result<()> {
    let og = &config.og_images;
    if og.width == 0 || og.height == 0 {
        return Err(WcagGuardError::Config(format!(
            "og_images dimensions must be non-zero, got {}x{}",
            og.width, og.height
        )));
    }
    if og.recommended_bytes > og.max_bytes {
        return Err(WcagGuardError::Config(format!(
            "og_images.recommended_bytes ({}) must not exceed og_images.max_bytes ({})",
            og.recommended_bytes, og.max_bytes
        )));
    }
    if og.file_name.trim().is_empty() {
        return Err(WcagGuardError::Config(
            "og_images.file_name must not be empty".to_string(),
        ));
    }
    Ok(())
}
