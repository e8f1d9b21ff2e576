use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WcagGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid regular expression: {pattern}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Build directory not found: {path}. Run the site build first.")]
    MissingBuildDir { path: PathBuf },

    #[error("Asset directory not found: {path}")]
    MissingAssetDir { path: PathBuf },

    #[error("No rendered HTML pages found in {path}")]
    NoPages { path: PathBuf },

    #[error("Unknown palette color: {name}")]
    UnknownColor { name: String },

    #[error("Invalid hex color: {value}")]
    InvalidColor { value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

impl WcagGuardError {
    /// Short category label used as the heading of a printed error.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "Config",
            Self::FileRead { .. } => "FileRead",
            Self::InvalidPattern { .. } => "InvalidPattern",
            Self::InvalidRegex { .. } => "InvalidRegex",
            Self::MissingBuildDir { .. } | Self::MissingAssetDir { .. } | Self::NoPages { .. } => {
                "Precondition"
            }
            Self::UnknownColor { .. } | Self::InvalidColor { .. } => "Palette",
            Self::Io(_) => "IO",
            Self::TomlParse(_) | Self::TomlSerialize(_) => "TOML",
            Self::JsonSerialize(_) => "JSON",
        }
    }

    /// The error message without the category prefix.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Config(msg) => msg.clone(),
            Self::FileRead { path, .. } => format!("Failed to read file: {}", path.display()),
            Self::InvalidPattern { pattern, .. } => format!("Invalid glob pattern: {pattern}"),
            Self::InvalidRegex { pattern, .. } => format!("Invalid regular expression: {pattern}"),
            other => other.to_string(),
        }
    }

    /// Underlying cause, if any.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::FileRead { source, .. } => Some(source.to_string()),
            Self::InvalidPattern { source, .. } => Some(source.to_string()),
            Self::InvalidRegex { source, .. } => Some(source.to_string()),
            _ => None,
        }
    }

    /// Actionable hint for the user.
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Config(_) | Self::TomlParse(_) => {
                Some("Check the .wcag-guard.toml config file format")
            }
            Self::FileRead { source, .. } | Self::Io(source) => match source.kind() {
                std::io::ErrorKind::NotFound => Some("Check that the file path exists"),
                std::io::ErrorKind::PermissionDenied => Some("Check file permissions"),
                _ => None,
            },
            Self::InvalidPattern { .. } => Some("Check the glob pattern syntax"),
            Self::MissingBuildDir { .. } => {
                Some("Build the site first, or point --build-dir at the rendered pages")
            }
            Self::MissingAssetDir { .. } => {
                Some("Generate the Open Graph images first, or point og_images.dir at them")
            }
            Self::NoPages { .. } => Some("Make sure the build emitted .html pages"),
            Self::UnknownColor { .. } => {
                Some("Every contrast case must reference a color in [contrast.palette]")
            }
            Self::InvalidColor { .. } => Some("Use #rgb or #rrggbb hex notation"),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, WcagGuardError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
