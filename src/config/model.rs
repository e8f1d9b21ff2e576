use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Supported config version.
pub const CONFIG_VERSION: &str = "1";

/// Root configuration loaded from `.wcag-guard.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub scanner: ScannerConfig,

    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub images: ImagesConfig,

    #[serde(default)]
    pub contrast: ContrastConfig,

    #[serde(default)]
    pub seo: SeoConfig,

    #[serde(default)]
    pub semantic: SemanticConfig,

    #[serde(default)]
    pub navigable: NavigableConfig,

    #[serde(default)]
    pub og_images: OgImagesConfig,

    #[serde(default)]
    pub allowlist: AllowlistConfig,
}

/// Source tree discovery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Respect .gitignore rules while walking (default: false)
    #[serde(default)]
    pub gitignore: bool,

    /// Glob patterns, relative to the project root, that select files to scan.
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    /// Directory names that are never descended into.
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            gitignore: false,
            include: default_include(),
            exclude_dirs: default_exclude_dirs(),
        }
    }
}

/// Locations of the rendered site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteConfig {
    #[serde(default = "default_build_dir")]
    pub build_dir: String,

    #[serde(default = "default_public_dir")]
    pub public_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            build_dir: default_build_dir(),
            public_dir: default_public_dir(),
        }
    }
}

/// Static image budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImagesConfig {
    #[serde(default = "default_image_dirs")]
    pub dirs: Vec<String>,

    /// Maximum size in bytes before an image is reported.
    #[serde(default = "default_max_image_bytes")]
    pub max_bytes: u64,

    #[serde(default = "default_image_extensions")]
    pub extensions: Vec<String>,

    #[serde(default = "default_preferred_format")]
    pub preferred_format: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            dirs: default_image_dirs(),
            max_bytes: default_max_image_bytes(),
            extensions: default_image_extensions(),
            preferred_format: default_preferred_format(),
        }
    }
}

/// Palette and the foreground/background pairs to verify.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContrastConfig {
    #[serde(default = "default_palette")]
    pub palette: IndexMap<String, String>,

    #[serde(default = "default_contrast_cases")]
    pub cases: Vec<ContrastCaseConfig>,
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            cases: default_contrast_cases(),
        }
    }
}

/// One `[[contrast.cases]]` entry. Colors are palette names or hex literals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContrastCaseConfig {
    pub name: String,
    pub foreground: String,
    pub background: String,

    /// Required ratio; derived from `large_text` when omitted.
    #[serde(default)]
    pub required: Option<f64>,

    #[serde(default)]
    pub large_text: bool,
}

impl ContrastCaseConfig {
    fn new(name: &str, foreground: &str, background: &str, large_text: bool) -> Self {
        Self {
            name: name.to_string(),
            foreground: foreground.to_string(),
            background: background.to_string(),
            required: None,
            large_text,
        }
    }
}

/// Rendered-page metadata limits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeoConfig {
    #[serde(default = "default_title_min")]
    pub title_min: usize,

    #[serde(default = "default_title_max")]
    pub title_max: usize,

    #[serde(default = "default_description_min")]
    pub description_min: usize,

    #[serde(default = "default_description_max")]
    pub description_max: usize,

    /// Page file names that are not validated (error pages and the like).
    #[serde(default = "default_seo_skip_files")]
    pub skip_files: Vec<String>,

    /// Page files starting with this prefix are framework internals.
    #[serde(default = "default_seo_skip_prefix")]
    pub skip_prefix: String,
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            title_min: default_title_min(),
            title_max: default_title_max(),
            description_min: default_description_min(),
            description_max: default_description_max(),
            skip_files: default_seo_skip_files(),
            skip_prefix: default_seo_skip_prefix(),
        }
    }
}

/// Page structure settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SemanticConfig {
    /// Components that render the page's `<h1>`.
    #[serde(default = "default_heading_components")]
    pub heading_components: Vec<String>,

    /// File name -> landmark element the file must render.
    #[serde(default = "default_landmarks")]
    pub landmarks: IndexMap<String, String>,
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            heading_components: default_heading_components(),
            landmarks: default_landmarks(),
        }
    }
}

/// Page navigation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavigableConfig {
    /// Components that set the document title from a `title` prop.
    #[serde(default = "default_title_components")]
    pub title_components: Vec<String>,
}

impl Default for NavigableConfig {
    fn default() -> Self {
        Self {
            title_components: default_title_components(),
        }
    }
}

/// Generated social preview images.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OgImagesConfig {
    #[serde(default = "default_og_dir")]
    pub dir: String,

    /// Only files with this name are checked, one per page directory.
    #[serde(default = "default_og_file_name")]
    pub file_name: String,

    #[serde(default = "default_og_width")]
    pub width: u32,

    #[serde(default = "default_og_height")]
    pub height: u32,

    /// Images above this size in bytes are errors.
    #[serde(default = "default_og_max_bytes")]
    pub max_bytes: u64,

    /// Images above this size in bytes are warnings.
    #[serde(default = "default_og_recommended_bytes")]
    pub recommended_bytes: u64,
}

impl Default for OgImagesConfig {
    fn default() -> Self {
        Self {
            dir: default_og_dir(),
            file_name: default_og_file_name(),
            width: default_og_width(),
            height: default_og_height(),
            max_bytes: default_og_max_bytes(),
            recommended_bytes: default_og_recommended_bytes(),
        }
    }
}

/// Files exempt from a rule family, matched as a path prefix or suffix of
/// the root-relative path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AllowlistConfig {
    #[serde(default = "default_compatible_allowlist")]
    pub compatible: Vec<String>,

    #[serde(default = "default_input_assistance_allowlist")]
    pub input_assistance: Vec<String>,

    #[serde(default = "default_timing_allowlist")]
    pub timing: Vec<String>,

    #[serde(default)]
    pub semantic: Vec<String>,

    #[serde(default)]
    pub text_alternatives: Vec<String>,

    #[serde(default)]
    pub autocomplete: Vec<String>,

    #[serde(default)]
    pub media: Vec<String>,

    #[serde(default = "default_keyboard_allowlist")]
    pub keyboard: Vec<String>,

    #[serde(default)]
    pub seizures: Vec<String>,

    #[serde(default = "default_framework_allowlist")]
    pub navigable: Vec<String>,

    #[serde(default = "default_framework_allowlist")]
    pub input_modalities: Vec<String>,

    #[serde(default)]
    pub readable: Vec<String>,

    #[serde(default)]
    pub predictable: Vec<String>,

    #[serde(default)]
    pub distinguishable: Vec<String>,

    #[serde(default)]
    pub mobile: Vec<String>,
}

impl Default for AllowlistConfig {
    fn default() -> Self {
        Self {
            compatible: default_compatible_allowlist(),
            input_assistance: default_input_assistance_allowlist(),
            timing: default_timing_allowlist(),
            semantic: Vec::new(),
            text_alternatives: Vec::new(),
            autocomplete: Vec::new(),
            media: Vec::new(),
            keyboard: default_keyboard_allowlist(),
            seizures: Vec::new(),
            navigable: default_framework_allowlist(),
            input_modalities: default_framework_allowlist(),
            readable: Vec::new(),
            predictable: Vec::new(),
            distinguishable: Vec::new(),
            mobile: Vec::new(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

fn default_include() -> Vec<String> {
    strings(&[
        "**/*.tsx", "**/*.jsx", "**/*.ts", "**/*.js", "**/*.mdx", "**/*.html", "**/*.css",
        "**/*.scss",
    ])
}

fn default_exclude_dirs() -> Vec<String> {
    strings(&[
        "node_modules",
        ".next",
        "out",
        "dist",
        "build",
        ".git",
        "public",
        "coverage",
        "scripts",
    ])
}

fn default_build_dir() -> String {
    ".next/server/pages".to_string()
}

fn default_public_dir() -> String {
    "public".to_string()
}

fn default_image_dirs() -> Vec<String> {
    strings(&["public/assets"])
}

const fn default_max_image_bytes() -> u64 {
    100 * 1024
}

fn default_image_extensions() -> Vec<String> {
    strings(&["jpg", "jpeg", "png", "gif", "bmp", "webp", "svg"])
}

fn default_preferred_format() -> String {
    "webp".to_string()
}

fn default_palette() -> IndexMap<String, String> {
    [
        ("primary-400", "#3397cf"),
        ("primary-500", "#185f99"),
        ("primary-600", "#14497a"),
        ("primary-700", "#0f3559"),
        ("secondary-500", "#36AADD"),
        ("secondary-600", "#14497a"),
        ("secondary-700", "#0f3559"),
        ("white", "#FFFFFF"),
        ("gray-900", "#242929"),
    ]
    .into_iter()
    .map(|(name, hex)| (name.to_string(), hex.to_string()))
    .collect()
}

fn default_contrast_cases() -> Vec<ContrastCaseConfig> {
    vec![
        ContrastCaseConfig::new("Button Primary", "white", "primary-500", false),
        ContrastCaseConfig::new("Button Primary Hover", "white", "primary-600", false),
        ContrastCaseConfig::new("Button Secondary", "white", "secondary-600", false),
        ContrastCaseConfig::new("Button Secondary Hover", "white", "secondary-700", false),
        ContrastCaseConfig::new("Button Tertiary", "primary-500", "white", false),
        ContrastCaseConfig::new("Nav Link", "primary-500", "white", false),
        ContrastCaseConfig::new("Nav Dropdown Background", "white", "primary-500", false),
        ContrastCaseConfig::new("Nav Hover/Active", "white", "primary-500", false),
        ContrastCaseConfig::new("Header Primary (Large)", "primary-500", "white", true),
        ContrastCaseConfig::new("Header Dark Mode (Large)", "primary-400", "gray-900", true),
        ContrastCaseConfig::new("Page Header", "gray-900", "secondary-500", false),
        ContrastCaseConfig::new("Job Form Light", "white", "secondary-600", false),
        ContrastCaseConfig::new("Job Form Dark", "white", "secondary-700", false),
        ContrastCaseConfig::new("Blog Badge", "white", "primary-500", false),
        ContrastCaseConfig::new("Markdown Anchor", "white", "primary-500", false),
        ContrastCaseConfig::new("Markdown Anchor Dark", "white", "primary-600", false),
    ]
}

const fn default_title_min() -> usize {
    50
}

const fn default_title_max() -> usize {
    60
}

const fn default_description_min() -> usize {
    150
}

const fn default_description_max() -> usize {
    160
}

fn default_seo_skip_files() -> Vec<String> {
    strings(&["500.html"])
}

fn default_seo_skip_prefix() -> String {
    "_".to_string()
}

fn default_heading_components() -> Vec<String> {
    strings(&["PageHeader"])
}

fn default_landmarks() -> IndexMap<String, String> {
    [
        ("Layout.tsx", "main"),
        ("Navigation.tsx", "nav"),
        ("Footer.tsx", "footer"),
    ]
    .into_iter()
    .map(|(file, landmark)| (file.to_string(), landmark.to_string()))
    .collect()
}

fn default_title_components() -> Vec<String> {
    strings(&["SEO"])
}

fn default_og_dir() -> String {
    "public/assets/og-images".to_string()
}

fn default_og_file_name() -> String {
    "image.png".to_string()
}

const fn default_og_width() -> u32 {
    1200
}

const fn default_og_height() -> u32 {
    630
}

const fn default_og_max_bytes() -> u64 {
    500 * 1024
}

const fn default_og_recommended_bytes() -> u64 {
    300 * 1024
}

fn default_compatible_allowlist() -> Vec<String> {
    strings(&["components/common/"])
}

fn default_input_assistance_allowlist() -> Vec<String> {
    strings(&["components/common/Form.tsx", "components/common/Select.tsx"])
}

fn default_timing_allowlist() -> Vec<String> {
    strings(&["StatusModal.tsx", "ContactForm.tsx", "JobForm.tsx"])
}

fn default_keyboard_allowlist() -> Vec<String> {
    strings(&[
        "Button.tsx",
        "Logo.tsx",
        "MenuToggle.tsx",
        "CircleAvatar.tsx",
        "HexagonAvatar.tsx",
        "GradientHeader.tsx",
        "PageHeader.tsx",
        "FeatureCard.tsx",
        "LoadingIndicator.tsx",
    ])
}

/// API routes and the framework's document shell.
fn default_framework_allowlist() -> Vec<String> {
    strings(&["pages/api/", "pages/_app.tsx", "pages/_document.tsx"])
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
