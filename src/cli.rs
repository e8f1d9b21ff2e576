use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "wcag-guard")]
#[command(author, version, about = "WCAG guard - heuristic accessibility, SEO and image checks for websites")]
#[command(long_about = "Scans a website source tree, its rendered build, its palette and its \
    image assets for WCAG 2.1, SEO and image-optimization problems.\n\n\
    Exit codes:\n  \
    0 - No blocking issues\n  \
    1 - Blocking issues found, or a precondition/configuration error")]
pub struct Cli {
    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Skip loading configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Path to configuration file (default: <root>/.wcag-guard.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Project root that source globs and site paths are relative to
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Guideline 4.1 accessible names, ARIA tables, status messages
    Compatible(SourceArgs),

    /// Guideline 3.3 form labelling and error handling
    InputAssistance(SourceArgs),

    /// SC 1.3.1 heading hierarchy, landmarks, lists, tables
    Semantic(SourceArgs),

    /// Guideline 2.2 timing and moving content
    EnoughTime(SourceArgs),

    /// SC 1.1.1 image alternatives and labelled controls
    TextAlternatives(SourceArgs),

    /// SC 1.3.5 autocomplete tokens
    Autocomplete(SourceArgs),

    /// Guideline 1.2 captions, descriptions, player controls
    Media(SourceArgs),

    /// Guideline 2.1 keyboard handlers, dialog escape, shortcuts
    Keyboard(SourceArgs),

    /// Guideline 2.3 flashing content and reduced motion
    Seizures(SourceArgs),

    /// Guideline 2.4 bypass blocks, titles, focus, link purpose
    Navigable(SourceArgs),

    /// Guideline 2.5 gestures, pointer cancellation, label in name
    InputModalities(SourceArgs),

    /// Guideline 3.1 page language and language of parts
    Readable(SourceArgs),

    /// Guideline 3.2 context changes and consistent navigation
    Predictable(SourceArgs),

    /// Guideline 1.4 audio control, images of text, reflow
    Distinguishable(SourceArgs),

    /// Responsive images, viewport meta, base font size
    Mobile(SourceArgs),

    /// Run every source rule family in one pass
    Source(SourceArgs),

    /// SC 1.4.3 palette contrast table
    Contrast(ReportArgs),

    /// Image format and size budget
    Images(ReportArgs),

    /// Open Graph image dimensions and file size
    OgImages(ReportArgs),

    /// Internal links in the rendered build
    Links(SiteArgs),

    /// JSON-LD validation in the rendered build
    StructuredData(SiteArgs),

    /// Title/description/canonical metadata in the rendered build
    Seo(SiteArgs),

    /// Generate a default configuration file
    Init(InitArgs),
}

/// Where and how a report is written.
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    #[command(flatten)]
    pub report: ReportArgs,

    /// Respect .gitignore while walking the source tree
    #[arg(long)]
    pub gitignore: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SiteArgs {
    #[command(flatten)]
    pub report: ReportArgs,

    /// Rendered pages directory (overrides config `site.build_dir`)
    #[arg(long)]
    pub build_dir: Option<PathBuf>,

    /// Static files directory (overrides config `site.public_dir`)
    #[arg(long)]
    pub public_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output path for the configuration file, relative to --root
    #[arg(short, long, default_value = ".wcag-guard.toml")]
    pub output: PathBuf,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
