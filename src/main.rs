use clap::Parser;
use tracing_subscriber::EnvFilter;

use wcag_guard::cli::{Cli, Commands};
use wcag_guard::commands::{
    SiteCheck, run_contrast, run_images, run_init, run_og_images, run_site, run_source,
};
use wcag_guard::rules::Family;

fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "wcag_guard=warn",
        1 => "wcag_guard=debug",
        _ => "wcag_guard=trace",
    }
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter(verbose)));

    // Logs go to stderr; stdout carries only the report.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match &cli.command {
        Commands::Compatible(args) => run_source(args, &cli, &[Family::Compatible]),
        Commands::InputAssistance(args) => run_source(args, &cli, &[Family::InputAssistance]),
        Commands::Semantic(args) => run_source(args, &cli, &[Family::Semantic]),
        Commands::EnoughTime(args) => run_source(args, &cli, &[Family::Timing]),
        Commands::TextAlternatives(args) => run_source(args, &cli, &[Family::TextAlternatives]),
        Commands::Autocomplete(args) => run_source(args, &cli, &[Family::Autocomplete]),
        Commands::Media(args) => run_source(args, &cli, &[Family::Media]),
        Commands::Keyboard(args) => run_source(args, &cli, &[Family::Keyboard]),
        Commands::Seizures(args) => run_source(args, &cli, &[Family::Seizures]),
        Commands::Navigable(args) => run_source(args, &cli, &[Family::Navigable]),
        Commands::InputModalities(args) => run_source(args, &cli, &[Family::InputModalities]),
        Commands::Readable(args) => run_source(args, &cli, &[Family::Readable]),
        Commands::Predictable(args) => run_source(args, &cli, &[Family::Predictable]),
        Commands::Distinguishable(args) => run_source(args, &cli, &[Family::Distinguishable]),
        Commands::Mobile(args) => run_source(args, &cli, &[Family::Mobile]),
        Commands::Source(args) => run_source(args, &cli, &Family::ALL),
        Commands::Contrast(args) => run_contrast(args, &cli),
        Commands::Images(args) => run_images(args, &cli),
        Commands::OgImages(args) => run_og_images(args, &cli),
        Commands::Links(args) => run_site(args, &cli, SiteCheck::Links),
        Commands::StructuredData(args) => run_site(args, &cli, SiteCheck::StructuredData),
        Commands::Seo(args) => run_site(args, &cli, SiteCheck::Seo),
        Commands::Init(args) => run_init(args, &cli),
    };

    std::process::exit(exit_code);
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
