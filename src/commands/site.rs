//! Commands over the rendered build: `links`, `structured-data` and `seo`.

use std::path::{Path, PathBuf};

use crate::Result;
use crate::checker::{Issue, Report};
use crate::cli::{Cli, SiteArgs};
use crate::config::Config;
use crate::site::links::check_links;
use crate::site::seo::{check_seo, is_skipped};
use crate::site::structured_data::check_structured_data;
use crate::site::{Page, collect_routes, discover_pages};
use crate::source::relative_display;

use super::context::{emit_report, ensure_root, load_config, report_failure, resolve_path};
use super::scan::read_error_issue;

/// Which check to run over the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteCheck {
    Links,
    StructuredData,
    Seo,
}

impl SiteCheck {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Links => "Internal Links",
            Self::StructuredData => "Structured Data (JSON-LD)",
            Self::Seo => "SEO Metadata",
        }
    }
}

/// Pages of a rendered build, loaded once per run.
#[derive(Debug)]
pub struct SiteBuild {
    pub build_dir: PathBuf,
    pub public_dir: PathBuf,
    /// Every page file found, readable or not.
    pub page_files: Vec<PathBuf>,
    pub pages: Vec<Page>,
    /// `read-error` warnings for pages that could not be loaded.
    pub read_errors: Vec<Issue>,
}

impl SiteBuild {
    /// Discover and read the pages under `build_dir`.
    ///
    /// # Errors
    /// Returns `MissingBuildDir` or `NoPages` when there is nothing to check.
    pub fn load(build_dir: &Path, public_dir: &Path) -> Result<Self> {
        let page_files = discover_pages(build_dir)?;
        let mut pages = Vec::with_capacity(page_files.len());
        let mut read_errors = Vec::new();
        for path in &page_files {
            match Page::load(build_dir, path) {
                Ok(page) => pages.push(page),
                Err(e) => read_errors.push(read_error_issue(relative_display(build_dir, path), &e)),
            }
        }
        Ok(Self {
            build_dir: build_dir.to_path_buf(),
            public_dir: public_dir.to_path_buf(),
            page_files,
            pages,
            read_errors,
        })
    }
}

#[must_use]
pub fn run_site(args: &SiteArgs, cli: &Cli, check: SiteCheck) -> i32 {
    match run_site_impl(args, cli, check) {
        Ok(exit_code) => exit_code,
        Err(e) => report_failure(&e),
    }
}

/// Run `check` over the rendered build and emit the report.
///
/// # Errors
/// Returns an error if the configuration is invalid or the build directory
/// is missing or holds no pages. No report is produced in that case.
pub fn run_site_impl(args: &SiteArgs, cli: &Cli, check: SiteCheck) -> Result<i32> {
    // 1. Load configuration
    ensure_root(&cli.root)?;
    let config = load_config(&cli.root, cli.config.as_deref(), cli.no_config)?;

    // 2. Locate and read the build
    let build_dir = resolve_path(
        &cli.root,
        args.build_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(&config.site.build_dir)),
    );
    let public_dir = resolve_path(
        &cli.root,
        args.public_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(&config.site.public_dir)),
    );
    let build = SiteBuild::load(&build_dir, &public_dir)?;

    // 3. Check and output
    let report = site_report(check, &build, &config)?;
    emit_report(&report, &args.report, cli)
}

/// Build the report for `check` over a loaded build.
///
/// # Errors
/// Returns an error if the public directory walk cannot be set up.
pub fn site_report(check: SiteCheck, build: &SiteBuild, config: &Config) -> Result<Report> {
    let mut report = Report::new(check.title(), "pages");
    report.extend(build.read_errors.iter().cloned());

    match check {
        SiteCheck::Links => {
            let routes = collect_routes(&build.build_dir, &build.page_files, &build.public_dir)?;
            report.add_checked(build.pages.len());
            report.extend(check_links(&build.pages, &routes));
        }
        SiteCheck::StructuredData => {
            report.add_checked(build.pages.len());
            report.extend(check_structured_data(&build.pages));
        }
        SiteCheck::Seo => {
            let checked = build
                .pages
                .iter()
                .filter(|page| !is_skipped(page, &config.seo))
                .count();
            report.add_checked(checked);
            report.extend(check_seo(&build.pages, &config.seo));
        }
    }
    Ok(report)
}

#[cfg(test)]
#[path = "site_tests.rs"]
mod tests;
