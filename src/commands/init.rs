use std::fs;

use crate::cli::{Cli, InitArgs};
use crate::{EXIT_SUCCESS, Result, WcagGuardError};

use super::context::{report_failure, resolve_path};

#[must_use]
pub fn run_init(args: &InitArgs, cli: &Cli) -> i32 {
    match run_init_impl(args, cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => report_failure(&e),
    }
}

/// Writes the default configuration file under the project root.
///
/// # Errors
/// Returns an error if the file already exists (without --force) or cannot be written.
pub fn run_init_impl(args: &InitArgs, cli: &Cli) -> Result<()> {
    let output_path = resolve_path(&cli.root, &args.output);

    if output_path.exists() && !args.force {
        return Err(WcagGuardError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    fs::write(&output_path, generate_config_template())?;

    if !cli.quiet {
        println!("Created configuration file: {}", output_path.display());
    }
    Ok(())
}

#[must_use]
pub fn generate_config_template() -> String {
    r##"# wcag-guard configuration file
version = "1"

[scanner]
# Source files to inspect, relative to the project root
include = ["**/*.tsx", "**/*.jsx", "**/*.ts", "**/*.js", "**/*.mdx", "**/*.html", "**/*.css", "**/*.scss"]

# Directory names that are never descended into
exclude_dirs = ["node_modules", ".next", "out", "dist", "build", ".git", "public", "coverage", "scripts"]

# Respect .gitignore while walking (same as --gitignore)
gitignore = false

[site]
# Rendered HTML pages checked by `links`, `structured-data` and `seo`
build_dir = ".next/server/pages"

# Static files served verbatim; each file is a valid link target
public_dir = "public"

[images]
dirs = ["public/assets"]

# Images above this size in bytes are reported (default: 100KB)
max_bytes = 102400

extensions = ["jpg", "jpeg", "png", "gif", "bmp", "webp", "svg"]
preferred_format = "webp"

[seo]
title_min = 50
title_max = 60
description_min = 150
description_max = 160
skip_files = ["500.html"]
skip_prefix = "_"

[semantic]
# Components that render the page's <h1>
heading_components = ["PageHeader"]

# Layout files and the landmark element each must render
[semantic.landmarks]
"Layout.tsx" = "main"
"Navigation.tsx" = "nav"
"Footer.tsx" = "footer"

[navigable]
# Components that set the document title from a `title` prop
title_components = ["SEO"]

[og_images]
# Generated social preview images checked by `og-images`
dir = "public/assets/og-images"
file_name = "image.png"
width = 1200
height = 630

# Errors above max_bytes, warnings above recommended_bytes
max_bytes = 512000
recommended_bytes = 307200

# Files exempt from a rule family, matched as a path prefix or suffix
[allowlist]
compatible = ["components/common/"]
input_assistance = ["components/common/Form.tsx", "components/common/Select.tsx"]
timing = ["StatusModal.tsx", "ContactForm.tsx", "JobForm.tsx"]
# semantic = []
# text_alternatives = []
# autocomplete = []
# media = []
keyboard = [
    "Button.tsx",
    "Logo.tsx",
    "MenuToggle.tsx",
    "CircleAvatar.tsx",
    "HexagonAvatar.tsx",
    "GradientHeader.tsx",
    "PageHeader.tsx",
    "FeatureCard.tsx",
    "LoadingIndicator.tsx",
]
navigable = ["pages/api/", "pages/_app.tsx", "pages/_document.tsx"]
input_modalities = ["pages/api/", "pages/_app.tsx", "pages/_document.tsx"]
# seizures = []
# readable = []
# predictable = []
# distinguishable = []
# mobile = []

# Palette and color pairs for `contrast`. Setting either key replaces the
# built-in list. Colors are palette names or #hex literals.
# [contrast.palette]
# "primary-500" = "#185f99"
# "white" = "#FFFFFF"
#
# [[contrast.cases]]
# name = "Button Primary"
# foreground = "white"
# background = "primary-500"
# large_text = false
# required = 4.5
"##
    .to_string()
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
