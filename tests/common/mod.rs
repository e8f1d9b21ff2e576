#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the wcag-guard binary.
#[macro_export]
macro_rules! wcag_guard {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("wcag-guard"))
    };
}

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        self.create_bytes(relative_path, content.as_bytes());
    }

    /// Creates a file with raw bytes, e.g. invalid UTF-8 or image data.
    pub fn create_bytes(&self, relative_path: &str, content: &[u8]) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Creates a directory in the temp directory.
    pub fn create_dir(&self, relative_path: &str) {
        let path = self.dir.path().join(relative_path);
        fs::create_dir_all(&path).expect("Failed to create directory");
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `.wcag-guard.toml` at the fixture root.
    pub fn create_config(&self, content: &str) {
        self.create_file(".wcag-guard.toml", content);
    }

    /// Writes a rendered page under the default build directory.
    pub fn create_page(&self, relative_path: &str, html: &str) {
        self.create_file(&format!("{BUILD_DIR}/{relative_path}"), html);
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Default `site.build_dir`.
pub const BUILD_DIR: &str = ".next/server/pages";

/// A component with an unlabelled icon button and an unnamed link.
pub const INACCESSIBLE_NAV: &str = r#"export default function Nav() {
  return (
    <nav>
      <button onClick={toggle}></button>
      <a href="/about"></a>
    </nav>
  );
}
"#;

/// A component every source family accepts.
pub const ACCESSIBLE_NAV: &str = r#"export default function Nav() {
  return (
    <nav aria-label="Main">
      <ul>
        <li><a href="/about">About us</a></li>
        <li><button type="button" onClick={toggle}>Menu</button></li>
      </ul>
    </nav>
  );
}
"#;

/// A `<video>` with no tracks and no controls.
pub const BARE_VIDEO: &str = r#"export const Intro = () => (
  <video src="/intro.mp4" autoPlay></video>
);
"#;

/// A complete page: in-range title and description, HTTPS canonical.
pub fn seo_page(title: &str, description: &str, canonical: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>{title}</title>
<meta name="description" content="{description}">
<link rel="canonical" href="{canonical}">
</head><body><h1>{title}</h1></body></html>"#
    )
}

pub const HOME_TITLE: &str = "Industrial Automation Consulting and Services in Europe";
pub const CAREERS_TITLE: &str = "Careers in Industrial Automation and Robotics Engineering";
pub const HOME_DESCRIPTION: &str = "We plan, build and maintain automation systems for manufacturers across Europe, from first feasibility study to commissioning and long-term service plans.";
pub const CAREERS_DESCRIPTION: &str = "Join our engineering teams to design, program and commission robotic cells and control systems for manufacturers in automotive, food and pharma industry.";
