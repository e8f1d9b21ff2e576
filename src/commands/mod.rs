pub mod context;
pub mod contrast;
pub mod images;
pub mod init;
pub mod og_images;
pub mod scan;
pub mod site;

pub use contrast::{contrast_report, run_contrast, run_contrast_impl};
pub use images::{images_report, run_images, run_images_impl};
pub use init::{generate_config_template, run_init, run_init_impl};
pub use og_images::{og_images_report, run_og_images, run_og_images_impl};
pub use scan::{run_source, run_source_impl, scan_sources};
pub use site::{SiteBuild, SiteCheck, run_site, run_site_impl, site_report};
