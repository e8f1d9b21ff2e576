mod filesystem;
mod loader;
mod model;
mod validation;

pub use filesystem::{FileSystem, RealFileSystem};
pub use loader::{ConfigLoader, FileConfigLoader, LOCAL_CONFIG_NAME};
pub use model::{
    AllowlistConfig, CONFIG_VERSION, Config, ContrastCaseConfig, ContrastConfig, ImagesConfig,
    NavigableConfig, OgImagesConfig, ScannerConfig, SemanticConfig, SeoConfig, SiteConfig,
};
pub use validation::validate_config;
