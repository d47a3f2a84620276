//! Infrastructure layer - External I/O, configuration and rendering

pub mod config;
pub mod feed;
pub mod manifest_loader;
pub mod renderer;
pub mod repository;

pub use config::SiteConfig;
pub use manifest_loader::ManifestResolver;
pub use renderer::{PageRenderer, TemplateRegistry};
pub use repository::{FileSystemRepository, SiteRepository, SourceFiles};
