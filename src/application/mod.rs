//! Application layer - Use cases and orchestration

pub mod build_site;
pub mod list_tags;
pub mod manage_config;

pub use build_site::{BuildOptions, BuildReport, BuildSiteService};
pub use list_tags::ListTagsService;
pub use manage_config::ConfigService;
