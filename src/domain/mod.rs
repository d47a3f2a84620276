//! Domain layer - Content model, filters and tag logic

pub mod collections;
pub mod content;
pub mod filters;
pub mod manifest;
pub mod markdown;
pub mod mode;
pub mod tags;

pub use collections::{CollectionEntry, Collections};
pub use content::{ContentItem, FrontMatter, TagsField};
pub use manifest::Manifest;
pub use mode::BuildMode;
