//! blogsite - Static blog builder
//!
//! Renders a directory of markdown and HTML templates into a static site.
//! Pages are grouped into collections by tag, wrapped in layouts, and
//! linked to bundled CSS/JS through an asset manifest that is resolved
//! differently in development and production builds.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::BlogError;
