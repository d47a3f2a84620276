//! Tag system

pub mod aggregator;
pub mod reserved;

// Re-export main types
pub use aggregator::TagAggregator;
pub use reserved::{is_reserved, RESERVED_TAGS};
