//! Config inspection use case

use crate::error::{BlogError, Result};
use crate::infrastructure::{FileSystemRepository, SiteConfig, SiteRepository};

/// Service for reading the effective site configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Effective configuration: blogsite.toml merged over the defaults
    pub fn list(&self) -> Result<SiteConfig> {
        self.repository.load_config()
    }

    /// Get a single value by dotted key, e.g. `dirs.output` or `feed.limit`
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.list()?;
        let table = toml::Value::try_from(&config)?;

        let mut current = &table;
        for part in key.split('.') {
            current = current.get(part).ok_or_else(|| unknown_key(key))?;
        }

        match current {
            toml::Value::String(s) => Ok(s.clone()),
            toml::Value::Table(_) => Err(BlogError::Config(format!(
                "'{}' is a section, not a value",
                key
            ))),
            other => Ok(other.to_string()),
        }
    }
}

fn unknown_key(key: &str) -> BlogError {
    BlogError::Config(format!(
        "Unknown config key: '{}'. Sections are: dirs, build, site, feed",
        key
    ))
}
