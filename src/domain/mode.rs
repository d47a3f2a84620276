//! Build mode (development vs production)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Environment variable that selects the build mode
pub const MODE_ENV_VAR: &str = "APP_ENV";

/// Build modes control how the asset manifest is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Fixed asset paths, no manifest file required
    Development,
    /// Asset paths come from the bundler's manifest on disk
    #[default]
    Production,
}

impl BuildMode {
    /// Read the mode from `APP_ENV`.
    ///
    /// Only the exact value `development` selects development mode; anything
    /// else (or unset) is production.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(MODE_ENV_VAR).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("development") => BuildMode::Development,
            _ => BuildMode::Production,
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, BuildMode::Development)
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildMode::Development => write!(f, "development"),
            BuildMode::Production => write!(f, "production"),
        }
    }
}

impl FromStr for BuildMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(BuildMode::Development),
            "production" | "prod" => Ok(BuildMode::Production),
            _ => Err(format!(
                "Invalid mode: '{}'. Valid modes are: development, production",
                s
            )),
        }
    }
}
