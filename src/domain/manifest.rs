//! Asset manifest and the shortcodes that read it

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MAIN_JS: &str = "main.js";
pub const MAIN_CSS: &str = "main.css";

/// Mapping from logical asset name to the URL it is served from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: BTreeMap<String, String>,
}

impl Manifest {
    /// Fixed manifest used in development mode
    pub fn development() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(MAIN_JS.to_string(), "/assets/main.js".to_string());
        entries.insert(MAIN_CSS.to_string(), "/assets/main.css".to_string());
        Manifest { entries }
    }

    /// Parse a bundler manifest. The document must be a flat object of strings.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for Manifest {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Manifest {
            entries: iter.into_iter().collect(),
        }
    }
}

/// `<link>` tag for the bundled stylesheet, or empty if the manifest has none
pub fn bundled_css(manifest: &Manifest) -> String {
    manifest
        .get(MAIN_CSS)
        .map(|href| format!(r#"<link href="{}" rel="stylesheet" />"#, href))
        .unwrap_or_default()
}

/// `<script>` tag for the bundled script, or empty if the manifest has none
pub fn bundled_js(manifest: &Manifest) -> String {
    manifest
        .get(MAIN_JS)
        .map(|src| format!(r#"<script src="{}"></script>"#, src))
        .unwrap_or_default()
}
