//! Build configuration
//!
//! `SiteConfig::default()` is the directory layout and engine bindings the
//! rest of the build relies on. A `blogsite.toml` at the project root may
//! override any part of it.

use crate::domain::content::stays_inside;
use crate::error::{BlogError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "blogsite.toml";

/// Template engine used to preprocess a file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemplateEngine {
    #[default]
    Tera,
    /// Use the file contents as-is
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirsConfig {
    pub input: String,
    pub output: String,
    /// Relative to `input`
    pub includes: String,
    /// Relative to `input`
    pub layouts: String,
    /// Relative to `input`
    pub data: String,
}

impl Default for DirsConfig {
    fn default() -> Self {
        DirsConfig {
            input: "src".to_string(),
            output: "docs".to_string(),
            includes: "includes".to_string(),
            layouts: "layouts".to_string(),
            data: "data".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Copy files that are not templates into the output unchanged
    pub passthrough_copy: bool,
    /// File extensions treated as templates
    pub template_formats: Vec<String>,
    pub markdown_template_engine: TemplateEngine,
    pub html_template_engine: TemplateEngine,
    /// Bundler manifest, relative to the output directory
    pub manifest: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            passthrough_copy: true,
            template_formats: vec!["md".to_string(), "html".to_string(), "tera".to_string()],
            markdown_template_engine: TemplateEngine::Tera,
            html_template_engine: TemplateEngine::Tera,
            manifest: "assets/manifest.json".to_string(),
        }
    }
}

/// Site metadata, used by templates (`site.*`) and the feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteMeta {
    pub title: String,
    pub url: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub language: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        SiteMeta {
            title: "My Blog".to_string(),
            url: "http://localhost:8080".to_string(),
            description: String::new(),
            author: None,
            language: "en".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub enabled: bool,
    /// Relative to the output directory
    pub path: String,
    /// Collection the feed is built from
    pub collection: String,
    pub limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig {
            enabled: true,
            path: "feed.xml".to_string(),
            collection: "posts".to_string(),
            limit: 20,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub dirs: DirsConfig,
    pub build: BuildConfig,
    pub site: SiteMeta,
    pub feed: FeedConfig,
}

impl SiteConfig {
    /// Load `blogsite.toml` from the project root, or the defaults if absent
    pub fn load_from_dir(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_FILE);

        let contents = match fs::read_to_string(&config_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SiteConfig::default())
            }
            Err(e) => return Err(BlogError::Io(e)),
        };

        let config: SiteConfig = toml::from_str(&contents)
            .map_err(|e| BlogError::Config(format!("Failed to parse {}: {}", CONFIG_FILE, e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.dirs.input.trim().is_empty() || self.dirs.output.trim().is_empty() {
            return Err(BlogError::Config(
                "dirs.input and dirs.output must not be empty".to_string(),
            ));
        }
        if self.dirs.input == self.dirs.output {
            return Err(BlogError::Config(format!(
                "dirs.input and dirs.output must differ (both are '{}')",
                self.dirs.input
            )));
        }
        if !stays_inside(Path::new(&self.feed.path)) {
            return Err(BlogError::Config(format!(
                "feed.path '{}' must be relative to the output directory",
                self.feed.path
            )));
        }
        Ok(())
    }

    /// Serialize as TOML, as printed by `blogsite config`
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn input_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.dirs.input)
    }

    pub fn output_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.dirs.output)
    }

    pub fn includes_dir(&self, root: &Path) -> PathBuf {
        self.input_dir(root).join(&self.dirs.includes)
    }

    pub fn layouts_dir(&self, root: &Path) -> PathBuf {
        self.input_dir(root).join(&self.dirs.layouts)
    }

    pub fn data_dir(&self, root: &Path) -> PathBuf {
        self.input_dir(root).join(&self.dirs.data)
    }

    pub fn manifest_path(&self, root: &Path) -> PathBuf {
        self.output_dir(root).join(&self.build.manifest)
    }

    /// Whether files with this extension are rendered as templates
    pub fn is_template_format(&self, extension: &str) -> bool {
        self.build
            .template_formats
            .iter()
            .any(|f| f.eq_ignore_ascii_case(extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_layout() {
        let config = SiteConfig::default();
        let root = Path::new("/site");
        assert_eq!(config.input_dir(root), PathBuf::from("/site/src"));
        assert_eq!(config.output_dir(root), PathBuf::from("/site/docs"));
        assert_eq!(config.includes_dir(root), PathBuf::from("/site/src/includes"));
        assert_eq!(config.layouts_dir(root), PathBuf::from("/site/src/layouts"));
        assert_eq!(config.data_dir(root), PathBuf::from("/site/src/data"));
        assert_eq!(
            config.manifest_path(root),
            PathBuf::from("/site/docs/assets/manifest.json")
        );
        assert!(config.build.passthrough_copy);
        assert_eq!(config.build.markdown_template_engine, TemplateEngine::Tera);
        assert_eq!(config.build.html_template_engine, TemplateEngine::Tera);
    }

    #[test]
    fn test_template_formats() {
        let config = SiteConfig::default();
        assert!(config.is_template_format("md"));
        assert!(config.is_template_format("HTML"));
        assert!(config.is_template_format("tera"));
        assert!(!config.is_template_format("css"));
    }

    #[test]
    fn test_load_missing_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = SiteConfig::load_from_dir(temp.path()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn test_load_partial_override() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "[dirs]\noutput = \"public\"\n\n[site]\ntitle = \"Notes\"\n\n[build]\nmarkdown_template_engine = \"plain\"\n",
        )
        .unwrap();

        let config = SiteConfig::load_from_dir(temp.path()).unwrap();
        assert_eq!(config.dirs.output, "public");
        assert_eq!(config.dirs.input, "src");
        assert_eq!(config.site.title, "Notes");
        assert_eq!(config.build.markdown_template_engine, TemplateEngine::Plain);
        assert_eq!(config.build.html_template_engine, TemplateEngine::Tera);
        assert!(config.feed.enabled);
    }

    #[test]
    fn test_load_malformed_config() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "[dirs\ninput = ").unwrap();

        match SiteConfig::load_from_dir(temp.path()).unwrap_err() {
            BlogError::Config(msg) => assert!(msg.contains(CONFIG_FILE)),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_same_input_and_output() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "[dirs]\ninput = \"site\"\noutput = \"site\"\n",
        )
        .unwrap();
        assert!(SiteConfig::load_from_dir(temp.path()).is_err());
    }

    #[test]
    fn test_rejects_feed_path_outside_output() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "[feed]\npath = \"../feed.xml\"\n").unwrap();
        match SiteConfig::load_from_dir(temp.path()).unwrap_err() {
            BlogError::Config(msg) => assert!(msg.contains("feed.path")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let toml = SiteConfig::default().to_toml().unwrap();
        assert!(toml.contains("input = \"src\""));
        assert!(toml.contains("output = \"docs\""));
        assert!(toml.contains("[feed]"));
        let parsed: SiteConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, SiteConfig::default());
    }
}
