//! File system repository

use crate::domain::content::{
    parse_date, parse_front_matter, resolve_url, split_front_matter, stays_inside,
};
use crate::domain::{ContentItem, FrontMatter};
use crate::error::{BlogError, Result};
use crate::infrastructure::config::{SiteConfig, CONFIG_FILE};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Environment variable naming the project root
pub const ROOT_ENV_VAR: &str = "BLOG_ROOT";

/// Files under the input directory, split by how they are built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFiles {
    /// Rendered through the template pipeline
    pub templates: Vec<PathBuf>,
    /// Copied through unchanged
    pub assets: Vec<PathBuf>,
}

/// Abstract repository for site operations
pub trait SiteRepository {
    /// Get the project root directory
    fn root(&self) -> &Path;

    /// Load configuration from blogsite.toml (defaults when absent)
    fn load_config(&self) -> Result<SiteConfig>;
}

/// File system implementation of SiteRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover the project root.
    /// Checks BLOG_ROOT first, then walks up looking for blogsite.toml, then
    /// falls back to the current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var(ROOT_ENV_VAR) {
            let path = PathBuf::from(root_path);
            if path.is_dir() {
                return Ok(FileSystemRepository::new(path));
            }
            return Err(BlogError::Config(format!(
                "{} is set to '{}' but that directory does not exist",
                ROOT_ENV_VAR,
                path.display()
            )));
        }

        let current_dir = std::env::current_dir()?;
        Ok(Self::discover_from(&current_dir))
    }

    /// Walk up from `start` looking for blogsite.toml; `start` itself if none is found
    pub fn discover_from(start: &Path) -> Self {
        let mut current = start.to_path_buf();

        loop {
            if current.join(CONFIG_FILE).is_file() {
                return FileSystemRepository::new(current);
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return FileSystemRepository::new(start.to_path_buf()),
            }
        }
    }

    /// Find templates and passthrough files under the input directory.
    ///
    /// Dot-entries, the includes, layouts and data directories, the output
    /// directory and `blogsite.toml` are skipped when they sit inside the
    /// input directory.
    pub fn scan_sources(&self, config: &SiteConfig) -> Result<SourceFiles> {
        let input_dir = config.input_dir(&self.root);
        if !input_dir.is_dir() {
            return Err(BlogError::MissingInputDir(input_dir));
        }

        let excluded = [
            config.includes_dir(&self.root),
            config.layouts_dir(&self.root),
            config.data_dir(&self.root),
            config.output_dir(&self.root),
            self.root.join(CONFIG_FILE),
        ];

        let walker = WalkDir::new(&input_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 {
                    return true;
                }
                let hidden = entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| name.starts_with('.'));
                !hidden && !excluded.iter().any(|dir| entry.path() == dir)
            });

        let mut sources = SourceFiles::default();
        for entry in walker {
            let entry = entry.map_err(|e| BlogError::Io(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(&input_dir) else {
                continue;
            };

            let is_template = rel
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| config.is_template_format(ext));

            if is_template {
                sources.templates.push(rel.to_path_buf());
            } else {
                sources.assets.push(rel.to_path_buf());
            }
        }

        debug!(
            templates = sources.templates.len(),
            assets = sources.assets.len(),
            "scanned input directory"
        );
        Ok(sources)
    }

    /// Read and parse one template file into a content item
    pub fn load_item(&self, config: &SiteConfig, rel: &Path) -> Result<ContentItem> {
        let path = config.input_dir(&self.root).join(rel);
        let source = fs::read_to_string(&path)?;

        let (yaml, body) = split_front_matter(&source);
        let data = match yaml {
            Some(yaml) => parse_front_matter(yaml).map_err(|e| BlogError::Content {
                path: rel.to_path_buf(),
                message: format!("invalid front matter: {}", e),
            })?,
            None => FrontMatter::default(),
        };

        let date = match data.date.as_deref() {
            Some(raw) => match parse_date(raw) {
                Some(date) => date,
                None => {
                    warn!(path = %rel.display(), date = raw, "unrecognized date, using file modification time");
                    modified_time(&path)?
                }
            },
            None => modified_time(&path)?,
        };

        let (url, output_path) = resolve_url(rel, data.permalink.as_deref());
        if !stays_inside(&output_path) {
            return Err(BlogError::Content {
                path: rel.to_path_buf(),
                message: format!(
                    "permalink '{}' points outside the output directory",
                    data.permalink.as_deref().unwrap_or_default()
                ),
            });
        }

        Ok(ContentItem {
            input_path: rel.to_path_buf(),
            url,
            output_path,
            body: body.to_string(),
            data,
            date,
        })
    }

    /// Load every `*.json` file in the data directory, keyed by file stem
    pub fn load_data(&self, config: &SiteConfig) -> Result<BTreeMap<String, serde_json::Value>> {
        let data_dir = config.data_dir(&self.root);
        let mut data = BTreeMap::new();

        if !data_dir.is_dir() {
            return Ok(data);
        }

        for entry in fs::read_dir(&data_dir)? {
            let Ok(entry) = entry else {
                continue;
            };
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let contents = fs::read_to_string(&path)?;
            let value: serde_json::Value =
                serde_json::from_str(&contents).map_err(|e| BlogError::Content {
                    path: path.clone(),
                    message: format!("invalid JSON data file: {}", e),
                })?;
            data.insert(stem.to_string(), value);
        }

        Ok(data)
    }

    /// Write a file relative to the output directory
    pub fn write_output(&self, config: &SiteConfig, rel: &Path, contents: &str) -> Result<()> {
        if !stays_inside(rel) {
            return Err(BlogError::Config(format!(
                "refusing to write {} outside the output directory",
                rel.display()
            )));
        }
        let path = config.output_dir(&self.root).join(rel);

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&path, contents).map_err(BlogError::Io)
    }

    /// Copy a file from the input directory to the same place in the output directory
    pub fn copy_passthrough(&self, config: &SiteConfig, rel: &Path) -> Result<()> {
        let from_path = config.input_dir(&self.root).join(rel);
        let to_path = config.output_dir(&self.root).join(rel);

        if let Some(parent) = to_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::copy(from_path, to_path)?;
        Ok(())
    }
}

impl SiteRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<SiteConfig> {
        SiteConfig::load_from_dir(&self.root)
    }
}

fn modified_time(path: &Path) -> Result<DateTime<Utc>> {
    let modified = fs::metadata(path)?.modified()?;
    Ok(DateTime::<Utc>::from(modified))
}
