//! Content items and front matter

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

/// The `tags` front matter field, which may be a single string or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagsField {
    One(String),
    Many(Vec<String>),
}

impl TagsField {
    /// Normalize to a sequence of tags
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            TagsField::One(tag) => vec![tag.clone()],
            TagsField::Many(tags) => tags.clone(),
        }
    }

    /// Whether the field names `tag`
    pub fn contains(&self, tag: &str) -> bool {
        match self {
            TagsField::One(t) => t == tag,
            TagsField::Many(tags) => tags.iter().any(|t| t == tag),
        }
    }
}

/// Front matter of a content file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontMatter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Raw date value; see [`parse_date`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagsField>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,

    /// Any other keys, passed through to templates
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A single page discovered in the input directory
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    /// Path relative to the input directory
    pub input_path: PathBuf,
    /// Served URL, always starting and ending with `/` unless it names a file
    pub url: String,
    /// Path relative to the output directory
    pub output_path: PathBuf,
    pub data: FrontMatter,
    /// Template source after the front matter block
    pub body: String,
    pub date: DateTime<Utc>,
}

impl ContentItem {
    pub fn tags(&self) -> Option<&TagsField> {
        self.data.tags.as_ref()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().is_some_and(|t| t.contains(tag))
    }

    /// File name without extension, e.g. `hello-world` for `posts/hello-world.md`
    pub fn file_slug(&self) -> String {
        self.input_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// Served URL and output file for a page.
///
/// An explicit permalink wins; a permalink ending in `/` is written as
/// `index.html` inside that directory. Otherwise `index.*` maps to its
/// directory and `name.*` to `/name/`.
pub fn resolve_url(input_path: &Path, permalink: Option<&str>) -> (String, PathBuf) {
    if let Some(permalink) = permalink.map(str::trim).filter(|p| !p.is_empty()) {
        let url = if permalink.starts_with('/') {
            permalink.to_string()
        } else {
            format!("/{}", permalink)
        };
        let relative = url.trim_start_matches('/');
        let output = if url.ends_with('/') {
            PathBuf::from(relative).join("index.html")
        } else {
            PathBuf::from(relative)
        };
        return (url, output);
    }

    let stem = input_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let parent: Vec<String> = input_path
        .parent()
        .map(|p| {
            p.components()
                .map(|c| c.as_os_str().to_string_lossy().to_string())
                .collect()
        })
        .unwrap_or_default();

    let mut segments = parent;
    if stem != "index" {
        segments.push(stem);
    }

    if segments.is_empty() {
        return ("/".to_string(), PathBuf::from("index.html"));
    }

    let joined = segments.join("/");
    (
        format!("/{}/", joined),
        PathBuf::from(joined).join("index.html"),
    )
}

/// Whether a relative output path stays inside the directory it is joined to.
///
/// `..`, root and drive-prefix components are rejected.
pub fn stays_inside(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Split a leading `---` YAML block from the rest of the document.
///
/// Returns `(None, source)` when the document has no front matter.
pub fn split_front_matter(source: &str) -> (Option<&str>, &str) {
    let rest = match source
        .strip_prefix("---\n")
        .or_else(|| source.strip_prefix("---\r\n"))
    {
        Some(rest) => rest,
        None => return (None, source),
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    // Unterminated block: treat the whole file as body
    (None, source)
}

/// Parse front matter YAML. An empty block yields the default.
pub fn parse_front_matter(yaml: &str) -> Result<FrontMatter, serde_yaml::Error> {
    if yaml.trim().is_empty() {
        return Ok(FrontMatter::default());
    }
    serde_yaml::from_str(yaml)
}

/// Parse a front matter date: RFC 3339, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD`.
/// Dates without an offset are taken as UTC.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
