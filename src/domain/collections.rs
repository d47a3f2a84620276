//! Collections exposed to templates (`collections.all`, `collections.<tag>`, `collections.tagList`)

use crate::domain::content::{ContentItem, FrontMatter};
use crate::domain::tags::TagAggregator;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Key under which the tag list is exposed
pub const TAG_LIST_KEY: &str = "tagList";

/// One page as seen from another page's template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionEntry {
    pub url: String,
    pub date: DateTime<Utc>,
    pub input_path: String,
    pub file_slug: String,
    pub data: FrontMatter,
    /// Rendered body without layout; empty until the page has been rendered
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct Collections {
    all: Vec<CollectionEntry>,
    by_tag: BTreeMap<String, Vec<CollectionEntry>>,
    tag_list: Vec<String>,
}

impl Collections {
    /// Build all collections from one snapshot of the content.
    ///
    /// `rendered` maps input paths to already-rendered bodies.
    pub fn build(items: &[ContentItem], rendered: &BTreeMap<PathBuf, String>) -> Self {
        let mut all: Vec<CollectionEntry> = items
            .iter()
            .map(|item| CollectionEntry {
                url: item.url.clone(),
                date: item.date,
                input_path: item.input_path.to_string_lossy().replace('\\', "/"),
                file_slug: item.file_slug(),
                data: item.data.clone(),
                content: rendered.get(&item.input_path).cloned().unwrap_or_default(),
            })
            .collect();
        all.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.input_path.cmp(&b.input_path)));

        let mut by_tag: BTreeMap<String, Vec<CollectionEntry>> = BTreeMap::new();
        for entry in &all {
            let Some(tags) = &entry.data.tags else {
                continue;
            };
            let mut seen = Vec::new();
            for tag in tags.to_vec() {
                if seen.contains(&tag) {
                    continue;
                }
                by_tag.entry(tag.clone()).or_default().push(entry.clone());
                seen.push(tag);
            }
        }

        let tag_list = TagAggregator::collect(items).into_iter().collect();

        Collections {
            all,
            by_tag,
            tag_list,
        }
    }

    /// Every page, oldest first
    pub fn all(&self) -> &[CollectionEntry] {
        &self.all
    }

    /// Pages carrying `tag`, oldest first; empty when no page uses it
    pub fn tagged(&self, tag: &str) -> &[CollectionEntry] {
        self.by_tag.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn tag_list(&self) -> &[String] {
        &self.tag_list
    }

    pub fn entry(&self, input_path: &Path) -> Option<&CollectionEntry> {
        let key = input_path.to_string_lossy().replace('\\', "/");
        self.all.iter().find(|e| e.input_path == key)
    }

    /// Template-facing object: `all`, one key per tag, and `tagList`
    pub fn to_value(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (tag, entries) in &self.by_tag {
            map.insert(tag.clone(), serde_json::json!(entries));
        }
        map.insert("all".to_string(), serde_json::json!(self.all));
        map.insert(TAG_LIST_KEY.to_string(), serde_json::json!(self.tag_list));
        serde_json::Value::Object(map)
    }
}
