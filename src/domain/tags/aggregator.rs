//! Collect the user-facing tag list across the whole collection

use crate::domain::content::ContentItem;
use crate::domain::tags::is_reserved;
use std::collections::BTreeSet;

/// Builds `tagList` from a full snapshot of the collection
pub struct TagAggregator;

impl TagAggregator {
    /// Every distinct non-reserved tag used by any item.
    ///
    /// Items without a `tags` field are skipped.
    pub fn collect(items: &[ContentItem]) -> BTreeSet<String> {
        let mut tags = BTreeSet::new();
        for item in items {
            let Some(field) = item.tags() else {
                continue;
            };
            for tag in field.to_vec() {
                if !is_reserved(&tag) {
                    tags.insert(tag);
                }
            }
        }
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::{FrontMatter, TagsField};
    use chrono::Utc;
    use std::path::PathBuf;

    fn item(tags: Option<TagsField>) -> ContentItem {
        ContentItem {
            input_path: PathBuf::from("post.md"),
            url: "/post/".to_string(),
            output_path: PathBuf::from("post/index.html"),
            data: FrontMatter {
                tags,
                ..FrontMatter::default()
            },
            body: String::new(),
            date: Utc::now(),
        }
    }

    fn many(tags: &[&str]) -> Option<TagsField> {
        Some(TagsField::Many(tags.iter().map(|t| t.to_string()).collect()))
    }

    #[test]
    fn test_collects_and_filters_reserved() {
        let items = vec![
            item(many(&["post", "go"])),
            item(many(&["post", "rust", "all"])),
            item(many(&["nav"])),
        ];
        let tags = TagAggregator::collect(&items);
        assert_eq!(
            tags.into_iter().collect::<Vec<_>>(),
            vec!["go".to_string(), "rust".to_string()]
        );
    }

    #[test]
    fn test_deduplicates() {
        let items = vec![item(many(&["rust", "web"])), item(many(&["web", "rust"]))];
        assert_eq!(TagAggregator::collect(&items).len(), 2);
    }

    #[test]
    fn test_skips_items_without_tags() {
        let items = vec![item(None), item(Some(TagsField::One("notes".to_string())))];
        let tags = TagAggregator::collect(&items);
        assert_eq!(tags.into_iter().collect::<Vec<_>>(), vec!["notes".to_string()]);
    }

    #[test]
    fn test_empty_collection() {
        assert!(TagAggregator::collect(&[]).is_empty());
    }
}
