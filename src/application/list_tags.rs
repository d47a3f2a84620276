//! List tags use case

use crate::domain::tags::TagAggregator;
use crate::error::Result;
use crate::infrastructure::repository::SiteRepository;
use crate::infrastructure::FileSystemRepository;

/// Service for listing every user-facing tag on the site.
pub struct ListTagsService {
    repository: FileSystemRepository,
}

impl ListTagsService {
    /// Create a new list tags service.
    pub fn new(repository: FileSystemRepository) -> Self {
        Self { repository }
    }

    /// Load every page's front matter and aggregate the tag list.
    ///
    /// No manifest is needed, so this works in either build mode.
    pub fn execute(&self) -> Result<Vec<String>> {
        let config = self.repository.load_config()?;
        let sources = self.repository.scan_sources(&config)?;

        let items = sources
            .templates
            .iter()
            .map(|rel| self.repository.load_item(&config, rel))
            .collect::<Result<Vec<_>>>()?;

        Ok(TagAggregator::collect(&items).into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BlogError;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn lists_distinct_non_reserved_tags() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/a.md", "---\ntags: [post, go]\n---\n");
        write(temp.path(), "src/b.md", "---\ntags: rust\n---\n");
        write(temp.path(), "src/c.md", "no front matter");

        let tags = ListTagsService::new(FileSystemRepository::new(temp.path().to_path_buf()))
            .execute()
            .unwrap();
        assert_eq!(tags, vec!["go".to_string(), "rust".to_string()]);
    }

    #[test]
    fn missing_input_dir_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = ListTagsService::new(FileSystemRepository::new(temp.path().to_path_buf()))
            .execute()
            .unwrap_err();
        assert!(matches!(err, BlogError::MissingInputDir(_)));
    }
}
