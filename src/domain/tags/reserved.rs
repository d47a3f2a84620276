//! Tags used for internal classification

/// Tags that group content internally and never appear as browsable tags
pub const RESERVED_TAGS: [&str; 5] = ["all", "nav", "post", "posts", "post_cn"];

pub fn is_reserved(tag: &str) -> bool {
    RESERVED_TAGS.contains(&tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_tags() {
        for tag in ["all", "nav", "post", "posts", "post_cn"] {
            assert!(is_reserved(tag), "{} should be reserved", tag);
        }
    }

    #[test]
    fn test_user_tags_not_reserved() {
        assert!(!is_reserved("rust"));
        assert!(!is_reserved("Posts"));
        assert!(!is_reserved("post-cn"));
        assert!(!is_reserved(""));
    }
}
