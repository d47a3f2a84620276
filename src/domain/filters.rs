//! Presentation filters
//!
//! Pure functions that turn a single value into something ready to display.
//! The template engine wrappers live in `infrastructure::renderer`.

use crate::domain::content::TagsField;
use crate::domain::tags::is_reserved;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Excerpts are cut at the last whitespace at or before this character index
pub const EXCERPT_LENGTH: usize = 200;

fn html_tag_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i)<[^>]+>").unwrap())
}

/// Strip HTML tags and shorten to roughly [`EXCERPT_LENGTH`] characters.
///
/// Text that already fits is returned whole. Longer text is cut at the last
/// whitespace at or before the limit; when there is none the kept slice is
/// empty. An ellipsis is always appended.
pub fn excerpt(html: &str) -> String {
    let text = html_tag_regex().replace_all(html, "");
    let chars: Vec<char> = text.chars().collect();

    let kept: String = if chars.len() <= EXCERPT_LENGTH {
        chars.into_iter().collect()
    } else {
        match chars[..=EXCERPT_LENGTH]
            .iter()
            .rposition(|c| c.is_whitespace())
        {
            Some(cut) => chars[..cut].iter().collect(),
            None => String::new(),
        }
    };

    format!("{}...", kept)
}

/// Words per minute assumed by [`reading_time`]
pub const READING_SPEED: usize = 235;

fn word_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"[\u{0400}-\u{04FF}]+|\S+\s*").unwrap())
}

/// Estimated reading time of an HTML body, e.g. `3 min read`.
///
/// Tags are stripped before counting; the estimate is rounded up.
pub fn reading_time(html: &str) -> String {
    let text = html_tag_regex().replace_all(html, "");
    let words = word_regex().find_iter(&text).count();
    format!("{} min read", words.div_ceil(READING_SPEED))
}

/// `05 Mar 2024`
pub fn readable_date(date: &DateTime<Utc>) -> String {
    date.format("%d %b %Y").to_string()
}

/// `2024-03-05`, for `datetime` attributes
pub fn html_date_string(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// First `n` items, or the last `|n|` items when `n` is negative.
pub fn head<T>(items: &[T], n: i64) -> &[T] {
    let count = usize::try_from(n.unsigned_abs())
        .unwrap_or(usize::MAX)
        .min(items.len());
    if n >= 0 {
        &items[..count]
    } else {
        &items[items.len() - count..]
    }
}

/// User-facing tags of a page, in front matter order, reserved tags removed.
///
/// Empty segments (`"a,,b"`, a trailing comma) are dropped as well.
pub fn page_tags(tags: Option<&TagsField>) -> Vec<String> {
    let Some(tags) = tags else {
        return Vec::new();
    };

    let joined = tags.to_vec().join(",");
    joined
        .split(',')
        .filter(|tag| !tag.is_empty() && !is_reserved(tag))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn test_excerpt_short_input() {
        assert_eq!(excerpt("<p>hello world</p>"), "hello world...");
    }

    #[test]
    fn test_excerpt_empty() {
        assert_eq!(excerpt(""), "...");
        assert_eq!(excerpt("<br/>"), "...");
    }

    #[test]
    fn test_excerpt_strips_mixed_case_and_multiline_tags() {
        assert_eq!(
            excerpt("<P CLASS=\"x\">a <A\nhref=\"/\">link</A></P>"),
            "a link..."
        );
    }

    #[test]
    fn test_excerpt_cuts_at_whitespace() {
        let word = "abcd ";
        let long = word.repeat(60); // 300 chars, spaces at 4, 9, ..., 199
        let result = excerpt(&long);
        let expected = format!("{}...", &long[..199]);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_excerpt_space_exactly_at_limit() {
        let mut text = "a".repeat(200);
        text.push(' ');
        text.push_str(&"b".repeat(50));
        assert_eq!(excerpt(&text), format!("{}...", "a".repeat(200)));
    }

    #[test]
    fn test_excerpt_no_whitespace_in_long_text() {
        let long = "x".repeat(250);
        assert_eq!(excerpt(&long), "...");
    }

    #[test]
    fn test_excerpt_counts_characters_not_bytes() {
        let text = format!("{} tail", "é".repeat(199));
        // 204 chars; whitespace at index 199
        assert_eq!(excerpt(&text), format!("{}...", "é".repeat(199)));
    }

    #[test]
    fn test_excerpt_keeps_lone_angle_brackets() {
        assert_eq!(excerpt("a <> b"), "a <> b...");
        assert_eq!(excerpt("a<>>b"), "a<>>b...");
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time(""), "0 min read");
        assert_eq!(reading_time("<p>just a few words</p>"), "1 min read");

        let words = "word ".repeat(READING_SPEED);
        assert_eq!(reading_time(&words), "1 min read");
        let words = "word ".repeat(READING_SPEED + 1);
        assert_eq!(reading_time(&format!("<p>{}</p>", words)), "2 min read");
    }

    #[test]
    fn test_reading_time_ignores_markup() {
        let html = r#"<p class="lead"><a href="https://example.com/a/very/long/url">two words</a></p>"#;
        assert_eq!(reading_time(html), "1 min read");
    }

    #[test]
    fn test_readable_date() {
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        assert_eq!(readable_date(&date), "05 Mar 2024");
    }

    #[test]
    fn test_html_date_string() {
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
        assert_eq!(html_date_string(&date), "2024-03-05");
    }

    #[test]
    fn test_dates_ignore_source_offset() {
        // 23:30 at UTC-5 is already the next day in UTC
        let local = FixedOffset::west_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 5, 23, 30, 0)
            .unwrap();
        let date = local.with_timezone(&Utc);
        assert_eq!(readable_date(&date), "06 Mar 2024");
        assert_eq!(html_date_string(&date), "2024-03-06");
    }

    #[test]
    fn test_head_positive() {
        let items = [1, 2, 3, 4, 5];
        assert_eq!(head(&items, 2), &[1, 2]);
        assert_eq!(head(&items, 0), &[] as &[i32]);
        assert_eq!(head(&items, 10), &items);
    }

    #[test]
    fn test_head_negative() {
        let items = [1, 2, 3, 4, 5];
        assert_eq!(head(&items, -2), &[4, 5]);
        assert_eq!(head(&items, -10), &items);
        assert_eq!(head(&items, i64::MIN), &items);
    }

    #[test]
    fn test_head_empty() {
        let items: [u8; 0] = [];
        assert!(head(&items, 3).is_empty());
        assert!(head(&items, -3).is_empty());
    }

    #[test]
    fn test_page_tags_removes_reserved() {
        let tags = TagsField::Many(vec![
            "post".to_string(),
            "rust".to_string(),
            "all".to_string(),
            "go".to_string(),
        ]);
        assert_eq!(page_tags(Some(&tags)), vec!["rust", "go"]);
    }

    #[test]
    fn test_page_tags_from_comma_string() {
        let tags = TagsField::One("posts,rust,web".to_string());
        assert_eq!(page_tags(Some(&tags)), vec!["rust", "web"]);
    }

    #[test]
    fn test_page_tags_without_reserved_is_identity() {
        let tags = TagsField::Many(vec!["b".to_string(), "a".to_string()]);
        assert_eq!(page_tags(Some(&tags)), vec!["b", "a"]);
    }

    #[test]
    fn test_page_tags_absent_or_empty() {
        assert!(page_tags(None).is_empty());
        assert!(page_tags(Some(&TagsField::One(String::new()))).is_empty());
        assert!(page_tags(Some(&TagsField::Many(vec![]))).is_empty());
    }

    #[test]
    fn test_page_tags_drops_empty_segments() {
        let tags = TagsField::One("rust,,go,".to_string());
        assert_eq!(page_tags(Some(&tags)), vec!["rust", "go"]);
    }
}
