//! RSS feed generation.

use crate::domain::filters::excerpt;
use crate::domain::CollectionEntry;
use crate::infrastructure::config::{FeedConfig, SiteMeta};
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder};

/// Render the feed for `entries` (oldest first, as collections are ordered).
///
/// Returns `None` when there is nothing to publish.
pub fn build_feed(site: &SiteMeta, feed: &FeedConfig, entries: &[CollectionEntry]) -> Option<String> {
    if entries.is_empty() || feed.limit == 0 {
        return None;
    }

    let base = site.url.trim_end_matches('/');
    let newest: Vec<&CollectionEntry> = entries.iter().rev().take(feed.limit).collect();

    let items: Vec<rss::Item> = newest
        .iter()
        .map(|entry| entry_to_item(entry, base))
        .collect();

    let channel = ChannelBuilder::default()
        .title(&site.title)
        .link(format!("{}/", base))
        .description(&site.description)
        .language(Some(site.language.clone()))
        .generator(Some("blogsite".to_string()))
        .last_build_date(newest.first().map(|e| e.date.to_rfc2822()))
        .items(items)
        .build();

    Some(channel.to_string())
}

fn entry_to_item(entry: &CollectionEntry, base: &str) -> rss::Item {
    let link = format!("{}{}", base, entry.url);
    let title = entry
        .data
        .title
        .clone()
        .unwrap_or_else(|| entry.file_slug.clone());

    ItemBuilder::default()
        .title(Some(title))
        .link(Some(link.clone()))
        .guid(Some(GuidBuilder::default().permalink(true).value(link).build()))
        .pub_date(Some(entry.date.to_rfc2822()))
        .description(Some(excerpt(&entry.content)))
        .content(Some(entry.content.clone()))
        .build()
}
