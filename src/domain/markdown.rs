//! Markdown to HTML with heading anchors
//!
//! Top-level headings get a slug id and a leading `anchor-link` permalink,
//! and make up the table of contents. Single newlines are kept as `<br />`,
//! quotes and dashes are typographic, and bare URLs become links.

use pulldown_cmark::{
    html, CowStr, Event, HeadingLevel, LinkType, Options, Parser as MdParser, Tag, TagEnd,
};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Headings at this level are anchored and listed in the toc
const ANCHOR_LEVEL: HeadingLevel = HeadingLevel::H1;

/// Trimmed from the end of a bare URL, as in "see https://example.com."
const URL_TRAILING: &[char] = &['.', ',', ':', ';', '!', '?', ')', '\'', '"'];

/// A heading in the rendered document, used to build a table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub level: u8,
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMarkdown {
    pub html: String,
    pub headings: Vec<Heading>,
}

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options
}

fn url_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i)\b(?:https?://|www\.)[^\s<>]+").unwrap())
}

/// Render markdown.
///
/// Top-level headings without an explicit `{#id}` get a slug id.
pub fn render_markdown(source: &str) -> RenderedMarkdown {
    let events = merge_text(MdParser::new_ext(source, options()));
    let events = linkify(events);
    let (events, headings) = anchor_headings(events);

    let events = events.into_iter().map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });

    let mut output = String::new();
    html::push_html(&mut output, events);

    RenderedMarkdown {
        html: output,
        headings,
    }
}

/// The parser splits text at every potential inline marker; join the pieces
fn merge_text<'a>(events: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
    let mut merged: Vec<Event<'a>> = Vec::new();
    for event in events {
        if let Event::Text(text) = &event {
            if let Some(Event::Text(prev)) = merged.last_mut() {
                let mut joined = prev.to_string();
                joined.push_str(text);
                *prev = CowStr::from(joined);
                continue;
            }
        }
        merged.push(event);
    }
    merged
}

/// Turn bare `http(s)://` and `www.` URLs in text into links.
///
/// Text inside links, images and code blocks is left alone.
fn linkify(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut output = Vec::with_capacity(events.len());
    let mut skip_depth = 0usize;

    for event in events {
        match &event {
            Event::Start(Tag::Link { .. } | Tag::Image { .. } | Tag::CodeBlock(_)) => {
                skip_depth += 1
            }
            Event::End(TagEnd::Link | TagEnd::Image | TagEnd::CodeBlock) => {
                skip_depth = skip_depth.saturating_sub(1)
            }
            Event::Text(text) if skip_depth == 0 && url_regex().is_match(text) => {
                push_linked_text(text, &mut output);
                continue;
            }
            _ => {}
        }
        output.push(event);
    }

    output
}

fn push_linked_text(text: &str, output: &mut Vec<Event<'_>>) {
    let mut last = 0;
    for found in url_regex().find_iter(text) {
        let url = found.as_str().trim_end_matches(URL_TRAILING);
        let start = found.start();
        if start > last {
            output.push(Event::Text(CowStr::from(text[last..start].to_string())));
        }

        let href = if url.len() >= 4 && url[..4].eq_ignore_ascii_case("www.") {
            format!("http://{}", url)
        } else {
            url.to_string()
        };
        output.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: CowStr::from(href),
            title: CowStr::from(""),
            id: CowStr::from(""),
        }));
        output.push(Event::Text(CowStr::from(url.to_string())));
        output.push(Event::End(TagEnd::Link));

        last = start + url.len();
    }
    if last < text.len() {
        output.push(Event::Text(CowStr::from(text[last..].to_string())));
    }
}

fn anchor_headings(events: Vec<Event<'_>>) -> (Vec<Event<'_>>, Vec<Heading>) {
    let mut output = Vec::with_capacity(events.len());
    let mut headings = Vec::new();
    let mut used_ids: Vec<String> = Vec::new();

    for (i, event) in events.iter().enumerate() {
        let Event::Start(Tag::Heading {
            level,
            id,
            classes,
            attrs,
        }) = event
        else {
            output.push(event.clone());
            continue;
        };
        if *level != ANCHOR_LEVEL {
            output.push(event.clone());
            continue;
        }

        let text = heading_text(&events[i + 1..]);
        let id = match id {
            Some(id) => id.to_string(),
            None => unique_id(slugify(&text), &used_ids),
        };
        used_ids.push(id.clone());

        output.push(Event::Start(Tag::Heading {
            level: *level,
            id: Some(CowStr::from(id.clone())),
            classes: classes.clone(),
            attrs: attrs.clone(),
        }));
        output.push(Event::InlineHtml(CowStr::from(format!(
            r##"<a class="anchor-link" href="#{}"></a>"##,
            escape_attr(&id)
        ))));

        headings.push(Heading {
            level: heading_level(*level),
            id,
            text,
        });
    }

    (output, headings)
}

fn heading_text(events: &[Event]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            _ => {}
        }
    }
    text
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

/// Lowercase, alphanumerics kept, runs of anything else become one `-`
pub fn slugify(text: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}

fn unique_id(base: String, used: &[String]) -> String {
    if !used.contains(&base) {
        return base;
    }
    let mut n = 1;
    loop {
        let candidate = format!("{}-{}", base, n);
        if !used.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
