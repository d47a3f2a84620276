//! Tera-based page rendering with the blog's filter and shortcode table.

use crate::domain::content::{parse_date, TagsField};
use crate::domain::filters::{
    excerpt, head, html_date_string, page_tags, readable_date, reading_time,
};
use crate::domain::manifest::{bundled_css, bundled_js};
use crate::domain::markdown::{render_markdown, Heading};
use crate::domain::{ContentItem, Manifest};
use crate::error::{tera_message, BlogError, Result};
use crate::infrastructure::config::{SiteConfig, SiteMeta, TemplateEngine};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tera::{Context, Tera, Value};
use tracing::debug;
use walkdir::WalkDir;

/// Signature of a template filter
pub type FilterFn = fn(&Value, &HashMap<String, Value>) -> tera::Result<Value>;

/// Signature of a shortcode; the manifest is the only input
pub type ShortcodeFn = fn(&Manifest) -> String;

/// Name → function table composed with Tera at configuration time
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    filters: BTreeMap<&'static str, FilterFn>,
    shortcodes: BTreeMap<&'static str, ShortcodeFn>,
}

impl TemplateRegistry {
    /// The filters and shortcodes every site gets
    pub fn standard() -> Self {
        let mut filters: BTreeMap<&'static str, FilterFn> = BTreeMap::new();
        filters.insert("excerpt", excerpt_filter);
        filters.insert("readableDate", readable_date_filter);
        filters.insert("htmlDateString", html_date_string_filter);
        filters.insert("head", head_filter);
        filters.insert("pageTags", page_tags_filter);
        filters.insert("readingTime", reading_time_filter);

        let mut shortcodes: BTreeMap<&'static str, ShortcodeFn> = BTreeMap::new();
        shortcodes.insert("bundledcss", bundled_css);
        shortcodes.insert("bundledjs", bundled_js);

        TemplateRegistry {
            filters,
            shortcodes,
        }
    }

    pub fn filter_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.filters.keys().copied()
    }

    pub fn shortcode_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.shortcodes.keys().copied()
    }

    /// Register every filter, and every shortcode bound to `manifest`
    pub fn install(&self, tera: &mut Tera, manifest: &Manifest) {
        for (name, filter) in &self.filters {
            tera.register_filter(name, *filter);
        }
        for (name, shortcode) in &self.shortcodes {
            let output = shortcode(manifest);
            tera.register_function(
                name,
                move |_args: &HashMap<String, Value>| -> tera::Result<Value> {
                    Ok(Value::String(output.clone()))
                },
            );
        }
    }
}

fn string_arg<'a>(value: &'a Value, filter: &str) -> tera::Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| tera::Error::msg(format!("{} filter expects a string", filter)))
}

/// Accepts RFC 3339 / `YYYY-MM-DD` strings or Unix seconds
fn date_arg(value: &Value, filter: &str) -> tera::Result<DateTime<Utc>> {
    let parsed = match value {
        Value::String(s) => parse_date(s),
        Value::Number(n) => n.as_i64().and_then(|secs| DateTime::from_timestamp(secs, 0)),
        _ => None,
    };
    parsed.ok_or_else(|| {
        tera::Error::msg(format!("{} filter expects a date, got {}", filter, value))
    })
}

fn excerpt_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(excerpt(string_arg(value, "excerpt")?)))
}

fn readable_date_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(readable_date(&date_arg(value, "readableDate")?)))
}

fn html_date_string_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(html_date_string(&date_arg(
        value,
        "htmlDateString",
    )?)))
}

fn head_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let items = value
        .as_array()
        .ok_or_else(|| tera::Error::msg("head filter expects an array"))?;
    let n = args
        .get("n")
        .and_then(Value::as_i64)
        .ok_or_else(|| tera::Error::msg("head filter requires an integer `n` argument"))?;
    Ok(Value::Array(head(items, n).to_vec()))
}

/// Accepts an HTML string or a collection entry (its `content` is used)
fn reading_time_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let html = match value {
        Value::String(s) => s.as_str(),
        Value::Object(entry) => entry.get("content").and_then(Value::as_str).unwrap_or(""),
        Value::Null => "",
        other => {
            return Err(tera::Error::msg(format!(
                "readingTime filter expects a string or page, got {}",
                other
            )))
        }
    };
    Ok(Value::String(reading_time(html)))
}

fn page_tags_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let tags = match value {
        Value::Null => None,
        Value::String(s) => Some(TagsField::One(s.clone())),
        Value::Array(items) => Some(TagsField::Many(
            items
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        )),
        other => {
            return Err(tera::Error::msg(format!(
                "pageTags filter expects a string or array, got {}",
                other
            )))
        }
    };
    Ok(Value::from(page_tags(tags.as_ref())))
}

/// Template-facing values shared by every page of a build
#[derive(Debug, Clone)]
pub struct Globals<'a> {
    pub site: &'a SiteMeta,
    pub data: &'a BTreeMap<String, serde_json::Value>,
    pub collections: serde_json::Value,
}

#[derive(Serialize)]
struct PageInfo<'a> {
    url: &'a str,
    date: DateTime<Utc>,
    input_path: String,
    output_path: String,
    file_slug: String,
}

/// Build the Tera context for one page
pub fn page_context(item: &ContentItem, globals: &Globals<'_>, toc: &[Heading]) -> Context {
    let mut context = Context::new();

    for (key, value) in globals.data {
        context.insert(key.as_str(), value);
    }
    for (key, value) in &item.data.extra {
        context.insert(key.as_str(), value);
    }

    context.insert("site", globals.site);
    context.insert("collections", &globals.collections);
    context.insert(
        "page",
        &PageInfo {
            url: &item.url,
            date: item.date,
            input_path: item.input_path.to_string_lossy().replace('\\', "/"),
            output_path: item.output_path.to_string_lossy().replace('\\', "/"),
            file_slug: item.file_slug(),
        },
    );
    context.insert("title", &item.data.title);
    context.insert("tags", &item.data.tags);
    context.insert("layout", &item.data.layout);
    context.insert("date", &item.date);
    context.insert("toc", toc);

    context
}

/// Body of a page after template preprocessing and markdown conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBody {
    pub html: String,
    pub toc: Vec<Heading>,
}

/// Owns the Tera instance for one build
#[derive(Debug)]
pub struct PageRenderer {
    tera: Tera,
    markdown_engine: TemplateEngine,
    html_engine: TemplateEngine,
}

impl PageRenderer {
    /// Load layouts and includes and install the template table.
    ///
    /// Layouts are named by their path inside the layouts directory, includes
    /// by their path inside the includes directory.
    pub fn load(
        root: &Path,
        config: &SiteConfig,
        manifest: &Manifest,
        registry: &TemplateRegistry,
    ) -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        let mut files = Vec::new();
        collect_template_files(&config.layouts_dir(root), &mut files);
        collect_template_files(&config.includes_dir(root), &mut files);
        debug!(templates = files.len(), "loading layouts and includes");
        tera.add_template_files(files)?;

        registry.install(&mut tera, manifest);

        Ok(PageRenderer {
            tera,
            markdown_engine: config.build.markdown_template_engine,
            html_engine: config.build.html_template_engine,
        })
    }

    /// Preprocess the page body and convert markdown to HTML
    pub fn render_body(&mut self, item: &ContentItem, context: &Context) -> Result<RenderedBody> {
        if is_markdown(&item.input_path) {
            let source = self.preprocess(self.markdown_engine, item, context)?;
            let rendered = render_markdown(&source);
            Ok(RenderedBody {
                html: rendered.html,
                toc: rendered.headings,
            })
        } else {
            Ok(RenderedBody {
                html: self.preprocess(self.html_engine, item, context)?,
                toc: Vec::new(),
            })
        }
    }

    fn preprocess(
        &mut self,
        engine: TemplateEngine,
        item: &ContentItem,
        context: &Context,
    ) -> Result<String> {
        match engine {
            TemplateEngine::Plain => Ok(item.body.clone()),
            TemplateEngine::Tera => self.tera.render_str(&item.body, context).map_err(|e| {
                BlogError::Template(format!(
                    "{}: {}",
                    item.input_path.display(),
                    tera_message(&e)
                ))
            }),
        }
    }

    /// Wrap the body in the page's layout, if it names one
    pub fn apply_layout(
        &self,
        item: &ContentItem,
        body_html: &str,
        mut context: Context,
    ) -> Result<String> {
        let Some(layout) = item.data.layout.as_deref() else {
            return Ok(body_html.to_string());
        };

        let name = self.resolve_layout(layout).ok_or_else(|| {
            BlogError::Template(format!(
                "layout '{}' used by {} not found",
                layout,
                item.input_path.display()
            ))
        })?;

        context.insert("content", body_html);
        self.tera.render(&name, &context).map_err(|e| {
            BlogError::Template(format!(
                "{} (layout {}): {}",
                item.input_path.display(),
                name,
                tera_message(&e)
            ))
        })
    }

    /// `post`, `post.html` and `post.tera` all name the same layout
    fn resolve_layout(&self, layout: &str) -> Option<String> {
        [
            layout.to_string(),
            format!("{}.html", layout),
            format!("{}.tera", layout),
        ]
        .into_iter()
        .find(|candidate| self.tera.get_template_names().any(|n| n == candidate.as_str()))
    }
}

pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("md"))
}

fn collect_template_files(dir: &Path, files: &mut Vec<(PathBuf, Option<String>)>) {
    if !dir.is_dir() {
        return;
    }
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let Ok(entry) = entry else {
            continue;
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(dir) else {
            continue;
        };
        let name = rel.to_string_lossy().replace('\\', "/");
        files.push((entry.path().to_path_buf(), Some(name)));
    }
}
