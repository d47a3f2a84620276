//! Site build use case
//!
//! Orchestrates a full build: manifest, content, collections, rendering,
//! then output. Everything is rendered in memory before the first write so
//! a failing page leaves the output directory untouched.

use crate::domain::{BuildMode, Collections, ContentItem};
use crate::error::{BlogError, Result};
use crate::infrastructure::feed::build_feed;
use crate::infrastructure::renderer::{is_markdown, page_context, Globals, RenderedBody};
use crate::infrastructure::{
    FileSystemRepository, ManifestResolver, PageRenderer, SiteConfig, SiteRepository,
    TemplateRegistry,
};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Options for a build
#[derive(Debug, Clone, Copy)]
pub struct BuildOptions {
    pub mode: BuildMode,
}

/// What a build produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub mode: BuildMode,
    pub output_dir: PathBuf,
    pub pages_written: usize,
    pub files_copied: usize,
    pub tags: Vec<String>,
    /// Feed path relative to the output directory, if one was written
    pub feed: Option<PathBuf>,
}

/// A fully rendered build, not yet written
struct BuildPlan {
    pages: Vec<(PathBuf, String)>,
    assets: Vec<PathBuf>,
    feed: Option<(PathBuf, String)>,
    tags: Vec<String>,
}

/// Service for building the site
pub struct BuildSiteService {
    repository: FileSystemRepository,
}

impl BuildSiteService {
    /// Create new build service
    pub fn new(repository: FileSystemRepository) -> Self {
        BuildSiteService { repository }
    }

    /// Execute the build
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The asset manifest cannot be loaded (production mode); nothing else runs
    /// - The input directory is missing
    /// - A page has invalid front matter or fails to render
    /// - Two pages resolve to the same output file
    /// - File I/O fails
    pub fn execute(&self, options: BuildOptions) -> Result<BuildReport> {
        let root = self.repository.root();

        // 1. Configuration and manifest, before any other step
        let config = self.repository.load_config()?;
        let manifest = ManifestResolver::resolve(options.mode, &config.manifest_path(root))?;
        info!(mode = %options.mode, root = %root.display(), "starting build");

        // 2. Render everything in memory
        let plan = self.plan(&config, &manifest)?;

        // 3. Write
        for (path, html) in &plan.pages {
            debug!(path = %path.display(), "writing page");
            self.repository.write_output(&config, path, html)?;
        }
        for asset in &plan.assets {
            self.repository.copy_passthrough(&config, asset)?;
        }
        if let Some((path, xml)) = &plan.feed {
            self.repository.write_output(&config, path, xml)?;
        }

        let report = BuildReport {
            mode: options.mode,
            output_dir: config.output_dir(root),
            pages_written: plan.pages.len(),
            files_copied: plan.assets.len(),
            tags: plan.tags,
            feed: plan.feed.map(|(path, _)| path),
        };
        info!(
            pages = report.pages_written,
            copied = report.files_copied,
            tags = report.tags.len(),
            "build complete"
        );
        Ok(report)
    }

    fn plan(&self, config: &SiteConfig, manifest: &crate::domain::Manifest) -> Result<BuildPlan> {
        let root = self.repository.root();

        let data = self.repository.load_data(config)?;
        let sources = self.repository.scan_sources(config)?;
        let items = sources
            .templates
            .iter()
            .map(|rel| self.repository.load_item(config, rel))
            .collect::<Result<Vec<ContentItem>>>()?;
        check_output_collisions(&items)?;
        info!(pages = items.len(), "loaded content");

        let mut renderer =
            PageRenderer::load(root, config, manifest, &TemplateRegistry::standard())?;

        // Markdown bodies render first so HTML pages and layouts can list
        // them with their content.
        let (markdown, other): (Vec<&ContentItem>, Vec<&ContentItem>) =
            items.iter().partition(|item| is_markdown(&item.input_path));

        let mut bodies: BTreeMap<PathBuf, RenderedBody> = BTreeMap::new();
        for batch in [markdown, other] {
            let collections = Collections::build(&items, &body_html(&bodies));
            let globals = Globals {
                site: &config.site,
                data: &data,
                collections: collections.to_value(),
            };
            for item in batch {
                let context = page_context(item, &globals, &[]);
                let body = renderer.render_body(item, &context)?;
                bodies.insert(item.input_path.clone(), body);
            }
        }

        let collections = Collections::build(&items, &body_html(&bodies));
        let globals = Globals {
            site: &config.site,
            data: &data,
            collections: collections.to_value(),
        };

        let mut pages = Vec::with_capacity(items.len());
        for item in &items {
            let body = bodies.get(&item.input_path).ok_or_else(|| {
                BlogError::Template(format!("{} was not rendered", item.input_path.display()))
            })?;
            let context = page_context(item, &globals, &body.toc);
            let html = renderer.apply_layout(item, &body.html, context)?;
            pages.push((item.output_path.clone(), html));
        }

        let feed = if config.feed.enabled {
            build_feed(
                &config.site,
                &config.feed,
                collections.tagged(&config.feed.collection),
            )
            .map(|xml| (PathBuf::from(&config.feed.path), xml))
        } else {
            None
        };

        let assets = if config.build.passthrough_copy {
            sources.assets
        } else {
            Vec::new()
        };

        Ok(BuildPlan {
            pages,
            assets,
            feed,
            tags: collections.tag_list().to_vec(),
        })
    }
}

fn body_html(bodies: &BTreeMap<PathBuf, RenderedBody>) -> BTreeMap<PathBuf, String> {
    bodies
        .iter()
        .map(|(path, body)| (path.clone(), body.html.clone()))
        .collect()
}

/// Two pages writing the same file is always a mistake
fn check_output_collisions(items: &[ContentItem]) -> Result<()> {
    let mut seen: HashMap<&Path, &Path> = HashMap::new();
    for item in items {
        if let Some(first) = seen.insert(&item.output_path, &item.input_path) {
            return Err(BlogError::Config(format!(
                "{} and {} both write {}",
                first.display(),
                item.input_path.display(),
                item.output_path.display()
            )));
        }
    }
    Ok(())
}
