//! Static site builder.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use topicnav_navigator::{FsSource, LogOpener, NavOutcome, Navigator, Session};
use topicnav_topics::{load_topics, LoadError, TOPICS_FILE};

use crate::assets::AssetPipeline;
use crate::templates::{Context, SiteInfo, TemplateEngine};

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Site directory holding topics.json and the page fragments
    pub site_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Minify CSS output
    pub minify: bool,

    /// Base URL for the site
    pub base_url: String,

    /// Site title
    pub title: String,

    /// Target pre-loaded into the content pane
    pub home: Option<String>,

    /// Stylesheet URLs to link (e.g. the UI framework)
    pub styles: Vec<String>,

    /// Script URLs to load before the runtime
    pub scripts: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            site_dir: PathBuf::from("site"),
            output_dir: PathBuf::from("dist"),
            minify: true,
            base_url: "/".to_string(),
            title: "Documentation".to_string(),
            home: None,
            styles: vec![],
            scripts: vec![],
        }
    }
}

impl BuildConfig {
    pub fn site_info(&self) -> SiteInfo {
        SiteInfo {
            title: self.title.clone(),
            base_url: self.base_url.clone(),
            styles: self.styles.clone(),
            scripts: self.scripts.clone(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of navigable pages in the topic tree
    pub pages: usize,

    /// Number of site files copied
    pub files: usize,

    /// Leaf targets with no file in the site directory
    pub missing: Vec<String>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read site directory: {0}")]
    ReadError(String),

    #[error("Failed to load topics: {0}")]
    TopicsError(#[from] LoadError),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            templates: TemplateEngine::new(),
        }
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        if !self.config.site_dir.exists() {
            return Err(BuildError::ReadError(format!(
                "Site directory not found: {}",
                self.config.site_dir.display()
            )));
        }

        // Loading directly instead of through Session::start surfaces the
        // parse error instead of an empty navigation.
        let topics = load_topics(&self.config.site_dir.join(TOPICS_FILE))?;

        let source = FsSource::new(&self.config.site_dir);
        let mut session = Session::with_topics(Navigator::new(source, Arc::new(LogOpener)), &topics);

        if let Some(home) = &self.config.home {
            match session.navigate(home, false).await {
                NavOutcome::Loaded => tracing::info!("Pre-rendered home page {}", home),
                NavOutcome::Failed => tracing::warn!("Home page {} could not be loaded", home),
                NavOutcome::External | NavOutcome::Skipped => {
                    tracing::warn!("Home page {} is not an inline page", home)
                }
            }
        }

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let html = self
            .templates
            .render_shell(&Context::from_session(&session, &self.config.site_info()))
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;
        fs::write(self.config.output_dir.join("index.html"), html)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let files = self.copy_site_files()?;

        self.generate_assets()?;

        let missing = self.find_missing_pages(&session);
        for target in &missing {
            tracing::warn!("Page not found in site directory: {}", target);
        }

        let pages = session.tree().map(|t| t.leaves().count()).unwrap_or(0);

        Ok(BuildResult {
            pages,
            files,
            missing,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Copy every file of the site directory into the output directory.
    fn copy_site_files(&self) -> Result<usize, BuildError> {
        let output = self.config.output_dir.canonicalize().ok();

        let files: Vec<PathBuf> = WalkDir::new(&self.config.site_dir)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| match (&output, entry.path().canonicalize()) {
                // Skip the output directory when it is nested in the site.
                (Some(out), Ok(path)) => path != *out,
                _ => true,
            })
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .collect();

        let results: Vec<Result<(), BuildError>> = files
            .par_iter()
            .map(|path| self.copy_file(path))
            .collect();

        for result in results {
            result?;
        }

        Ok(files.len())
    }

    fn copy_file(&self, path: &Path) -> Result<(), BuildError> {
        let relative = path
            .strip_prefix(&self.config.site_dir)
            .map_err(|e| BuildError::ReadError(e.to_string()))?;
        let dest = self.config.output_dir.join(relative);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        fs::copy(path, &dest)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", dest.display(), e)))?;

        Ok(())
    }

    /// Local leaf targets that do not resolve to a file.
    fn find_missing_pages(&self, session: &Session<FsSource>) -> Vec<String> {
        let Some(tree) = session.tree() else {
            return Vec::new();
        };
        let source = session.navigator().source();

        let mut seen = HashSet::new();

        tree.leaves()
            .filter_map(|(_, node)| node.target())
            .filter(|target| !Navigator::<FsSource>::is_external(target))
            .filter(|target| !target.contains("://"))
            .filter(|target| seen.insert(*target))
            .filter(|target| match source.resolve(target) {
                Ok(path) => !path.is_file(),
                Err(_) => true,
            })
            .map(str::to_string)
            .collect()
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or(css)
        } else {
            css
        };
        fs::write(assets_dir.join("main.css"), css)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(assets_dir.join("main.js"), AssetPipeline::generate_js())
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }
}
