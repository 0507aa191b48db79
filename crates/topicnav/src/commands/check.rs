//! Headless link check.
//!
//! Loads the topic tree into a session and clicks every navigating row in
//! the sidebar, the same way a reader would. Pages come from the site directory,
//! or from a running site when a base URL is given.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use topicnav_navigator::{
    ContentSource, ExternalOpener, FsSource, HttpSource, LogOpener, NavOutcome, Navigator,
    Session, SystemOpener,
};
use topicnav_render::ViewKind;
use topicnav_topics::{parse_topics, TOPICS_FILE};

use crate::config::load_config;

/// What clicking every leaf produced.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub loaded: Vec<String>,
    pub external: Vec<String>,
    pub failed: Vec<String>,
}

/// Click every leaf of the topic tree served by `source`.
pub async fn check_source<S: ContentSource>(
    source: S,
    opener: Arc<dyn ExternalOpener>,
) -> Result<CheckReport> {
    let json = source
        .fetch(TOPICS_FILE)
        .await
        .with_context(|| format!("Failed to fetch {}", TOPICS_FILE))?;
    let topics = parse_topics(&json).with_context(|| format!("Failed to parse {}", TOPICS_FILE))?;

    let mut session = Session::with_topics(Navigator::new(source, opener), &topics);

    let rows: Vec<_> = session
        .views()
        .get(ViewKind::Sidebar)
        .dispatch()
        .navigations()
        .map(|(id, target)| (id, target.to_string()))
        .collect();

    let mut report = CheckReport::default();
    for (id, target) in rows {
        let click = session.click(ViewKind::Sidebar, id).await;
        match click.outcome {
            Some(NavOutcome::Loaded) => report.loaded.push(target),
            Some(NavOutcome::External) => report.external.push(target),
            Some(NavOutcome::Failed) => report.failed.push(target),
            Some(NavOutcome::Skipped) | None => {}
        }
    }

    Ok(report)
}

/// Run the check command.
pub async fn run(config_path: &Path, base_url: Option<String>, open_external: bool) -> Result<()> {
    let config = load_config(config_path)?;

    let opener: Arc<dyn ExternalOpener> = if open_external {
        Arc::new(SystemOpener)
    } else {
        Arc::new(LogOpener)
    };

    let report = match base_url {
        Some(url) => {
            tracing::info!("Checking {}", url);
            let source =
                HttpSource::new(&url).with_context(|| format!("Invalid base URL {}", url))?;
            check_source(source, opener).await?
        }
        None => {
            let site_dir = config.site_dir();
            tracing::info!("Checking {}", site_dir.display());
            check_source(FsSource::new(site_dir), opener).await?
        }
    };

    for target in &report.external {
        tracing::info!("External: {}", target);
    }
    for target in &report.failed {
        tracing::error!("Not found: {}", target);
    }

    tracing::info!(
        "{} loaded, {} external, {} failed",
        report.loaded.len(),
        report.external.len(),
        report.failed.len()
    );

    if !report.failed.is_empty() {
        anyhow::bail!("{} pages failed to load", report.failed.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Router};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;
    use topicnav_navigator::RecordingOpener;

    const TOPICS: &str = r#"{ "topics": [
  { "title": "Intro", "page": "intro.html" },
  { "title": "Reference", "children": [
    { "title": "Missing", "page": "missing.html" },
    { "title": "Graph", "page": "https://example.com/graph/1" },
    { "title": "Soon" }
  ] }
] }"#;

    fn expected() -> CheckReport {
        CheckReport {
            loaded: vec!["intro.html".to_string()],
            external: vec!["https://example.com/graph/1".to_string()],
            failed: vec!["missing.html".to_string()],
        }
    }

    #[tokio::test]
    async fn reports_each_leaf_from_disk() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("topics.json"), TOPICS).unwrap();
        fs::write(temp.path().join("intro.html"), "<h1>Intro</h1>").unwrap();

        let opener = Arc::new(RecordingOpener::new());
        let report = check_source(FsSource::new(temp.path()), opener.clone())
            .await
            .unwrap();

        assert_eq!(report, expected());
        assert_eq!(opener.opened(), vec!["https://example.com/graph/1"]);
    }

    #[tokio::test]
    async fn reports_each_leaf_over_http() {
        // Anything not routed answers 404.
        let app = Router::new()
            .route("/docs/topics.json", get(|| async { TOPICS }))
            .route("/docs/intro.html", get(|| async { "<h1>Intro</h1>" }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let source = HttpSource::new(&format!("http://{}/docs", addr)).unwrap();
        let report = check_source(source, Arc::new(RecordingOpener::new()))
            .await
            .unwrap();

        assert_eq!(report, expected());
    }

    #[tokio::test]
    async fn missing_topics_is_an_error() {
        let temp = tempdir().unwrap();
        let result = check_source(FsSource::new(temp.path()), Arc::new(LogOpener)).await;
        assert!(result.is_err());
    }
}
