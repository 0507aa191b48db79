//! Headless host page.
//!
//! A [`Session`] owns everything the navigation engine touches on a page: the
//! topic tree, the three navigation views, the content pane, the mobile
//! overlay and the history. Event entry points (`click`, `navigate`,
//! `back`/`forward`, `pop_state`) mutate it the way the corresponding browser
//! events would.

use topicnav_render::{ClickEffect, NavViews, ViewKind};
use topicnav_topics::{parse_topics, NodeId, TopicNode, TopicTree, TOPICS_FILE};

use crate::history::{History, PopState};
use crate::navigator::{warning_html, Navigator, Resolution};
use crate::source::ContentSource;

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Empty target; nothing happened
    Skipped,
    /// Opened in a new browsing context
    External,
    /// Content pane replaced with the fragment
    Loaded,
    /// Content pane shows the not-found warning
    Failed,
}

/// Result of clicking a navigation row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Click {
    pub effect: ClickEffect,
    /// Set when the row navigated
    pub outcome: Option<NavOutcome>,
}

/// The pane that receives fragment markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentPane {
    html: String,
}

impl ContentPane {
    /// Mount id in the host page.
    pub const ID: &'static str = "contentArea";

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Replace the markup verbatim.
    pub fn set_html(&mut self, html: String) {
        self.html = html;
    }
}

/// The host page driven by the navigation engine.
pub struct Session<S> {
    navigator: Navigator<S>,
    tree: Option<TopicTree>,
    views: NavViews,
    content: ContentPane,
    overlay_open: bool,
    history: History,
}

impl<S: ContentSource> Session<S> {
    /// A page with nothing loaded.
    pub fn new(navigator: Navigator<S>) -> Self {
        Self {
            navigator,
            tree: None,
            views: NavViews::new(),
            content: ContentPane::default(),
            overlay_open: false,
            history: History::default(),
        }
    }

    /// Fetch `topics.json` through the navigator's source and render the views.
    ///
    /// A failed fetch or parse leaves the navigation empty; there is no retry.
    pub async fn start(navigator: Navigator<S>) -> Self {
        let mut session = Self::new(navigator);

        let loaded = match session.navigator.source().fetch(TOPICS_FILE).await {
            Ok(json) => parse_topics(&json).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match loaded {
            Ok(topics) => session.install(&topics),
            Err(e) => tracing::error!("Failed to load {}: {}", TOPICS_FILE, e),
        }

        session
    }

    /// A page whose navigation is built from already loaded topics.
    pub fn with_topics(navigator: Navigator<S>, topics: &[TopicNode]) -> Self {
        let mut session = Self::new(navigator);
        session.install(topics);
        session
    }

    fn install(&mut self, topics: &[TopicNode]) {
        let tree = TopicTree::from_topics(topics);
        self.views.populate(&tree);
        tracing::debug!("Loaded {} topics ({} nodes)", topics.len(), tree.len());
        self.tree = Some(tree);
    }

    pub fn is_populated(&self) -> bool {
        self.tree.is_some()
    }

    pub fn tree(&self) -> Option<&TopicTree> {
        self.tree.as_ref()
    }

    pub fn views(&self) -> &NavViews {
        &self.views
    }

    pub fn content(&self) -> &ContentPane {
        &self.content
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn navigator(&self) -> &Navigator<S> {
        &self.navigator
    }

    pub fn is_overlay_open(&self) -> bool {
        self.overlay_open
    }

    /// Show the mobile overlay panel.
    pub fn open_overlay(&mut self) {
        self.overlay_open = true;
    }

    /// Click a row in one of the views.
    pub async fn click(&mut self, kind: ViewKind, id: NodeId) -> Click {
        let Some(tree) = self.tree.as_ref() else {
            return Click {
                effect: ClickEffect::Inert,
                outcome: None,
            };
        };

        let effect = self.views.get_mut(kind).click(tree, id);
        let outcome = match &effect {
            ClickEffect::Navigate(target) => {
                let target = target.clone();
                Some(self.navigate(&target, true).await)
            }
            _ => None,
        };

        Click { effect, outcome }
    }

    /// A top-level dropdown was dismissed.
    pub fn hide_dropdown(&mut self, id: NodeId) {
        if let Some(tree) = self.tree.as_ref() {
            self.views.get_mut(ViewKind::TopMenu).hide_menu(tree, id);
        }
    }

    /// Load `target` into the content pane.
    ///
    /// Errors never escape: a failed fetch leaves a warning in the pane.
    pub async fn navigate(&mut self, target: &str, record_history: bool) -> NavOutcome {
        match self.navigator.resolve(target).await {
            Resolution::Skipped => NavOutcome::Skipped,
            Resolution::External => NavOutcome::External,
            Resolution::Failed(e) => {
                tracing::warn!("Failed to load {}: {}", target, e);
                self.content.set_html(warning_html(target));
                NavOutcome::Failed
            }
            Resolution::Body(body) => {
                self.content.set_html(body);
                self.overlay_open = false;
                if let Some(tree) = self.tree.as_ref() {
                    self.views.highlight(tree, target);
                }
                if record_history {
                    self.history.push(target);
                }
                tracing::debug!("Navigated to {}", target);
                NavOutcome::Loaded
            }
        }
    }

    /// Browser back button.
    pub async fn back(&mut self) -> Option<NavOutcome> {
        let event = self.history.back()?;
        self.pop_state(event).await
    }

    /// Browser forward button.
    pub async fn forward(&mut self) -> Option<NavOutcome> {
        let event = self.history.forward()?;
        self.pop_state(event).await
    }

    /// Restore the page from a history event without recording a new entry.
    pub async fn pop_state(&mut self, event: PopState) -> Option<NavOutcome> {
        let target = event.fragment?;
        Some(self.navigate(&target, false).await)
    }

    /// Inner HTML of a view's mount point.
    pub fn mount_html(&self, kind: ViewKind) -> String {
        self.views.get(kind).mount().html()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::opener::RecordingOpener;
    use crate::testing::MemorySource;
    use pretty_assertions::assert_eq;
    use topicnav_render::RowAction;

    const TOPICS: &str = r#"{
  "topics": [
    { "title": "Guide", "children": [
      { "title": "Install", "page": "install.html" },
      { "title": "Deps", "page": "graph/deps.html" }
    ] },
    { "title": "Install (again)", "page": "install.html" },
    { "title": "Missing", "page": "missing.html" },
    { "title": "Soon" }
  ]
}"#;

    fn source() -> MemorySource {
        MemorySource::new()
            .with(TOPICS_FILE, TOPICS)
            .with("install.html", "<h1>Install</h1>")
    }

    async fn session(source: MemorySource) -> (Session<MemorySource>, Arc<RecordingOpener>) {
        let opener = Arc::new(RecordingOpener::new());
        let session = Session::start(Navigator::new(source, opener.clone())).await;
        (session, opener)
    }

    #[tokio::test]
    async fn start_populates_all_views() {
        let (session, _) = session(source()).await;

        assert!(session.is_populated());
        for kind in ViewKind::ALL {
            assert!(!session.mount_html(kind).is_empty(), "{} is empty", kind);
        }
    }

    #[tokio::test]
    async fn start_accepts_bare_array() {
        let source = MemorySource::new().with(TOPICS_FILE, r#"[{"title": "A", "page": "a.html"}]"#);
        let (session, _) = session(source).await;

        assert_eq!(session.tree().map(|t| t.len()), Some(1));
    }

    #[tokio::test]
    async fn failed_startup_leaves_navigation_empty() {
        let (session, _) = session(MemorySource::new().with(TOPICS_FILE, "{ not json")).await;

        assert!(!session.is_populated());
        assert!(session.views().iter().all(|v| v.mount().is_empty()));
    }

    #[tokio::test]
    async fn missing_topics_leaves_navigation_empty() {
        let (session, _) = session(MemorySource::new()).await;
        assert!(!session.is_populated());
    }

    #[tokio::test]
    async fn clicking_leaf_loads_fragment_verbatim() {
        let source = MemorySource::new()
            .with(TOPICS_FILE, r#"{ "topics": [{"title": "A", "page": "a.html"}] }"#)
            .with("a.html", "<section>\n  <p>A & B</p>\n</section>");
        let (mut session, _) = session(source.clone()).await;

        let click = session.click(ViewKind::Sidebar, NodeId(0)).await;

        assert_eq!(click.outcome, Some(NavOutcome::Loaded));
        assert_eq!(source.requests(), vec![TOPICS_FILE.to_string(), "a.html".to_string()]);
        assert_eq!(session.content().html(), "<section>\n  <p>A & B</p>\n</section>");
    }

    #[tokio::test]
    async fn navigation_highlights_matching_rows_in_both_trees() {
        let (mut session, _) = session(source()).await;

        session.navigate("install.html", true).await;

        let tree = session.tree().unwrap();
        for kind in [ViewKind::Sidebar, ViewKind::Mobile] {
            assert_eq!(
                session.views().get(kind).highlighted(tree),
                vec![NodeId(1), NodeId(3)]
            );
        }
    }

    #[tokio::test]
    async fn navigation_records_history() {
        let (mut session, _) = session(source()).await;

        session.navigate("install.html", true).await;

        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history().current().url, "/#install.html");
    }

    #[tokio::test]
    async fn navigation_closes_overlay() {
        let (mut session, _) = session(source()).await;
        session.open_overlay();

        session.navigate("install.html", true).await;

        assert!(!session.is_overlay_open());
    }

    #[tokio::test]
    async fn graph_targets_leave_page_untouched() {
        let (mut session, opener) = session(source()).await;
        session.open_overlay();
        session.navigate("install.html", true).await;
        let before = session.content().html().to_string();

        session.open_overlay();
        let outcome = session.navigate("graph/deps.html", true).await;

        assert_eq!(outcome, NavOutcome::External);
        assert_eq!(session.content().html(), before);
        assert_eq!(session.history().len(), 2);
        assert!(session.is_overlay_open());
        assert_eq!(opener.opened(), vec!["graph/deps.html".to_string()]);
    }

    #[tokio::test]
    async fn failed_fetch_shows_warning() {
        let (mut session, _) = session(source()).await;

        let outcome = session.navigate("missing.html", true).await;

        assert_eq!(outcome, NavOutcome::Failed);
        assert!(session.content().html().contains("missing.html"));
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn empty_target_does_nothing() {
        let source = source();
        let (mut session, _) = session(source.clone()).await;

        let outcome = session.navigate("", true).await;

        assert_eq!(outcome, NavOutcome::Skipped);
        assert_eq!(source.requests(), vec![TOPICS_FILE.to_string()]);
        assert_eq!(session.content().html(), "");
    }

    #[tokio::test]
    async fn inert_row_is_not_wired() {
        let (mut session, _) = session(source()).await;
        let soon = NodeId(5);

        assert_eq!(
            session.views().get(ViewKind::Sidebar).dispatch().lookup(soon),
            &RowAction::Inert
        );
        let click = session.click(ViewKind::Sidebar, soon).await;
        assert_eq!(click.effect, ClickEffect::Inert);
        assert_eq!(click.outcome, None);
    }

    #[tokio::test]
    async fn group_click_toggles_without_navigating() {
        let (mut session, _) = session(source()).await;

        let first = session.click(ViewKind::Mobile, NodeId(0)).await;
        let second = session.click(ViewKind::Mobile, NodeId(0)).await;

        assert_eq!(first.effect, ClickEffect::Toggled { expanded: true });
        assert_eq!(second.effect, ClickEffect::Toggled { expanded: false });
        assert!(session.mount_html(ViewKind::Mobile).contains("display:none"));
    }

    #[tokio::test]
    async fn back_restores_without_pushing() {
        let source = source().with("b.html", "<h1>B</h1>");
        let (mut session, _) = session(source).await;

        session.navigate("install.html", true).await;
        session.navigate("b.html", true).await;
        let outcome = session.back().await;

        assert_eq!(outcome, Some(NavOutcome::Loaded));
        assert_eq!(session.content().html(), "<h1>Install</h1>");
        assert_eq!(session.history().len(), 3);
        assert_eq!(session.history().current().url, "/#install.html");
    }

    #[tokio::test]
    async fn pop_state_with_fragment_navigates_silently() {
        let (mut session, _) = session(source()).await;

        let outcome = session
            .pop_state(PopState::from_url("/#install.html"))
            .await;

        assert_eq!(outcome, Some(NavOutcome::Loaded));
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn pop_state_without_fragment_is_ignored() {
        let (mut session, _) = session(source()).await;

        let outcome = session.pop_state(PopState::from_url("/")).await;

        assert_eq!(outcome, None);
    }

    #[test]
    fn runs_on_blocking_executor() {
        let source = MemorySource::new()
            .with(TOPICS_FILE, r#"[{"title": "A", "page": "a.html"}]"#)
            .with("a.html", "A");
        let opener = Arc::new(RecordingOpener::new());

        let mut session = tokio_test::block_on(Session::start(Navigator::new(source, opener)));
        let outcome = tokio_test::block_on(session.navigate("a.html", false));

        assert_eq!(outcome, NavOutcome::Loaded);
        assert_eq!(session.content().html(), "A");
    }
}
