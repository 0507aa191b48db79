//! Target resolution.

use std::sync::Arc;

use html_escape::encode_text;

use crate::opener::ExternalOpener;
use crate::source::{ContentSource, FetchError};

/// Targets containing this substring open externally instead of inline.
pub const EXTERNAL_MARKER: &str = "graph";

/// What resolving a target produced.
#[derive(Debug)]
pub enum Resolution {
    /// Empty target; nothing was attempted
    Skipped,
    /// Handed to the external opener
    External,
    /// Fetched fragment body
    Body(String),
    /// Fetch failed
    Failed(FetchError),
}

/// Resolves targets through a [`ContentSource`] and an [`ExternalOpener`].
pub struct Navigator<S> {
    source: S,
    opener: Arc<dyn ExternalOpener>,
}

impl<S: ContentSource> Navigator<S> {
    pub fn new(source: S, opener: Arc<dyn ExternalOpener>) -> Self {
        Self { source, opener }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Whether `target` is routed to the external opener.
    pub fn is_external(target: &str) -> bool {
        target.contains(EXTERNAL_MARKER)
    }

    /// Resolve a target. Never fails; failures are reported as [`Resolution::Failed`].
    pub async fn resolve(&self, target: &str) -> Resolution {
        if target.is_empty() {
            return Resolution::Skipped;
        }

        if Self::is_external(target) {
            self.opener.open(target);
            return Resolution::External;
        }

        match self.source.fetch(target).await {
            Ok(body) => Resolution::Body(body),
            Err(e) => Resolution::Failed(e),
        }
    }
}

/// Inline warning shown when a target cannot be loaded.
pub fn warning_html(target: &str) -> String {
    format!(
        r#"<div class="alert alert-warning">Content not found: <code>{}</code></div>"#,
        encode_text(target)
    )
}
