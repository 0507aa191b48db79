//! Renderer trait and mount points.

use std::fmt;
use std::str::FromStr;

use topicnav_topics::TopicTree;

use crate::dispatch::DispatchTable;
use crate::markup::{to_html, Node};
use crate::state::ViewState;

/// The three navigation presentations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Sidebar,
    Mobile,
    TopMenu,
}

impl ViewKind {
    /// Load order: renderers are populated in this order at startup.
    pub const ALL: [ViewKind; 3] = [ViewKind::Sidebar, ViewKind::Mobile, ViewKind::TopMenu];

    /// Id of the host page element this view renders into.
    pub fn mount_id(&self) -> &'static str {
        match self {
            Self::Sidebar => "sideTree",
            Self::Mobile => "mobileTree",
            Self::TopMenu => "topMenu",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sidebar => "sidebar",
            Self::Mobile => "mobile",
            Self::TopMenu => "top",
        }
    }

    /// Whether navigation highlights rows in this view.
    pub fn highlights_active(&self) -> bool {
        matches!(self, Self::Sidebar | Self::Mobile)
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a view name.
#[derive(Debug, thiserror::Error)]
#[error("Unknown view: {0} (expected sidebar, mobile or top)")]
pub struct UnknownView(pub String);

impl FromStr for ViewKind {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sidebar" => Ok(Self::Sidebar),
            "mobile" => Ok(Self::Mobile),
            "top" | "topmenu" => Ok(Self::TopMenu),
            other => Err(UnknownView(other.to_string())),
        }
    }
}

/// Output of a single render pass.
#[derive(Debug, Clone, Default)]
pub struct Rendered {
    /// Nodes to place inside the mount point
    pub nodes: Vec<Node>,

    /// What clicking each row does
    pub dispatch: DispatchTable,
}

/// A named insertion point in the host page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mount {
    id: String,
    content: Vec<Node>,
}

impl Mount {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content(&self) -> &[Node] {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn clear(&mut self) {
        self.content.clear();
    }

    pub fn append(&mut self, nodes: impl IntoIterator<Item = Node>) {
        self.content.extend(nodes);
    }

    /// Inner HTML of the mount.
    pub fn html(&self) -> String {
        to_html(&self.content)
    }
}

/// Trait for presentation-specific tree builders.
pub trait TreeRenderer: Send + Sync {
    /// Which view this renderer produces.
    fn kind(&self) -> ViewKind;

    /// Project the tree and state to markup.
    fn render(&self, tree: &TopicTree, state: &ViewState) -> Rendered;

    /// Clear `mount` and rebuild it. Returns the new dispatch table.
    fn render_into(&self, tree: &TopicTree, state: &ViewState, mount: &mut Mount) -> DispatchTable {
        let rendered = self.render(tree, state);
        mount.clear();
        mount.append(rendered.nodes);
        rendered.dispatch
    }
}
