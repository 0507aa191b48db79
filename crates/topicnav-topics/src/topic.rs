//! The topic node entity.

use serde::{Deserialize, Deserializer, Serialize};

/// One entry in the navigation hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicNode {
    /// Display title (required)
    pub title: String,

    /// Content fragment this node points at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,

    /// Nested topics, in display order. `null` reads as no children.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<TopicNode>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<TopicNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<TopicNode>>::deserialize(deserializer)?.unwrap_or_default())
}

/// How a node behaves once rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Has a non-empty page and no children; clicking navigates.
    Leaf,
    /// Has children; clicking expands or collapses.
    Group,
    /// Neither; the row has no behavior.
    Inert,
}

impl NodeKind {
    /// Lowercase name used in markup and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Leaf => "leaf",
            Self::Group => "group",
            Self::Inert => "inert",
        }
    }
}

impl TopicNode {
    /// Create a leaf node.
    pub fn leaf(title: impl Into<String>, page: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            page: Some(page.into()),
            children: Vec::new(),
        }
    }

    /// Create a group node.
    pub fn group(title: impl Into<String>, children: Vec<TopicNode>) -> Self {
        Self {
            title: title.into(),
            page: None,
            children,
        }
    }

    /// Classify the node. Children take precedence over a page.
    pub fn kind(&self) -> NodeKind {
        if !self.children.is_empty() {
            NodeKind::Group
        } else if self.target().is_some() {
            NodeKind::Leaf
        } else {
            NodeKind::Inert
        }
    }

    /// The page, if present and non-empty.
    pub fn target(&self) -> Option<&str> {
        self.page.as_deref().filter(|p| !p.is_empty())
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}
