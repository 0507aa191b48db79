//! Arena representation of the topic hierarchy.
//!
//! The hierarchy is flattened once at load time. Every node gets a [`NodeId`]
//! equal to its pre-order index, so per-view state can live in plain vectors
//! indexed by id instead of on the nodes themselves.

use std::fmt;

use crate::topic::{NodeKind, TopicNode};

/// Stable index of a node within a [`TopicTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node record in the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Display title
    pub title: String,

    /// Raw page value (may be empty, may be set on a group)
    pub page: Option<String>,

    /// Behavior classification
    pub kind: NodeKind,

    /// Parent node, `None` for top-level nodes
    pub parent: Option<NodeId>,

    /// Nesting depth, 0 for top-level nodes
    pub depth: usize,

    /// Children in display order
    pub children: Vec<NodeId>,
}

impl TreeNode {
    /// The page used for highlighting, `""` when absent.
    pub fn url(&self) -> &str {
        self.page.as_deref().unwrap_or("")
    }

    /// The navigation target. Only leaves have one.
    pub fn target(&self) -> Option<&str> {
        match self.kind {
            NodeKind::Leaf => self.page.as_deref(),
            _ => None,
        }
    }

    pub fn is_group(&self) -> bool {
        self.kind == NodeKind::Group
    }
}

/// Immutable, flattened topic hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicTree {
    nodes: Vec<TreeNode>,
    roots: Vec<NodeId>,
}

impl TopicTree {
    /// Flatten a topic sequence into an arena.
    pub fn from_topics(topics: &[TopicNode]) -> Self {
        let mut tree = Self::default();
        for topic in topics {
            let id = tree.insert(topic, None, 0);
            tree.roots.push(id);
        }
        tree
    }

    fn insert(&mut self, topic: &TopicNode, parent: Option<NodeId>, depth: usize) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            title: topic.title.clone(),
            page: topic.page.clone(),
            kind: topic.kind(),
            parent,
            depth,
            children: Vec::with_capacity(topic.children.len()),
        });

        for child in &topic.children {
            let child_id = self.insert(child, Some(id), depth + 1);
            self.nodes[id.0].children.push(child_id);
        }

        id
    }

    /// Top-level nodes in display order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    /// Look up a node known to belong to this tree.
    ///
    /// Ids are only minted by this tree, so indexing cannot fail for ids
    /// obtained from it.
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Siblings of a node, excluding the node itself.
    pub fn siblings(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let peers = match self.get(id).and_then(|n| n.parent) {
            Some(parent) => self.children(parent),
            None => self.roots(),
        };
        peers.iter().copied().filter(move |&peer| peer != id)
    }

    /// All descendants of a node in pre-order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Every node id in pre-order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Leaf nodes in pre-order.
    pub fn leaves(&self) -> impl Iterator<Item = (NodeId, &TreeNode)> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.kind == NodeKind::Leaf)
            .map(|(i, n)| (NodeId(i), n))
    }

    /// Nodes whose page equals `url` exactly.
    pub fn find_by_url(&self, url: &str) -> Vec<NodeId> {
        if url.is_empty() {
            return Vec::new();
        }
        self.ids().filter(|&id| self.node(id).url() == url).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
