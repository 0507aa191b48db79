//! Per-view display state.

use topicnav_topics::{NodeId, TopicTree, TreeNode};

/// Expanded flags and active target for one view.
///
/// Flags are indexed by [`NodeId`]. For the tree views a flag means the
/// group's sub-list is shown; for the top menu it means the dropdown or
/// submenu is open. Every view owns its own `ViewState`, so expanding a group
/// in the sidebar leaves the mobile accordion untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    expanded: Vec<bool>,
    active: Option<String>,
}

impl ViewState {
    /// Fresh state for `tree`: every group collapsed, nothing active.
    pub fn new(tree: &TopicTree) -> Self {
        Self {
            expanded: vec![false; tree.len()],
            active: None,
        }
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.get(id.index()).copied().unwrap_or(false)
    }

    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) {
        if let Some(flag) = self.expanded.get_mut(id.index()) {
            *flag = expanded;
        }
    }

    /// Flip a group's flag. Returns the new value, or `None` if `id` is not a group.
    pub fn toggle(&mut self, tree: &TopicTree, id: NodeId) -> Option<bool> {
        if !tree.get(id)?.is_group() {
            return None;
        }
        let next = !self.is_expanded(id);
        self.set_expanded(id, next);
        Some(next)
    }

    /// Ids currently expanded, in pre-order.
    pub fn expanded_ids(&self) -> Vec<NodeId> {
        self.expanded
            .iter()
            .enumerate()
            .filter(|(_, open)| **open)
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn set_active(&mut self, target: Option<String>) {
        self.active = target.filter(|t| !t.is_empty());
    }

    /// Whether a row for `node` carries the active highlight.
    pub fn is_active(&self, node: &TreeNode) -> bool {
        match &self.active {
            Some(active) => !node.url().is_empty() && node.url() == active,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use topicnav_topics::TopicNode;

    fn tree() -> TopicTree {
        TopicTree::from_topics(&[
            TopicNode::group("Guide", vec![TopicNode::leaf("Install", "install.html")]),
            TopicNode::leaf("FAQ", "faq.html"),
        ])
    }

    #[test]
    fn starts_collapsed() {
        let tree = tree();
        let state = ViewState::new(&tree);

        assert!(tree.ids().all(|id| !state.is_expanded(id)));
        assert_eq!(state.active(), None);
    }

    #[test]
    fn toggling_twice_restores_collapsed() {
        let tree = tree();
        let mut state = ViewState::new(&tree);

        assert_eq!(state.toggle(&tree, NodeId(0)), Some(true));
        assert_eq!(state.toggle(&tree, NodeId(0)), Some(false));
        assert!(!state.is_expanded(NodeId(0)));
    }

    #[test]
    fn leaves_do_not_toggle() {
        let tree = tree();
        let mut state = ViewState::new(&tree);

        assert_eq!(state.toggle(&tree, NodeId(2)), None);
        assert!(state.expanded_ids().is_empty());
    }

    #[test]
    fn highlights_by_exact_url() {
        let tree = tree();
        let mut state = ViewState::new(&tree);
        state.set_active(Some("faq.html".to_string()));

        assert!(state.is_active(tree.node(NodeId(2))));
        assert!(!state.is_active(tree.node(NodeId(1))));
        assert!(!state.is_active(tree.node(NodeId(0))));
    }

    #[test]
    fn empty_active_is_cleared() {
        let tree = tree();
        let mut state = ViewState::new(&tree);
        state.set_active(Some(String::new()));

        assert_eq!(state.active(), None);
    }
}
