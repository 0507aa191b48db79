//! Mobile offcanvas accordion.

use topicnav_topics::TopicTree;

use crate::accordion::{render_tree, TreeStyle};
use crate::state::ViewState;
use crate::traits::{Rendered, TreeRenderer, ViewKind};

const STYLE: TreeStyle = TreeStyle {
    group_icon: "fa-regular fa-folder text-primary",
    inert_as_group: true,
    open_class: false,
    static_aria_expanded: "false",
};

/// Renders the accordion inside the mobile overlay panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct MobileRenderer;

impl MobileRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TreeRenderer for MobileRenderer {
    fn kind(&self) -> ViewKind {
        ViewKind::Mobile
    }

    fn render(&self, tree: &TopicTree, state: &ViewState) -> Rendered {
        render_tree(tree, state, &STYLE)
    }
}
