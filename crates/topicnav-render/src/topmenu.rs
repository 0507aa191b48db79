//! Top navbar with multi-level dropdowns.
//!
//! Depth 0 groups are dropdown triggers in the navbar; deeper groups are
//! submenus that open sideways. Open/closed state lives in the view's
//! [`ViewState`] flags, and the functions at the bottom of this module
//! implement the menu rules: sibling submenus are mutually exclusive, and
//! closing any menu closes everything beneath it.

use topicnav_topics::{NodeId, NodeKind, TopicTree};

use crate::dispatch::{DispatchTable, RowAction};
use crate::markup::{Element, Node};
use crate::state::ViewState;
use crate::traits::{Rendered, TreeRenderer, ViewKind};

/// Renders the navbar dropdown menus.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopMenuRenderer;

impl TopMenuRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TreeRenderer for TopMenuRenderer {
    fn kind(&self) -> ViewKind {
        ViewKind::TopMenu
    }

    fn render(&self, tree: &TopicTree, state: &ViewState) -> Rendered {
        let mut dispatch = DispatchTable::new(tree.len());
        let nodes: Vec<Node> = tree
            .roots()
            .iter()
            .map(|&id| build_item(tree, state, id, &mut dispatch).into())
            .collect();

        Rendered { nodes, dispatch }
    }
}

fn build_item(
    tree: &TopicTree,
    state: &ViewState,
    id: NodeId,
    dispatch: &mut DispatchTable,
) -> Element {
    let node = tree.node(id);
    let top = node.depth == 0;

    let li = if top {
        Element::new("li").class("nav-item dropdown")
    } else {
        Element::new("li").class("dropdown-submenu dropend")
    };
    let link_class = if top { "nav-link" } else { "dropdown-item" };

    match node.kind {
        NodeKind::Group => {
            let open = state.is_expanded(id);
            let action = if top {
                RowAction::ToggleDropdown
            } else {
                RowAction::OpenSubmenu
            };

            let mut trigger = Element::new("a")
                .class(link_class)
                .class("dropdown-toggle")
                .class_if(open, "show")
                .attr("href", "#")
                .attr("role", "button")
                .attr("data-bs-toggle", "dropdown")
                .attr("aria-expanded", if open { "true" } else { "false" })
                .attr("data-node", id.to_string());
            if let Some(name) = action.as_attr() {
                trigger = trigger.attr("data-action", name);
            }
            dispatch.set(id, action);

            let items: Vec<Element> = node
                .children
                .iter()
                .map(|&child| build_item(tree, state, child, dispatch))
                .collect();
            let menu = Element::new("ul")
                .class("dropdown-menu")
                .class_if(open, "show")
                .children(items);

            li.child(trigger.text(node.title.as_str())).child(menu)
        }
        NodeKind::Leaf => {
            let target = node.target().unwrap_or_default().to_string();
            let link = Element::new("a")
                .class(link_class)
                .attr("href", "#")
                .attr("data-url", target.as_str())
                .attr("data-node", id.to_string())
                .attr("data-action", "navigate")
                .text(node.title.as_str());
            dispatch.set(id, RowAction::Navigate(target));

            li.child(link)
        }
        NodeKind::Inert => li,
    }
}

/// Close a menu and every menu beneath it.
pub fn close_cascade(tree: &TopicTree, state: &mut ViewState, id: NodeId) {
    state.set_expanded(id, false);
    for descendant in tree.descendants(id) {
        state.set_expanded(descendant, false);
    }
}

/// Click on a depth-0 dropdown trigger.
///
/// Opening a dropdown closes the other top-level dropdowns. Returns whether
/// the dropdown is open afterwards.
pub fn toggle_dropdown(tree: &TopicTree, state: &mut ViewState, id: NodeId) -> bool {
    if state.is_expanded(id) {
        close_cascade(tree, state, id);
        return false;
    }

    for sibling in tree.siblings(id).collect::<Vec<_>>() {
        close_cascade(tree, state, sibling);
    }
    state.set_expanded(id, true);
    true
}

/// Click on a nested submenu trigger.
///
/// Closes open sibling submenus (and their descendants), then opens this one.
/// Clicking an already open submenu leaves it open.
pub fn open_submenu(tree: &TopicTree, state: &mut ViewState, id: NodeId) {
    for sibling in tree.siblings(id).collect::<Vec<_>>() {
        close_cascade(tree, state, sibling);
    }
    state.set_expanded(id, true);
}
