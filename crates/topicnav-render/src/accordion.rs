//! Shared recursive builder for the expandable tree views.
//!
//! The sidebar and the mobile accordion render the same row structure and
//! differ only in a few classes, so both are a [`TreeStyle`] applied to
//! [`render_tree`].

use topicnav_topics::{NodeId, NodeKind, TopicTree, TreeNode};

use crate::dispatch::{DispatchTable, RowAction};
use crate::markup::Element;
use crate::state::ViewState;
use crate::traits::Rendered;

pub(crate) const CARET_CLASS: &str = "fa-solid fa-caret-right caret";
pub(crate) const LEAF_ICON: &str = "fa-regular fa-file-lines text-secondary";

/// Presentation differences between tree variants.
#[derive(Debug, Clone, Copy)]
pub struct TreeStyle {
    /// Icon classes for group rows
    pub group_icon: &'static str,

    /// Draw inert rows with the group icon instead of the leaf icon
    pub inert_as_group: bool,

    /// Mark the `li` of an expanded group with `open`
    pub open_class: bool,

    /// `aria-expanded` value for rows that cannot expand
    pub static_aria_expanded: &'static str,
}

/// Render `tree` as a nested `ul` with the given style.
pub fn render_tree(tree: &TopicTree, state: &ViewState, style: &TreeStyle) -> Rendered {
    let mut dispatch = DispatchTable::new(tree.len());
    let list = build_list(tree, state, style, tree.roots(), &mut dispatch);

    Rendered {
        nodes: vec![list.into()],
        dispatch,
    }
}

fn build_list(
    tree: &TopicTree,
    state: &ViewState,
    style: &TreeStyle,
    ids: &[NodeId],
    dispatch: &mut DispatchTable,
) -> Element {
    let items: Vec<Element> = ids
        .iter()
        .map(|&id| build_item(tree, state, style, id, dispatch))
        .collect();

    Element::new("ul").children(items)
}

fn build_item(
    tree: &TopicTree,
    state: &ViewState,
    style: &TreeStyle,
    id: NodeId,
    dispatch: &mut DispatchTable,
) -> Element {
    let node = tree.node(id);
    let group = node.is_group();
    let expanded = group && state.is_expanded(id);

    let action = row_action(node);
    dispatch.set(id, action.clone());

    let caret = Element::new("i")
        .class(CARET_CLASS)
        .class_if(expanded, "rotate");
    let caret = if group {
        caret
    } else {
        caret.attr("style", "visibility:hidden")
    };

    let icon = match node.kind {
        NodeKind::Group => style.group_icon,
        NodeKind::Inert if style.inert_as_group => style.group_icon,
        _ => LEAF_ICON,
    };

    let aria_expanded = if group {
        if expanded {
            "true"
        } else {
            "false"
        }
    } else {
        style.static_aria_expanded
    };

    let mut link = Element::new("a")
        .class("tree-item")
        .class_if(state.is_active(node), "active")
        .attr("href", "#")
        .attr("role", "button")
        .attr("aria-expanded", aria_expanded)
        .attr("data-url", node.url())
        .attr("data-node", id.to_string());
    if let Some(name) = action.as_attr() {
        link = link.attr("data-action", name);
    }

    let link = link
        .child(caret)
        .child(Element::new("i").class(icon))
        .child(Element::new("span").class("label").text(node.title.as_str()));

    let li = Element::new("li")
        .class_if(style.open_class && expanded, "open")
        .child(link);

    if !group {
        return li;
    }

    let display = if expanded {
        "display:block"
    } else {
        "display:none"
    };
    let sub = build_list(tree, state, style, &node.children, dispatch).attr("style", display);

    li.child(sub)
}

fn row_action(node: &TreeNode) -> RowAction {
    match node.kind {
        NodeKind::Group => RowAction::Toggle,
        NodeKind::Leaf => node
            .target()
            .map(|t| RowAction::Navigate(t.to_string()))
            .unwrap_or(RowAction::Inert),
        NodeKind::Inert => RowAction::Inert,
    }
}
