//! Desktop sidebar tree.

use topicnav_topics::TopicTree;

use crate::accordion::{render_tree, TreeStyle};
use crate::state::ViewState;
use crate::traits::{Rendered, TreeRenderer, ViewKind};

const STYLE: TreeStyle = TreeStyle {
    group_icon: "fa-regular fa-folder text-warning",
    inert_as_group: false,
    open_class: true,
    static_aria_expanded: "true",
};

/// Renders the collapsible tree shown beside the content pane.
#[derive(Debug, Clone, Copy, Default)]
pub struct SidebarRenderer;

impl SidebarRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TreeRenderer for SidebarRenderer {
    fn kind(&self) -> ViewKind {
        ViewKind::Sidebar
    }

    fn render(&self, tree: &TopicTree, state: &ViewState) -> Rendered {
        render_tree(tree, state, &STYLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::RowAction;
    use crate::markup::{Element, Node};
    use crate::traits::Mount;
    use pretty_assertions::assert_eq;
    use topicnav_topics::{NodeId, TopicNode};

    fn tree() -> TopicTree {
        TopicTree::from_topics(&[
            TopicNode::group(
                "Guide",
                vec![
                    TopicNode::leaf("Install", "install.html"),
                    TopicNode::group("Empty", vec![]),
                ],
            ),
            TopicNode::leaf("FAQ", "faq.html"),
        ])
    }

    fn root(rendered: &Rendered) -> &Element {
        match &rendered.nodes[0] {
            Node::Element(el) => el,
            other => panic!("Expected element, got {:?}", other),
        }
    }

    fn row<'a>(root: &'a Element, id: usize) -> &'a Element {
        let key = id.to_string();
        root.find_all(&|e| e.get_attr("data-node") == Some(key.as_str()))[0]
    }

    #[test]
    fn renders_rows_for_every_node() {
        let tree = tree();
        let rendered = SidebarRenderer.render(&tree, &ViewState::new(&tree));

        let rows = root(&rendered).find_all(&|e| e.has_class("tree-item"));
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].text_content(), "Guide");
    }

    #[test]
    fn groups_start_collapsed() {
        let tree = tree();
        let rendered = SidebarRenderer.render(&tree, &ViewState::new(&tree));

        let subs = root(&rendered).find_all(&|e| e.get_attr("style") == Some("display:none"));
        assert_eq!(subs.len(), 1);
        assert_eq!(row(root(&rendered), 0).get_attr("aria-expanded"), Some("false"));
    }

    #[test]
    fn expanded_group_shows_children_and_rotates_caret() {
        let tree = tree();
        let mut state = ViewState::new(&tree);
        state.toggle(&tree, NodeId(0));

        let rendered = SidebarRenderer.render(&tree, &state);
        let root = root(&rendered);

        let guide = row(root, 0);
        assert_eq!(guide.get_attr("aria-expanded"), Some("true"));
        assert!(guide.child_elements().next().unwrap().has_class("rotate"));
        assert_eq!(root.find_all(&|e| e.has_class("open")).len(), 1);
        assert_eq!(
            root.find_all(&|e| e.get_attr("style") == Some("display:block")).len(),
            1
        );
    }

    #[test]
    fn builds_dispatch_table() {
        let tree = tree();
        let rendered = SidebarRenderer.render(&tree, &ViewState::new(&tree));

        assert_eq!(rendered.dispatch.lookup(NodeId(0)), &RowAction::Toggle);
        assert_eq!(
            rendered.dispatch.lookup(NodeId(1)),
            &RowAction::Navigate("install.html".to_string())
        );
        assert_eq!(rendered.dispatch.lookup(NodeId(2)), &RowAction::Inert);
        assert_eq!(
            rendered.dispatch.lookup(NodeId(3)),
            &RowAction::Navigate("faq.html".to_string())
        );
    }

    #[test]
    fn inert_row_has_no_action_and_hidden_caret() {
        let tree = tree();
        let rendered = SidebarRenderer.render(&tree, &ViewState::new(&tree));
        let inert = row(root(&rendered), 2);

        assert_eq!(inert.get_attr("data-action"), None);
        let caret = inert.child_elements().next().unwrap();
        assert_eq!(caret.get_attr("style"), Some("visibility:hidden"));
    }

    #[test]
    fn marks_active_rows() {
        let tree = tree();
        let mut state = ViewState::new(&tree);
        state.set_active(Some("faq.html".to_string()));

        let rendered = SidebarRenderer.render(&tree, &state);
        let active = root(&rendered).find_all(&|e| e.has_class("active"));

        assert_eq!(active.len(), 1);
        assert_eq!(active[0].get_attr("data-url"), Some("faq.html"));
    }

    #[test]
    fn render_into_replaces_previous_content() {
        let tree = tree();
        let state = ViewState::new(&tree);
        let mut mount = Mount::new("sideTree");

        SidebarRenderer.render_into(&tree, &state, &mut mount);
        let first = mount.html();
        SidebarRenderer.render_into(&tree, &state, &mut mount);

        assert_eq!(mount.content().len(), 1);
        assert_eq!(mount.html(), first);
    }

    #[test]
    fn leaf_markup() {
        let tree = TopicTree::from_topics(&[TopicNode::leaf("A", "a.html")]);
        let rendered = SidebarRenderer.render(&tree, &ViewState::new(&tree));

        assert_eq!(
            crate::markup::to_html(&rendered.nodes),
            concat!(
                r##"<ul><li><a class="tree-item" href="#" role="button" aria-expanded="true" "##,
                r#"data-url="a.html" data-node="0" data-action="navigate">"#,
                r#"<i class="fa-solid fa-caret-right caret" style="visibility:hidden"></i>"#,
                r#"<i class="fa-regular fa-file-lines text-secondary"></i>"#,
                r#"<span class="label">A</span></a></li></ul>"#
            )
        );
    }
}
