//! The three navigation views of a host page.

use topicnav_topics::{NodeId, TopicTree};

use crate::dispatch::{DispatchTable, RowAction};
use crate::mobile::MobileRenderer;
use crate::sidebar::SidebarRenderer;
use crate::state::ViewState;
use crate::topmenu::{self, TopMenuRenderer};
use crate::traits::{Mount, TreeRenderer, ViewKind};

/// What a click on a row did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickEffect {
    /// Nothing; the row is inert or unknown
    Inert,
    /// A tree group was expanded or collapsed
    Toggled { expanded: bool },
    /// A navbar dropdown or submenu changed
    MenuChanged,
    /// The row asks for navigation; the caller runs the navigator
    Navigate(String),
}

/// One rendered view: renderer, its private state, its mount and dispatch.
pub struct View {
    renderer: Box<dyn TreeRenderer>,
    state: ViewState,
    mount: Mount,
    dispatch: DispatchTable,
}

impl View {
    pub fn new(renderer: Box<dyn TreeRenderer>) -> Self {
        let mount = Mount::new(renderer.kind().mount_id());
        Self {
            renderer,
            state: ViewState::default(),
            mount,
            dispatch: DispatchTable::default(),
        }
    }

    pub fn kind(&self) -> ViewKind {
        self.renderer.kind()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    pub fn dispatch(&self) -> &DispatchTable {
        &self.dispatch
    }

    /// Reset state and render from scratch.
    pub fn populate(&mut self, tree: &TopicTree) {
        self.state = ViewState::new(tree);
        self.refresh(tree);
    }

    /// Re-render from the current state.
    pub fn refresh(&mut self, tree: &TopicTree) {
        self.dispatch = self.renderer.render_into(tree, &self.state, &mut self.mount);
    }

    /// Run the dispatch entry for a clicked row.
    pub fn click(&mut self, tree: &TopicTree, id: NodeId) -> ClickEffect {
        let effect = match self.dispatch.lookup(id).clone() {
            RowAction::Inert => return ClickEffect::Inert,
            RowAction::Navigate(target) => return ClickEffect::Navigate(target),
            RowAction::Toggle => match self.state.toggle(tree, id) {
                Some(expanded) => ClickEffect::Toggled { expanded },
                None => return ClickEffect::Inert,
            },
            RowAction::ToggleDropdown => {
                topmenu::toggle_dropdown(tree, &mut self.state, id);
                ClickEffect::MenuChanged
            }
            RowAction::OpenSubmenu => {
                topmenu::open_submenu(tree, &mut self.state, id);
                ClickEffect::MenuChanged
            }
        };

        self.refresh(tree);
        effect
    }

    /// A dropdown was dismissed; close it and its descendants.
    pub fn hide_menu(&mut self, tree: &TopicTree, id: NodeId) {
        topmenu::close_cascade(tree, &mut self.state, id);
        self.refresh(tree);
    }

    /// Replace the active target and re-render.
    pub fn set_active(&mut self, tree: &TopicTree, target: Option<String>) {
        self.state.set_active(target);
        self.refresh(tree);
    }

    /// Rows carrying the active highlight.
    pub fn highlighted(&self, tree: &TopicTree) -> Vec<NodeId> {
        if !self.kind().highlights_active() {
            return Vec::new();
        }
        match self.state.active() {
            Some(target) => tree.find_by_url(target),
            None => Vec::new(),
        }
    }
}

/// Sidebar, mobile accordion and top menu, each with independent state.
pub struct NavViews {
    views: [View; 3],
}

impl NavViews {
    pub fn new() -> Self {
        Self {
            views: [
                View::new(Box::new(SidebarRenderer)),
                View::new(Box::new(MobileRenderer)),
                View::new(Box::new(TopMenuRenderer)),
            ],
        }
    }

    /// Hand the tree to each renderer once, in load order.
    pub fn populate(&mut self, tree: &TopicTree) {
        for view in &mut self.views {
            view.populate(tree);
            tracing::debug!("Rendered {} view ({} nodes)", view.kind(), tree.len());
        }
    }

    pub fn get(&self, kind: ViewKind) -> &View {
        &self.views[Self::slot(kind)]
    }

    pub fn get_mut(&mut self, kind: ViewKind) -> &mut View {
        &mut self.views[Self::slot(kind)]
    }

    pub fn iter(&self) -> impl Iterator<Item = &View> {
        self.views.iter()
    }

    /// Clear the highlight everywhere, then apply it to rows matching `target`.
    pub fn highlight(&mut self, tree: &TopicTree, target: &str) {
        for view in &mut self.views {
            if view.kind().highlights_active() {
                view.set_active(tree, Some(target.to_string()));
            }
        }
    }

    fn slot(kind: ViewKind) -> usize {
        match kind {
            ViewKind::Sidebar => 0,
            ViewKind::Mobile => 1,
            ViewKind::TopMenu => 2,
        }
    }
}

impl Default for NavViews {
    fn default() -> Self {
        Self::new()
    }
}
