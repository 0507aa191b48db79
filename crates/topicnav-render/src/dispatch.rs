//! Declarative row event wiring.

use topicnav_topics::NodeId;

static INERT: RowAction = RowAction::Inert;

/// What clicking a row does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    /// Flip a tree group's expanded state
    Toggle,
    /// Load a content fragment
    Navigate(String),
    /// Open or close a top-level navbar dropdown
    ToggleDropdown,
    /// Open a nested navbar submenu, closing its open siblings
    OpenSubmenu,
    /// No behavior
    Inert,
}

impl RowAction {
    /// Value of the `data-action` attribute, `None` for inert rows.
    pub fn as_attr(&self) -> Option<&'static str> {
        match self {
            Self::Toggle => Some("toggle"),
            Self::Navigate(_) => Some("navigate"),
            Self::ToggleDropdown => Some("dropdown"),
            Self::OpenSubmenu => Some("submenu"),
            Self::Inert => None,
        }
    }
}

/// Row actions for one rendered view, keyed by node id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchTable {
    actions: Vec<RowAction>,
}

impl DispatchTable {
    /// A table with every row inert.
    pub fn new(len: usize) -> Self {
        Self {
            actions: vec![RowAction::Inert; len],
        }
    }

    pub fn set(&mut self, id: NodeId, action: RowAction) {
        if let Some(slot) = self.actions.get_mut(id.index()) {
            *slot = action;
        }
    }

    /// Action for a row. Unknown ids are inert.
    pub fn lookup(&self, id: NodeId) -> &RowAction {
        self.actions.get(id.index()).unwrap_or(&INERT)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &RowAction)> {
        self.actions.iter().enumerate().map(|(i, a)| (NodeId(i), a))
    }

    /// Ids of rows that navigate, with their targets.
    pub fn navigations(&self) -> impl Iterator<Item = (NodeId, &str)> {
        self.iter().filter_map(|(id, action)| match action {
            RowAction::Navigate(target) => Some((id, target.as_str())),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
