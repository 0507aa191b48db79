//! Navigation tree renderers.
//!
//! Three presentations share one topic tree: a desktop sidebar tree, a mobile
//! accordion and a top navbar with nested dropdowns. Each renderer is a pure
//! projection from the tree and its own [`ViewState`] to markup plus a
//! [`DispatchTable`] describing what clicking each row does.

pub mod accordion;
pub mod dispatch;
pub mod markup;
pub mod mobile;
pub mod sidebar;
pub mod state;
pub mod topmenu;
pub mod traits;
pub mod views;

pub use dispatch::{DispatchTable, RowAction};
pub use markup::{to_html, Element, Node};
pub use mobile::MobileRenderer;
pub use sidebar::SidebarRenderer;
pub use state::ViewState;
pub use topmenu::{close_cascade, open_submenu, toggle_dropdown, TopMenuRenderer};
pub use traits::{Mount, Rendered, TreeRenderer, UnknownView, ViewKind};
pub use views::{ClickEffect, NavViews, View};
