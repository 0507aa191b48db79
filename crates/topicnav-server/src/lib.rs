//! Development server with live reload for topicnav sites.
//!
//! Serves the shell rendered from the current `topics.json`, the page
//! fragments and the runtime assets, and tells connected browsers to reload
//! whenever the site directory changes.

pub mod server;
pub mod watcher;
pub mod websocket;

pub use server::{DevServer, DevServerConfig, ServerError};
pub use watcher::{FileWatcher, WatchEvent};
pub use websocket::{ReloadHub, ReloadMessage};
