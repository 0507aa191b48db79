//! Content navigation for topicnav.
//!
//! [`Navigator`] turns a target into fragment markup (or an external open),
//! and [`Session`] is the headless host page it drives: three navigation
//! views, a content pane, a mobile overlay and browser-style history.

pub mod history;
pub mod navigator;
pub mod opener;
pub mod session;
pub mod source;

#[cfg(test)]
pub(crate) mod testing;

pub use history::{decode_fragment, encode_fragment, History, HistoryEntry, PopState};
pub use navigator::{warning_html, Navigator, Resolution, EXTERNAL_MARKER};
pub use opener::{ExternalOpener, LogOpener, RecordingOpener, SystemOpener};
pub use session::{Click, ContentPane, NavOutcome, Session};
pub use source::{ContentSource, FetchError, FsSource, HttpSource};
