//! Topic hierarchy model and loader.
//!
//! This crate parses the `topics.json` document that drives a documentation
//! site's navigation, normalizes its two accepted shapes, and flattens the
//! hierarchy into an arena addressed by stable node ids.

pub mod document;
pub mod topic;
pub mod tree;

pub use document::{load_topics, parse_topics, LoadError, TopicDocument, TOPICS_FILE};
pub use topic::{NodeKind, TopicNode};
pub use tree::{NodeId, TopicTree, TreeNode};
