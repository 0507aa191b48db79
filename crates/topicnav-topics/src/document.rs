//! Topic document parsing.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::topic::TopicNode;

/// Well-known location of the topic document, relative to the site root.
pub const TOPICS_FILE: &str = "topics.json";

/// The accepted top-level shapes of `topics.json`.
///
/// Variant order matters: serde tries `Wrapped` first, so an object with a
/// `topics` key always resolves through it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TopicDocument {
    /// `{ "topics": [...] }`
    Wrapped { topics: Vec<TopicNode> },

    /// `[...]`
    Bare(Vec<TopicNode>),
}

impl TopicDocument {
    /// Collapse either shape into the canonical sequence.
    pub fn into_topics(self) -> Vec<TopicNode> {
        match self {
            Self::Wrapped { topics } => topics,
            Self::Bare(topics) => topics,
        }
    }
}

/// Errors that can occur when loading the topic document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid JSON at line {line}, column {column}: {message}")]
    Json {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Topic document must be an array or an object with a \"topics\" array")]
    Shape,
}

/// Parse a topic document from JSON text.
pub fn parse_topics(source: &str) -> Result<Vec<TopicNode>, LoadError> {
    // Parse to a value first so syntax errors keep their position and shape
    // errors can be told apart from them.
    let value: serde_json::Value = serde_json::from_str(source).map_err(|e| LoadError::Json {
        line: e.line(),
        column: e.column(),
        message: e.to_string(),
    })?;

    let doc: TopicDocument = serde_json::from_value(value).map_err(|_| LoadError::Shape)?;

    Ok(doc.into_topics())
}

/// Read and parse a topic document from disk.
pub fn load_topics(path: &Path) -> Result<Vec<TopicNode>, LoadError> {
    let source = fs::read_to_string(path).map_err(|e| LoadError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    parse_topics(&source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topic::NodeKind;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn parses_bare_array() {
        let topics = parse_topics(r#"[{"title": "A", "page": "a.html"}]"#).unwrap();

        assert_eq!(topics, vec![TopicNode::leaf("A", "a.html")]);
    }

    #[test]
    fn parses_wrapped_object() {
        let topics = parse_topics(
            r#"{
  "topics": [
    { "title": "Guide", "children": [ { "title": "Setup", "page": "setup.html" } ] }
  ]
}"#,
        )
        .unwrap();

        assert_eq!(
            topics,
            vec![TopicNode::group(
                "Guide",
                vec![TopicNode::leaf("Setup", "setup.html")]
            )]
        );
    }

    #[test]
    fn null_children_read_as_absent() {
        let topics = parse_topics(
            r#"{"topics": [
  {"title": "A", "page": "a.html", "children": null},
  {"title": "B", "page": "b.html"}
]}"#,
        )
        .unwrap();

        assert_eq!(
            topics,
            vec![TopicNode::leaf("A", "a.html"), TopicNode::leaf("B", "b.html")]
        );
        assert_eq!(topics[0].kind(), NodeKind::Leaf);
    }

    #[test]
    fn wrapped_form_ignores_extra_keys() {
        let topics = parse_topics(r#"{"version": 2, "topics": []}"#).unwrap();
        assert!(topics.is_empty());
    }

    #[test]
    fn rejects_object_without_topics() {
        let result = parse_topics(r#"{"pages": []}"#);
        assert!(matches!(result, Err(LoadError::Shape)));
    }

    #[test]
    fn rejects_node_without_title() {
        let result = parse_topics(r#"[{"page": "a.html"}]"#);
        assert!(matches!(result, Err(LoadError::Shape)));
    }

    #[test]
    fn reports_syntax_error_position() {
        let result = parse_topics("[\n  {\"title\": }\n]");

        match result {
            Err(LoadError::Json { line, .. }) => assert_eq!(line, 2),
            other => panic!("Expected JSON error, got {:?}", other),
        }
    }

    #[test]
    fn loads_from_disk() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(TOPICS_FILE);
        fs::write(&path, r#"{"topics": [{"title": "A", "page": "a.html"}]}"#).unwrap();

        let topics = load_topics(&path).unwrap();

        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].title, "A");
    }

    #[test]
    fn missing_file_is_read_error() {
        let temp = tempdir().unwrap();
        let result = load_topics(&temp.path().join("nope.json"));
        assert!(matches!(result, Err(LoadError::Read { .. })));
    }
}
