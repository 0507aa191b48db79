//! Print the topic outline.

use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};
use topicnav_topics::{load_topics, NodeId, TopicTree};

use crate::config::load_config;

/// Indented outline with each node's kind and target.
pub fn outline(tree: &TopicTree) -> String {
    let mut out = String::new();
    for &root in tree.roots() {
        write_node(tree, root, &mut out);
    }
    out
}

fn write_node(tree: &TopicTree, id: NodeId, out: &mut String) {
    let node = tree.node(id);
    let indent = "  ".repeat(node.depth);

    let _ = write!(out, "{}{} [{}]", indent, node.title, node.kind.as_str());
    let _ = match node.target() {
        Some(target) => writeln!(out, " -> {}", target),
        None => writeln!(out),
    };

    for &child in tree.children(id) {
        write_node(tree, child, out);
    }
}

/// Run the tree command.
pub fn run(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let path = config.topics_path();
    let topics =
        load_topics(&path).with_context(|| format!("Failed to load {}", path.display()))?;

    let tree = TopicTree::from_topics(&topics);
    print!("{}", outline(&tree));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use topicnav_topics::parse_topics;

    #[test]
    fn prints_kinds_and_targets() {
        let topics = parse_topics(
            r#"[
  { "title": "Intro", "page": "intro.html" },
  { "title": "Guides", "page": "guides.html", "children": [
    { "title": "Setup", "page": "setup.html" },
    { "title": "Soon" }
  ] }
]"#,
        )
        .unwrap();

        let tree = TopicTree::from_topics(&topics);

        assert_eq!(
            outline(&tree),
            "Intro [leaf] -> intro.html\nGuides [group]\n  Setup [leaf] -> setup.html\n  Soon [inert]\n"
        );
    }
}
