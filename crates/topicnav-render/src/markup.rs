//! Minimal element tree used as the render target.
//!
//! Renderers build [`Element`] values instead of strings so tests can query
//! the structure (classes, attributes, nesting) and so a mount can be cleared
//! and rebuilt as a unit.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

/// A node in the element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Text, escaped on output
    Text(String),
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// An HTML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add one or more space-separated classes.
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    /// Add classes only when `cond` holds.
    pub fn class_if(self, cond: bool, classes: &str) -> Self {
        if cond {
            self.class(classes)
        } else {
            self
        }
    }

    /// Set an attribute, replacing any previous value.
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_string(), value)),
        }
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn tag(&self) -> &str {
        self.tag
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Direct element children.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    /// Concatenated text of this element and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// All descendant elements (including self) matching `pred`, in document order.
    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut out = Vec::new();
        self.walk(pred, &mut out);
        out
    }

    fn walk<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        if pred(self) {
            out.push(self);
        }
        for child in self.child_elements() {
            child.walk(pred, out);
        }
    }

    /// Serialize to HTML.
    pub fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);

        if !self.classes.is_empty() {
            let _ = write!(
                out,
                r#" class="{}""#,
                encode_double_quoted_attribute(&self.classes.join(" "))
            );
        }
        for (name, value) in &self.attrs {
            let _ = write!(out, r#" {}="{}""#, name, encode_double_quoted_attribute(value));
        }
        out.push('>');

        for child in &self.children {
            match child {
                Node::Element(el) => el.write_html(out),
                Node::Text(text) => out.push_str(&encode_text(text)),
            }
        }

        let _ = write!(out, "</{}>", self.tag);
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Element(el) => collect_text(&el.children, out),
            Node::Text(text) => out.push_str(text),
        }
    }
}

/// Serialize a sequence of nodes.
pub fn to_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Element(el) => el.write_html(&mut out),
            Node::Text(text) => out.push_str(&encode_text(text)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_nested_elements() {
        let el = Element::new("li")
            .class("nav-item dropdown")
            .child(Element::new("a").attr("href", "#").text("Guide"));

        assert_eq!(
            el.to_html(),
            r##"<li class="nav-item dropdown"><a href="#">Guide</a></li>"##
        );
    }

    #[test]
    fn escapes_text_and_attributes() {
        let el = Element::new("a")
            .attr("data-url", r#"a"b.html"#)
            .text("<Tips & Tricks>");

        assert_eq!(
            el.to_html(),
            r#"<a data-url="a&quot;b.html">&lt;Tips &amp; Tricks&gt;</a>"#
        );
    }

    #[test]
    fn serializes_node_sequences() {
        let html = to_html(&[
            Node::Text("a < b".to_string()),
            Element::new("br").into(),
        ]);
        assert_eq!(html, "a &lt; b<br></br>");
    }

    #[test]
    fn attr_replaces_existing_value() {
        let el = Element::new("ul")
            .attr("style", "display:none")
            .attr("style", "display:block");

        assert_eq!(el.get_attr("style"), Some("display:block"));
        assert_eq!(el.to_html(), r#"<ul style="display:block"></ul>"#);
    }

    #[test]
    fn finds_matching_descendants() {
        let el = Element::new("ul")
            .child(Element::new("li").class("open"))
            .child(Element::new("li").child(Element::new("ul").child(Element::new("li").class("open"))));

        let open = el.find_all(&|e| e.has_class("open"));
        assert_eq!(open.len(), 2);
    }
}
