//! Render tree handed to the page templates
//!
//! The transformer's output: an ordered sequence of nodes that serializes
//! to HTML. Text and attribute values are escaped on the way out; void
//! elements are written without closing tags.

use std::fmt;

use crate::helpers::html::{escape_attr, escape_text, is_void_element};

#[derive(Debug, Clone, PartialEq)]
pub enum RenderNode {
    Text(String),
    Element(Element),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<RenderNode>,
}

impl Element {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attrs(name: &str, attrs: Vec<(String, String)>) -> Self {
        Self {
            name: name.to_string(),
            attrs,
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    pub fn child(mut self, node: RenderNode) -> Self {
        self.children.push(node);
        self
    }

    pub fn text(self, text: &str) -> Self {
        self.child(RenderNode::Text(text.to_string()))
    }
}

/// The transformed document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderTree {
    pub nodes: Vec<RenderNode>,
}

impl RenderTree {
    /// Serialize the tree to an HTML string
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            write_node(node, &mut out);
        }
        out
    }
}

impl fmt::Display for RenderTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

fn write_node(node: &RenderNode, out: &mut String) {
    match node {
        RenderNode::Text(text) => out.push_str(&escape_text(text)),
        RenderNode::Element(element) => {
            out.push('<');
            out.push_str(&element.name);
            for (name, value) in &element.attrs {
                out.push(' ');
                out.push_str(name);
                if !value.is_empty() {
                    out.push_str("=\"");
                    out.push_str(&escape_attr(value));
                    out.push('"');
                }
            }
            out.push('>');

            if is_void_element(&element.name) {
                return;
            }

            for child in &element.children {
                write_node(child, out);
            }

            out.push_str("</");
            out.push_str(&element.name);
            out.push('>');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_text_escaped() {
        let tree = RenderTree {
            nodes: vec![RenderNode::Text("a < b & c".into())],
        };
        assert_eq!(tree.to_html(), "a &lt; b &amp; c");
    }

    #[test]
    fn test_serialize_element() {
        let element = Element::new("a")
            .attr("href", "/post/")
            .text("Read more");
        let tree = RenderTree {
            nodes: vec![RenderNode::Element(element)],
        };
        assert_eq!(tree.to_html(), r#"<a href="/post/">Read more</a>"#);
    }

    #[test]
    fn test_serialize_void_element() {
        let element = Element::new("img").attr("src", "cover.png");
        let tree = RenderTree {
            nodes: vec![RenderNode::Element(element)],
        };
        assert_eq!(tree.to_html(), r#"<img src="cover.png">"#);
    }

    #[test]
    fn test_serialize_bare_attribute() {
        let element = Element::new("details").attr("open", "");
        let tree = RenderTree {
            nodes: vec![RenderNode::Element(element)],
        };
        assert_eq!(tree.to_html(), "<details open></details>");
    }
}
