//! Parsed HTML document as an owned, arena-backed tree
//!
//! The parser's borrowed nodes are converted into a flat node store indexed
//! by `NodeId`. Each node carries a non-owning parent id so rules can match
//! on context (ownership stays strictly top-down, no cycles).

use crate::helpers::html::unescape;

/// Index of a node in the arena
pub type NodeId = usize;

/// A single parsed node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Text content, entities decoded
    Text(String),
    /// An element with its attributes and child ids in document order
    Element {
        name: String,
        attrs: Vec<(String, String)>,
        children: Vec<NodeId>,
    },
}

#[derive(Debug, Clone)]
pub struct DomNode {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
}

/// An owned document tree
#[derive(Debug, Default)]
pub struct Dom {
    nodes: Vec<DomNode>,
    roots: Vec<NodeId>,
}

impl Dom {
    /// Parse an HTML fragment into an owned tree
    ///
    /// Comments and doctypes are discarded. An unparseable input yields an
    /// empty tree rather than an error.
    pub fn parse(html: &str) -> Dom {
        let mut dom = Dom::default();

        let Ok(parsed) = tl::parse(html, tl::ParserOptions::default()) else {
            return dom;
        };

        let parser = parsed.parser();
        for handle in parsed.children() {
            if let Some(id) = dom.convert(*handle, parser, None) {
                dom.roots.push(id);
            }
        }

        dom
    }

    /// Top-level node ids in document order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> &DomNode {
        &self.nodes[id]
    }

    /// Child ids of a node (empty for text nodes)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.nodes[id].kind {
            NodeKind::Element { children, .. } => children,
            NodeKind::Text(_) => &[],
        }
    }

    /// Value of an attribute on an element node
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[id].kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    /// The `class` attribute of an element node
    pub fn class(&self, id: NodeId) -> Option<&str> {
        self.attr(id, "class")
    }

    /// The `class` attribute of a node's parent, if it has one
    pub fn parent_class(&self, id: NodeId) -> Option<&str> {
        let parent = self.nodes[id].parent?;
        self.class(parent)
    }

    fn push(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(DomNode { kind, parent });
        id
    }

    fn convert(
        &mut self,
        handle: tl::NodeHandle,
        parser: &tl::Parser,
        parent: Option<NodeId>,
    ) -> Option<NodeId> {
        let node = handle.get(parser)?;

        match node {
            tl::Node::Tag(tag) => {
                let name = tag.name().as_utf8_str().to_lowercase();

                let mut attrs = Vec::new();
                for (key, value) in tag.attributes().iter() {
                    let key: &str = key.as_ref();
                    let value = value.map(|v| v.to_string()).unwrap_or_default();
                    attrs.push((key.to_string(), unescape(&value).into_owned()));
                }

                let id = self.push(
                    NodeKind::Element {
                        name,
                        attrs,
                        children: Vec::new(),
                    },
                    parent,
                );

                let child_handles: Vec<tl::NodeHandle> =
                    tag.children().top().iter().copied().collect();
                let mut children = Vec::new();
                for child in child_handles {
                    if let Some(child_id) = self.convert(child, parser, Some(id)) {
                        children.push(child_id);
                    }
                }

                if let NodeKind::Element {
                    children: slot, ..
                } = &mut self.nodes[id].kind
                {
                    *slot = children;
                }

                Some(id)
            }
            tl::Node::Raw(bytes) => {
                let text = unescape(&bytes.as_utf8_str()).into_owned();
                Some(self.push(NodeKind::Text(text), parent))
            }
            tl::Node::Comment(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_and_elements() {
        let dom = Dom::parse("<p>Hello <em>there</em></p>");
        assert_eq!(dom.roots().len(), 1);

        let p = dom.roots()[0];
        let NodeKind::Element { name, children, .. } = &dom.node(p).kind else {
            panic!("expected element");
        };
        assert_eq!(name, "p");
        assert_eq!(children.len(), 2);
        assert_eq!(dom.node(children[0]).kind, NodeKind::Text("Hello ".into()));
    }

    #[test]
    fn test_parent_backreference() {
        let dom = Dom::parse(r#"<figure class="wp-block-pullquote"><blockquote>q</blockquote></figure>"#);
        let figure = dom.roots()[0];
        let blockquote = dom.children(figure)[0];
        assert_eq!(dom.node(blockquote).parent, Some(figure));
        assert_eq!(dom.parent_class(blockquote), Some("wp-block-pullquote"));
        assert_eq!(dom.parent_class(figure), None);
    }

    #[test]
    fn test_attributes_decoded() {
        let dom = Dom::parse(r#"<a href="/?a=1&amp;b=2">x</a>"#);
        let a = dom.roots()[0];
        assert_eq!(dom.attr(a, "href"), Some("/?a=1&b=2"));
        assert_eq!(dom.attr(a, "class"), None);
    }

    #[test]
    fn test_text_entities_decoded() {
        let dom = Dom::parse("<p>a &amp; b</p>");
        let p = dom.roots()[0];
        let text = dom.children(p)[0];
        assert_eq!(dom.node(text).kind, NodeKind::Text("a & b".into()));
    }

    #[test]
    fn test_comments_discarded() {
        let dom = Dom::parse("<p>a</p><!-- note --><p>b</p>");
        assert_eq!(dom.roots().len(), 2);
    }
}
