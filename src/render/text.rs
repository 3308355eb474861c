//! Text normalization and flattening

use super::dom::{Dom, NodeId, NodeKind};

/// Replace literal `<br>` markers with newlines
///
/// The CMS encodes intentional line breaks as bare `<br>` markers; they are
/// rewritten before parsing so break positions survive as text.
pub fn normalize_breaks(html: &str) -> String {
    html.replace("<br>", "\n")
}

/// Flatten a node's content into a single string
///
/// Text payloads are concatenated in order; nested elements are kept as
/// literal `<name>`/`</name>` markers around their own flattened content.
/// Used both for share labels and for reducing code blocks whose markup was
/// parsed as HTML back into source text.
pub fn reconstruct_text(dom: &Dom, id: NodeId) -> String {
    let mut out = String::new();
    add_text(dom, dom.children(id), &mut out);
    out
}

fn add_text(dom: &Dom, children: &[NodeId], out: &mut String) {
    for &child in children {
        match &dom.node(child).kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element { name, children, .. } => {
                out.push('<');
                out.push_str(name);
                out.push('>');
                add_text(dom, children, out);
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
        }
    }
}
