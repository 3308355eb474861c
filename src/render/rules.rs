//! Rewrite rules for CMS block markup
//!
//! Each recognized (tag, class) pair maps to one rewrite; everything else
//! takes the default arm and renders as-is. Matching is context-sensitive
//! for the cases that depend on the parent element's class.

use super::dom::{Dom, NodeId, NodeKind};

/// Pull-quote container emitted by the CMS quote block
pub const PULL_QUOTE_CLASS: &str = "wp-block-pullquote";
/// Responsive image wrapper emitted by the image pipeline
pub const IMAGE_WRAPPER_CLASS: &str = "gatsby-image-wrapper";
/// Full-width alignment marker on figure wrappers
pub const ALIGN_FULL_CLASS: &str = "alignfull";
/// Inner container of the CMS group block
pub const GROUP_INNER_CLASS: &str = "wp-block-group__inner-container";
/// Preformatted-text block
pub const PREFORMATTED_CLASS: &str = "wp-block-preformatted";
/// Code block authored with the Prismatic plugin
pub const CODE_BLOCK_CLASS: &str = "wp-block-prismatic-blocks";
/// Class prefix carrying the code block's language token
pub const LANGUAGE_PREFIX: &str = "language-";

/// A recognized rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rewrite {
    /// Quotes render their children plain; under a pull-quote parent a
    /// share button is appended.
    Blockquote { pull_quote: bool },
    /// A full-width image wrapper is dropped in favor of its children to
    /// keep the two wrapping conventions from fighting over layout.
    UnwrapImage,
    /// A group inner container becomes a collapsible section; rules apply
    /// again inside it.
    Collapsible,
    /// Preformatted content is flattened to a single text payload.
    Preformatted,
    /// A code block gets syntax highlighting when a grammar is registered.
    CodeBlock,
}

/// Match a node against the rule table
///
/// Returns `None` for text nodes and for any element outside the
/// recognized set; the caller's default arm renders those untouched.
pub fn classify(dom: &Dom, id: NodeId) -> Option<Rewrite> {
    let NodeKind::Element { name, .. } = &dom.node(id).kind else {
        return None;
    };
    let class = dom.class(id).unwrap_or("");

    match name.as_str() {
        "blockquote" => Some(Rewrite::Blockquote {
            pull_quote: dom.parent_class(id) == Some(PULL_QUOTE_CLASS),
        }),
        "div" if class.contains(IMAGE_WRAPPER_CLASS)
            && dom
                .parent_class(id)
                .is_some_and(|parent| parent.contains(ALIGN_FULL_CLASS)) =>
        {
            Some(Rewrite::UnwrapImage)
        }
        "div" if class == GROUP_INNER_CLASS => Some(Rewrite::Collapsible),
        "pre" if class == PREFORMATTED_CLASS => Some(Rewrite::Preformatted),
        "pre" if class == CODE_BLOCK_CLASS => Some(Rewrite::CodeBlock),
        _ => None,
    }
}
