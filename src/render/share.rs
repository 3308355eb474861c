//! Share-button widget for pull quotes

use super::tree::{Element, RenderNode};
use crate::helpers::url::encode_query;

const SHARE_ENDPOINT: &str = "https://twitter.com/share";

/// Build the tweet link appended to a shared pull quote
///
/// `share_url` is the page's canonical URL, threaded down from the
/// top-level transform call. No network request happens here; the anchor
/// points at the share endpoint with the quote text prefilled.
pub fn share_button(title: &str, share_url: &str) -> RenderNode {
    let href = format!(
        "{}?url={}&text={}",
        SHARE_ENDPOINT,
        encode_query(share_url),
        encode_query(title)
    );

    RenderNode::Element(
        Element::new("a")
            .attr("class", "share-button")
            .attr("href", &href)
            .attr("target", "_blank")
            .attr("rel", "noopener")
            .text("Tweet"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_button_encodes_parameters() {
        let RenderNode::Element(element) = share_button("A & B", "https://example.com/post/")
        else {
            panic!("expected element");
        };
        assert_eq!(element.name, "a");

        let href = element
            .attrs
            .iter()
            .find(|(name, _)| name == "href")
            .map(|(_, value)| value.as_str())
            .unwrap();
        assert!(href.starts_with("https://twitter.com/share?url="));
        assert!(href.contains("https%3A%2F%2Fexample%2Ecom%2Fpost%2F"));
        assert!(href.contains("text=A%20%26%20B"));
        assert_eq!(element.children, vec![RenderNode::Text("Tweet".into())]);
    }
}
