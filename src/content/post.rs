//! Post model for the CMS export

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post as exported from the headless CMS
///
/// The export carries the authored fields; `slug`, `path`, `permalink` and
/// `source` are filled in by the loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Publication date
    pub date: DateTime<Utc>,

    /// Excerpt HTML from the CMS
    #[serde(default)]
    pub excerpt: String,

    /// Post body HTML from the CMS
    pub content: String,

    /// Whether the post is an unpublished draft
    #[serde(default)]
    pub draft: bool,

    /// Post author
    #[serde(default)]
    pub author: Author,

    /// Post categories
    #[serde(default)]
    pub categories: Vec<Category>,

    /// Featured image URL
    #[serde(default)]
    pub featured_image: Option<String>,

    /// URL-friendly name (derived from the title when the export has none)
    #[serde(default)]
    pub slug: String,

    /// URL path (without root)
    #[serde(default)]
    pub path: String,

    /// Full permalink URL
    #[serde(default)]
    pub permalink: String,

    /// Source file path (relative)
    #[serde(default)]
    pub source: String,
}

/// Post author byline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: String,

    /// Role shown under the name, e.g. "Developer Advocate"
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub avatar: Option<String>,
}

/// A post category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,

    #[serde(default)]
    pub slug: String,
}

impl Category {
    /// Slug as exported, or derived from the name
    pub fn slug_or_derived(&self) -> String {
        if self.slug.is_empty() {
            slug::slugify(&self.name)
        } else {
            self.slug.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_export() {
        let json = r#"{
            "title": "Hello",
            "date": "2024-01-15T10:30:00Z",
            "content": "<p>body</p>"
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.title, "Hello");
        assert!(!post.draft);
        assert!(post.categories.is_empty());
        assert_eq!(post.slug, "");
    }

    #[test]
    fn test_category_slug_fallback() {
        let category = Category {
            name: "Platform Engineering".to_string(),
            slug: String::new(),
        };
        assert_eq!(category.slug_or_derived(), "platform-engineering");
    }
}
