//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,

    // Writing
    pub render_drafts: bool,

    // Index page
    pub recent_posts: usize,
    pub excerpt_length: usize,

    // Date format (Moment.js style, as the CMS themes use)
    pub date_format: String,

    // Sidebar newsletter form
    #[serde(default)]
    pub newsletter: NewsletterConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Pressroom".to_string(),
            description: String::new(),
            author: String::new(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            source_dir: "content".to_string(),
            public_dir: "public".to_string(),

            render_drafts: false,

            recent_posts: 4,
            excerpt_length: 150,

            date_format: "MMMM DD, YYYY".to_string(),

            newsletter: NewsletterConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Newsletter signup form configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsletterConfig {
    pub enable: bool,
    pub action_url: String,
}

impl Default for NewsletterConfig {
    fn default() -> Self {
        Self {
            enable: false,
            action_url: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Pressroom");
        assert_eq!(config.source_dir, "content");
        assert_eq!(config.recent_posts, 4);
        assert!(!config.newsletter.enable);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Engineering Blog
author: The Team
url: https://blog.example.com
recent_posts: 6
newsletter:
  enable: true
  action_url: https://signup.example.com/subscribe
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Engineering Blog");
        assert_eq!(config.url, "https://blog.example.com");
        assert_eq!(config.recent_posts, 6);
        assert!(config.newsletter.enable);
        assert_eq!(
            config.newsletter.action_url,
            "https://signup.example.com/subscribe"
        );
        // Unspecified fields keep defaults
        assert_eq!(config.public_dir, "public");
    }
}
