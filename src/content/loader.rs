//! Content loader - reads the CMS post export from the source directory

use anyhow::Result;
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

use super::Post;
use crate::helpers::url::full_url_for;
use crate::Pressroom;

/// A post export file that could not be loaded
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to read export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid post export: {0}")]
    Json(#[from] serde_json::Error),

    #[error("post export has an empty title")]
    MissingTitle,
}

/// Loads posts from the export directory
pub struct ContentLoader<'a> {
    app: &'a Pressroom,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(app: &'a Pressroom) -> Self {
        Self { app }
    }

    /// Load all posts from the source directory
    ///
    /// Unreadable or invalid files are skipped with a warning; drafts are
    /// dropped unless the config renders them.
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        if !self.app.source_dir.exists() {
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&self.app.source_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_export_file(path) {
                match self.load_post(path) {
                    Ok(post) => {
                        if !post.draft || self.app.config.render_drafts {
                            posts.push(post);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load post {:?}: {}", path, e);
                    }
                }
            }
        }

        // Sort by date descending (newest first)
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(posts)
    }

    /// Load a single post from an export file
    fn load_post(&self, path: &Path) -> Result<Post, ExportError> {
        let content = fs::read_to_string(path)?;
        let mut post: Post = serde_json::from_str(&content)?;

        if post.title.trim().is_empty() {
            return Err(ExportError::MissingTitle);
        }

        if post.slug.is_empty() {
            post.slug = slug::slugify(&post.title);
        }

        post.source = path
            .strip_prefix(&self.app.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        post.path = format!("{}/", post.slug);
        post.permalink = full_url_for(&self.app.config, &post.path);

        Ok(post)
    }
}

/// Check if a file is a post export file
fn is_export_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "json")
        .unwrap_or(false)
}
