//! Generator module - renders the index page, post pages and feed

use anyhow::Result;
use std::collections::HashMap;
use std::fs;

use tera::Context;

use crate::content::Post;
use crate::helpers::url::{full_url_for, url_for};
use crate::render;
use crate::templates::{AuthorData, CategoryData, PostData, TemplateRenderer};
use crate::Pressroom;

/// Static site generator using the embedded masthead theme
pub struct Generator {
    app: Pressroom,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(app: &Pressroom) -> Result<Self> {
        Ok(Self {
            app: app.clone(),
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, posts: &[Post]) -> Result<()> {
        fs::create_dir_all(&self.app.public_dir)?;

        let post_data: Vec<PostData> = posts.iter().map(|p| self.build_post_data(p)).collect();
        let categories = build_categories(posts);

        self.generate_index(&post_data, &categories)?;
        self.generate_post_pages(&post_data)?;
        self.generate_atom_feed(posts)?;

        Ok(())
    }

    /// Transform the CMS body and shape a post for the templates
    ///
    /// The post's permalink doubles as the share URL threaded through the
    /// content transform.
    fn build_post_data(&self, post: &Post) -> PostData {
        let content = render::transform(&post.content, &post.permalink).to_html();

        PostData {
            title: post.title.clone(),
            date: post.date.to_rfc3339(),
            path: url_for(&self.app.config, &post.path),
            permalink: post.permalink.clone(),
            excerpt: post.excerpt.clone(),
            content,
            author: AuthorData {
                name: post.author.name.clone(),
                title: post.author.title.clone(),
                avatar: post.author.avatar.clone(),
            },
            categories: post.categories.iter().map(|c| c.name.clone()).collect(),
            featured_image: post.featured_image.clone(),
        }
    }

    /// Create a base context with common variables
    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("config", &self.app.config);
        context
    }

    /// Generate the index page: featured post, recent list, archive, sidebar
    fn generate_index(&self, posts: &[PostData], categories: &[CategoryData]) -> Result<()> {
        let recent_end = (1 + self.app.config.recent_posts).min(posts.len());
        let recent: &[PostData] = if posts.len() > 1 {
            &posts[1..recent_end]
        } else {
            &[]
        };
        let archive: &[PostData] = &posts[recent_end..];

        let mut context = self.base_context();
        context.insert("featured", &posts.first());
        context.insert("recent", recent);
        context.insert("archive", archive);
        context.insert("categories", categories);

        let html = self.renderer.render("index.html", &context)?;

        let output_path = self.app.public_dir.join("index.html");
        fs::write(&output_path, html)?;
        tracing::debug!("Generated: {:?}", output_path);

        Ok(())
    }

    /// Generate individual post pages
    fn generate_post_pages(&self, posts: &[PostData]) -> Result<()> {
        for post in posts {
            let mut context = self.base_context();
            context.insert("post", post);

            let html = self.renderer.render("post.html", &context)?;

            // Strip leading slash from path to avoid creating absolute paths
            let clean_path = post.path.trim_start_matches('/');
            let output_path = self.app.public_dir.join(clean_path).join("index.html");
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output_path, html)?;
            tracing::debug!("Generated post: {:?}", output_path);
        }

        tracing::info!("Generated {} post pages", posts.len());
        Ok(())
    }

    /// Generate the Atom feed
    fn generate_atom_feed(&self, posts: &[Post]) -> Result<()> {
        let config = &self.app.config;
        let feed_url = full_url_for(config, "atom.xml");
        let site_url = full_url_for(config, "");

        let mut feed = String::new();
        feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
        feed.push('\n');
        feed.push_str(r#"<feed xmlns="http://www.w3.org/2005/Atom">"#);
        feed.push('\n');
        feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
        feed.push_str(&format!("  <link href=\"{}\" rel=\"self\"/>\n", feed_url));
        feed.push_str(&format!("  <link href=\"{}\"/>\n", site_url));
        feed.push_str(&format!("  <id>{}</id>\n", site_url));
        feed.push_str(&format!(
            "  <author><name>{}</name></author>\n",
            escape_xml(&config.author)
        ));
        if let Some(newest) = posts.first() {
            feed.push_str(&format!("  <updated>{}</updated>\n", newest.date.to_rfc3339()));
        }

        for post in posts.iter().take(20) {
            feed.push_str("  <entry>\n");
            feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&post.title)));
            feed.push_str(&format!("    <link href=\"{}\"/>\n", post.permalink));
            feed.push_str(&format!("    <id>{}</id>\n", post.permalink));
            feed.push_str(&format!(
                "    <published>{}</published>\n",
                post.date.to_rfc3339()
            ));
            feed.push_str(&format!(
                "    <updated>{}</updated>\n",
                post.date.to_rfc3339()
            ));
            feed.push_str(&format!(
                "    <content type=\"html\"><![CDATA[{}]]></content>\n",
                post.excerpt
            ));
            feed.push_str("  </entry>\n");
        }

        feed.push_str("</feed>\n");

        let output_path = self.app.public_dir.join("atom.xml");
        fs::write(&output_path, feed)?;
        tracing::info!("Generated atom.xml");

        Ok(())
    }
}

/// Count posts per category for the sidebar
fn build_categories(posts: &[Post]) -> Vec<CategoryData> {
    let mut counts: HashMap<String, (String, usize)> = HashMap::new();

    for post in posts {
        for category in &post.categories {
            let entry = counts
                .entry(category.name.clone())
                .or_insert_with(|| (category.slug_or_derived(), 0));
            entry.1 += 1;
        }
    }

    let mut categories: Vec<CategoryData> = counts
        .into_iter()
        .map(|(name, (slug, count))| CategoryData { name, slug, count })
        .collect();

    // Busiest categories first, name as tie-break
    categories.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    categories
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
