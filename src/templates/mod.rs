//! Built-in masthead theme templates using the Tera template engine
//!
//! The theme is embedded directly in the binary; sites only supply content
//! and `_config.yml`.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers;

/// Template renderer with the embedded masthead theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all masthead templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Autoescaping is off: the generator hands over already-serialized,
        // already-escaped HTML.
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("masthead/layout.html")),
            ("index.html", include_str!("masthead/index.html")),
            ("post.html", include_str!("masthead/post.html")),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// A post as seen by the templates
#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub title: String,
    /// RFC 3339; formatted by the `date_format` filter
    pub date: String,
    pub path: String,
    pub permalink: String,
    pub excerpt: String,
    /// Transformed body HTML
    pub content: String,
    pub author: AuthorData,
    pub categories: Vec<String>,
    pub featured_image: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorData {
    pub name: String,
    pub title: Option<String>,
    pub avatar: Option<String>,
}

/// Category with post count for the sidebar
#[derive(Debug, Clone, Serialize)]
pub struct CategoryData {
    pub name: String,
    pub slug: String,
    pub count: usize,
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(helpers::strip_html(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };

    Ok(tera::Value::String(helpers::truncate(&s, length, None)))
}

/// Tera filter: format an RFC 3339 date with a Moment.js-style pattern
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "MMMM DD, YYYY".to_string(),
    };

    let date = chrono::DateTime::parse_from_rfc3339(&s)
        .map_err(|e| tera::Error::msg(format!("invalid date {:?}: {}", s, e)))?;

    Ok(tera::Value::String(helpers::format_date(&date, &format)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_post_template() {
        let renderer = TemplateRenderer::new().unwrap();

        let mut context = Context::new();
        context.insert("config", &crate::config::SiteConfig::default());
        context.insert(
            "post",
            &PostData {
                title: "Hello".to_string(),
                date: "2024-01-15T10:30:00Z".to_string(),
                path: "/hello/".to_string(),
                permalink: "http://example.com/hello/".to_string(),
                excerpt: String::new(),
                content: "<p>body</p>".to_string(),
                author: AuthorData {
                    name: "Sam".to_string(),
                    title: Some("Engineer".to_string()),
                    avatar: None,
                },
                categories: vec![],
                featured_image: None,
            },
        );

        let html = renderer.render("post.html", &context).unwrap();
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("<p>body</p>"));
        assert!(html.contains("January 15, 2024"));
        assert!(html.contains("Sam"));
    }

    #[test]
    fn test_filters() {
        let mut args = HashMap::new();
        let stripped = strip_html_filter(&tera::Value::String("<p>Hi <b>there</b></p>".into()), &args)
            .unwrap();
        assert_eq!(stripped, tera::Value::String("Hi there".into()));

        args.insert("length".to_string(), tera::Value::from(5));
        let truncated =
            truncate_chars_filter(&tera::Value::String("Hello World".into()), &args).unwrap();
        assert_eq!(truncated, tera::Value::String("He...".into()));
    }
}
