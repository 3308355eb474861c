//! List site content

use anyhow::Result;

use crate::content::ContentLoader;
use crate::Pressroom;

/// List site content by type
pub fn run(app: &Pressroom, content_type: &str) -> Result<()> {
    let loader = ContentLoader::new(app);

    match content_type {
        "post" | "posts" => {
            let posts = loader.load_posts()?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}]",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.source
                );
            }
        }
        "category" | "categories" => {
            let posts = loader.load_posts()?;
            let mut categories: std::collections::HashMap<String, usize> =
                std::collections::HashMap::new();
            for post in &posts {
                for category in &post.categories {
                    *categories.entry(category.name.clone()).or_insert(0) += 1;
                }
            }
            println!("Categories ({}):", categories.len());
            let mut categories: Vec<_> = categories.into_iter().collect();
            categories.sort_by(|a, b| b.1.cmp(&a.1));
            for (category, count) in categories {
                println!("  {} ({})", category, count);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, category", content_type);
        }
    }

    Ok(())
}
