//! Build the static site

use anyhow::Result;

use crate::content::ContentLoader;
use crate::generator::Generator;
use crate::Pressroom;

/// Load the export and generate the site
pub fn run(app: &Pressroom) -> Result<()> {
    let start = std::time::Instant::now();

    let loader = ContentLoader::new(app);
    let posts = loader.load_posts()?;
    tracing::info!("Loaded {} posts", posts.len());

    let generator = Generator::new(app)?;
    generator.generate(&posts)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}
