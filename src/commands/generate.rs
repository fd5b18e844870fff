//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Blog;

/// Generate the static site, skipping posts that fail to load
pub fn run(blog: &Blog) -> Result<()> {
    run_with_options(blog, false)
}

/// Generate; with `strict`, any post that fails to load aborts generation
pub fn run_with_options(blog: &Blog, strict: bool) -> Result<()> {
    let start = std::time::Instant::now();

    let loaded = blog.loader().load_all();
    tracing::info!("Loaded {} posts", loaded.posts.len());

    if !loaded.failures.is_empty() {
        for failure in &loaded.failures {
            tracing::warn!("Skipped {}: {}", failure.slug(), failure);
        }
        if strict {
            anyhow::bail!(
                "{} post(s) failed to load; fix them or run without --strict",
                loaded.failures.len()
            );
        }
    }

    let generator = Generator::new(blog)?;
    generator.generate(&loaded.posts)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}
