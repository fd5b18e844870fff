//! Show a single post

use anyhow::Result;

use crate::Blog;

/// Print a post's metadata and body
pub fn run(blog: &Blog, slug: &str) -> Result<()> {
    let Some(post) = blog.loader().load_one(slug) else {
        anyhow::bail!("Post not found: {}", slug);
    };
    let fm = &post.front_matter;

    println!("{}", fm.title);
    println!("  slug:      {}", post.slug);
    println!("  date:      {}", fm.date.format("%Y-%m-%d"));
    println!("  author:    {}", fm.author);
    println!("  category:  {}", fm.category);
    println!("  tags:      {}", fm.tags.join(", "));
    println!("  published: {}", fm.published);
    println!("  reading:   {} min", post.reading_time());
    println!("  comments:  {}", blog.config.comment_count(&post.slug));
    if !fm.excerpt.is_empty() {
        println!("\n{}", fm.excerpt);
    }
    println!("\n{}", post.body.trim_end());

    Ok(())
}
