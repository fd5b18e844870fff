//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::Blog;

/// List site content by type
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    let loaded = blog.loader().load_all();
    let posts = &loaded.posts;

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}] {} min",
                    post.date().format("%Y-%m-%d"),
                    post.title(),
                    post.slug,
                    post.reading_time()
                );
            }
        }
        "tag" | "tags" => {
            let tags = count(posts.iter().flat_map(|p| p.front_matter.tags.iter()));
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "category" | "categories" => {
            let categories = count(posts.iter().map(|p| &p.front_matter.category));
            println!("Categories ({}):", categories.len());
            for (cat, count) in categories {
                println!("  {} ({})", cat, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, category",
                content_type
            );
        }
    }

    if !loaded.failures.is_empty() {
        eprintln!("\n{} file(s) could not be loaded:", loaded.failures.len());
        for failure in &loaded.failures {
            eprintln!("  {}", failure);
        }
    }

    Ok(())
}

/// Occurrences per name, most used first, then by name
fn count<'a>(names: impl Iterator<Item = &'a String>) -> Vec<(&'a str, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in names {
        *counts.entry(name.as_str()).or_insert(0) += 1;
    }
    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    counts
}
