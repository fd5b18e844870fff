//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Blog;

/// Create a draft post with a complete front-matter scaffold.
///
/// The file is named after the slugified title unless `slug` is given. The
/// draft stays unpublished until `published: true` is set.
pub fn create_post(blog: &Blog, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();

    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    fs::create_dir_all(&blog.content_dir)?;
    let file_path = blog.content_dir.join(format!("{}.md", slug));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let category = blog
        .config
        .categories
        .first()
        .cloned()
        .unwrap_or_default();

    let header = serde_yaml::Mapping::from_iter([
        ("title".into(), title.into()),
        ("date".into(), today.into()),
        ("author".into(), blog.config.author.clone().into()),
        ("excerpt".into(), "".into()),
        ("category".into(), category.into()),
        ("tags".into(), serde_yaml::Value::Sequence(Vec::new())),
        ("published".into(), false.into()),
    ]);
    let content = format!("---\n{}---\n\n", serde_yaml::to_string(&header)?);

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
