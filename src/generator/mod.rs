//! Generator module - renders loaded posts to static HTML files

use anyhow::{Context as _, Result};
use std::fs;
use std::path::Path;
use tera::Context;

use crate::content::{MarkdownRenderer, Post};
use crate::templates::{ConfigData, LinkData, PostData, TemplateRenderer};
use crate::Blog;

/// Static site generator using the embedded templates
pub struct Generator {
    blog: Blog,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Result<Self> {
        Ok(Self {
            blog: blog.clone(),
            renderer: TemplateRenderer::new()?,
            markdown: MarkdownRenderer::with_theme(&blog.config.highlight_theme),
        })
    }

    /// Generate the entire site from date-sorted posts
    pub fn generate(&self, posts: &[Post]) -> Result<()> {
        fs::create_dir_all(&self.blog.public_dir)?;

        let summaries: Vec<PostData> = posts
            .iter()
            .map(|p| PostData::summary(p, &self.blog.config))
            .collect();

        self.generate_index(&summaries)?;
        self.generate_post_pages(posts, &summaries)?;
        self.generate_about(posts)?;

        Ok(())
    }

    fn base_context(&self) -> Context {
        let config = &self.blog.config;
        let mut context = Context::new();
        context.insert("config", &ConfigData::from(config));
        context.insert(
            "links",
            &LinkData {
                home: config.url_for("/"),
                about: config.url_for("/about/"),
            },
        );
        context
    }

    fn generate_index(&self, summaries: &[PostData]) -> Result<()> {
        let mut context = self.base_context();
        context.insert("posts", summaries);

        let html = self.renderer.render("index.html", &context)?;
        write_page(&self.blog.public_dir.join("index.html"), &html)
    }

    fn generate_post_pages(&self, posts: &[Post], summaries: &[PostData]) -> Result<()> {
        for (i, post) in posts.iter().enumerate() {
            let mut data = summaries[i].clone();
            data.content = self
                .markdown
                .render(&post.body)
                .with_context(|| format!("Failed to render post {}", post.slug))?;

            // Posts are newest first, so the previous entry is the newer post
            let prev = i.checked_sub(1).and_then(|j| summaries.get(j));
            let next = summaries.get(i + 1);

            let mut context = self.base_context();
            context.insert("post", &data);
            context.insert("prev", &prev);
            context.insert("next", &next);
            context.insert("comments", self.blog.config.comments_for(&post.slug));

            let html = self.renderer.render("post.html", &context)?;
            let path = self
                .blog
                .public_dir
                .join("posts")
                .join(&post.slug)
                .join("index.html");
            write_page(&path, &html)?;
            tracing::debug!("Generated post {}", post.slug);
        }
        Ok(())
    }

    fn generate_about(&self, posts: &[Post]) -> Result<()> {
        let mut categories: Vec<&str> = posts
            .iter()
            .map(|p| p.front_matter.category.as_str())
            .collect();
        categories.sort_unstable();
        categories.dedup();

        let mut context = self.base_context();
        context.insert("about", &self.markdown.render(&self.blog.config.about)?);
        context.insert("categories", &categories);

        let html = self.renderer.render("about.html", &context)?;
        write_page(&self.blog.public_dir.join("about").join("index.html"), &html)
    }
}

fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html).with_context(|| format!("Failed to write {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BlogConfig, Comment};
    use tempfile::TempDir;

    fn write_post(dir: &Path, slug: &str, title: &str, date: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(
            dir.join(format!("{}.md", slug)),
            format!(
                "---\ntitle: {}\ndate: {}\nauthor: Alex\nexcerpt: Excerpt for {}.\ncategory: MCP\ntags: [rust]\npublished: true\n---\n\n# Heading\n\nSome **bold** words.\n",
                title, date, title
            ),
        )
        .unwrap();
    }

    #[test]
    fn test_generate_site() {
        let tmp = TempDir::new().unwrap();
        let mut config = BlogConfig::default();
        config.title = "Cloud Notes".to_string();
        config.base_path = "/proxy/3000".to_string();
        config.about = "Notes about *building* things.".to_string();
        config.comments.insert(
            "newer".to_string(),
            vec![Comment {
                author: "Maria Garcia".to_string(),
                date: "2025-10-24T14:15:00Z".to_string(),
                message: "Very helpful guide.".to_string(),
            }],
        );
        let blog = Blog::with_config(tmp.path(), config);
        write_post(&blog.content_dir, "older", "Older Post", "2025-01-05");
        write_post(&blog.content_dir, "newer", "Newer Post", "2025-10-20");

        let posts = blog.loader().load_posts();
        Generator::new(&blog).unwrap().generate(&posts).unwrap();

        let index = fs::read_to_string(blog.public_dir.join("index.html")).unwrap();
        assert!(index.contains("Cloud Notes"));
        assert!(index.contains(r#"href="/proxy/3000/posts/newer/""#));
        assert!(index.contains("1 min read"));
        assert!(index.contains("1 comment"));
        assert!(index.find("Newer Post").unwrap() < index.find("Older Post").unwrap());

        let newer =
            fs::read_to_string(blog.public_dir.join("posts/newer/index.html")).unwrap();
        assert!(newer.contains("<strong>bold</strong>"));
        assert!(newer.contains("October 20, 2025"));
        assert!(newer.contains("Maria Garcia"));
        assert!(newer.contains("Older Post"));

        let older =
            fs::read_to_string(blog.public_dir.join("posts/older/index.html")).unwrap();
        assert!(older.contains("No comments yet."));
        assert!(older.contains("0 comments"));

        let about = fs::read_to_string(blog.public_dir.join("about/index.html")).unwrap();
        assert!(about.contains("<em>building</em>"));
        assert!(about.contains("<li>MCP</li>"));
    }

    #[test]
    fn test_generate_escapes_text() {
        let tmp = TempDir::new().unwrap();
        let mut config = BlogConfig::default();
        config.comments.insert(
            "tips".to_string(),
            vec![Comment {
                author: "Eve".to_string(),
                date: "2025-10-24T14:15:00Z".to_string(),
                message: "<script>alert(1)</script>".to_string(),
            }],
        );
        let blog = Blog::with_config(tmp.path(), config);
        fs::create_dir_all(&blog.content_dir).unwrap();
        fs::write(
            blog.content_dir.join("tips.md"),
            "---\ntitle: \"Tips & <Tricks>\"\ndate: 2025-10-20\nauthor: Alex\ncategory: MCP\npublished: true\n---\n\nSome *markdown* here.\n",
        )
        .unwrap();

        let posts = blog.loader().load_posts();
        Generator::new(&blog).unwrap().generate(&posts).unwrap();

        let page = fs::read_to_string(blog.public_dir.join("posts/tips/index.html")).unwrap();
        assert!(page.contains("Tips &amp; &lt;Tricks&gt;"));
        assert!(!page.contains("<Tricks>"));
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!page.contains("<script>"));
        assert!(page.contains("<em>markdown</em>"));

        let index = fs::read_to_string(blog.public_dir.join("index.html")).unwrap();
        assert!(index.contains("Tips &amp; &lt;Tricks&gt;"));
        assert!(index.contains(r#"href="/posts/tips/""#));
    }

    #[test]
    fn test_generate_empty_site() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::with_config(tmp.path(), BlogConfig::default());
        Generator::new(&blog).unwrap().generate(&[]).unwrap();

        let index = fs::read_to_string(blog.public_dir.join("index.html")).unwrap();
        assert!(index.contains("No posts yet."));
    }
}
