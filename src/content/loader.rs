//! Content loader - loads posts from the content directory

use serde_yaml::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::frontmatter::{self, Header};
use super::{ContentError, FrontMatter, Post};

/// Post file extensions, in lookup priority order
pub const POST_EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// Result of loading a whole content directory
#[derive(Debug, Default)]
pub struct LoadedPosts {
    /// Published posts, newest first
    pub posts: Vec<Post>,
    /// Files that could not be read or decoded
    pub failures: Vec<ContentError>,
}

/// Loads posts from a single directory of markdown files
pub struct ContentLoader {
    dir: PathBuf,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load every published post.
    ///
    /// A missing directory means there is no content yet and yields an empty
    /// result. A file that fails to load is recorded in `failures` and the
    /// rest of the directory is still loaded.
    pub fn load_all(&self) -> LoadedPosts {
        let mut loaded = LoadedPosts::default();

        if !self.dir.is_dir() {
            tracing::debug!("Content directory {:?} does not exist", self.dir);
            return loaded;
        }

        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!("Failed to read content entry: {}", err);
                    if let Some(path) = err.path().filter(|p| is_post_file(p)) {
                        let path = path.to_path_buf();
                        loaded.failures.push(ContentError::Io {
                            path,
                            source: err.into(),
                        });
                    }
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(slug) = post_slug(path) else {
                continue;
            };

            match load_published(&slug, path) {
                Ok(Some(post)) => loaded.posts.push(post),
                Ok(None) => tracing::debug!("Skipping unpublished post {}", slug),
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {}", path, e);
                    loaded.failures.push(e);
                }
            }
        }

        // Sort by date descending (newest first); sort_by is stable
        loaded.posts.sort_by(|a, b| b.date().cmp(&a.date()));

        loaded
    }

    /// Load every published post, dropping failures after they are logged
    pub fn load_posts(&self) -> Vec<Post> {
        self.load_all().posts
    }

    /// Look up a single post by slug, published or not.
    ///
    /// Extensions are tried in `POST_EXTENSIONS` order. Read and decode
    /// failures are logged and reported as not found.
    pub fn load_one(&self, slug: &str) -> Option<Post> {
        if !is_plain_slug(slug) {
            tracing::debug!("Rejecting slug {:?}", slug);
            return None;
        }

        let path = POST_EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{}.{}", slug, ext)))
            .find(|path| path.is_file())?;

        match read_post(slug, &path) {
            Ok(post) => Some(post),
            Err(e) => {
                tracing::error!("Error reading post {}: {}", slug, e);
                None
            }
        }
    }

    /// All categories used by published posts, sorted
    pub fn all_categories(&self) -> Vec<String> {
        let categories: BTreeSet<String> = self
            .load_posts()
            .into_iter()
            .map(|p| p.front_matter.category)
            .collect();
        categories.into_iter().collect()
    }

    /// All tags used by published posts, sorted
    pub fn all_tags(&self) -> Vec<String> {
        let tags: BTreeSet<String> = self
            .load_posts()
            .into_iter()
            .flat_map(|p| p.front_matter.tags)
            .collect();
        tags.into_iter().collect()
    }
}

/// Read a post file and return its raw header and body
pub fn read_document(slug: &str, path: &Path) -> Result<(Header, String), ContentError> {
    let content = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let (yaml, body) = frontmatter::split(&content);
    let header = frontmatter::parse_header(slug, yaml)?;
    Ok((header, body.to_string()))
}

/// Load a single post file
fn read_post(slug: &str, path: &Path) -> Result<Post, ContentError> {
    let (header, body) = read_document(slug, path)?;
    let fm = FrontMatter::from_header(slug, &header)?;
    Ok(Post::new(slug.to_string(), fm, body, path.to_path_buf()))
}

/// Load a post file, or `None` when it is not marked published
fn load_published(slug: &str, path: &Path) -> Result<Option<Post>, ContentError> {
    let (header, body) = read_document(slug, path)?;
    if header.get("published") != Some(&Value::Bool(true)) {
        return Ok(None);
    }
    let fm = FrontMatter::from_header(slug, &header)?;
    Ok(Some(Post::new(slug.to_string(), fm, body, path.to_path_buf())))
}

/// Check if a path has a post extension
pub fn is_post_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| POST_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

/// Slug for a post file, `None` when the file is not a post
fn post_slug(path: &Path) -> Option<String> {
    if !is_post_file(path) {
        return None;
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

fn is_plain_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && !slug.contains("..")
        && !slug.contains(['/', '\\'])
}
