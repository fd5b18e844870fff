//! postkit: a markdown blog toolkit
//!
//! Loads posts from a directory of markdown files with YAML front-matter,
//! validates front-matter before it is committed, and renders the published
//! posts to a small static site.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod server;
pub mod templates;
pub mod validate;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::ContentLoader;

/// A blog rooted at a base directory
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::BlogConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the post files
    pub content_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::BlogConfig::load(&config_path)?
        } else {
            config::BlogConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Blog with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::BlogConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
        }
    }

    /// Loader over this blog's content directory
    pub fn loader(&self) -> ContentLoader {
        ContentLoader::new(&self.content_dir)
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_config_file() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();
        assert_eq!(blog.content_dir, tmp.path().join("content/posts"));
        assert_eq!(blog.public_dir, tmp.path().join("public"));
    }

    #[test]
    fn test_config_file_moves_directories() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("_config.yml"),
            "content_dir: posts\npublic_dir: dist\n",
        )
        .unwrap();
        let blog = Blog::new(tmp.path()).unwrap();
        assert_eq!(blog.content_dir, tmp.path().join("posts"));
        assert_eq!(blog.public_dir, tmp.path().join("dist"));
        assert_eq!(blog.loader().dir(), tmp.path().join("posts"));
    }

    #[test]
    fn test_broken_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("_config.yml"), "title: [oops\n").unwrap();
        assert!(Blog::new(tmp.path()).is_err());
    }
}
