//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::validate::{Validator, DEFAULT_CATEGORIES};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,

    // URL
    pub url: String,
    /// Prefix for every generated link, e.g. when served behind a proxy path
    pub base_path: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Writing
    /// Categories the validator accepts
    pub categories: Vec<String>,
    pub highlight_theme: String,

    /// Markdown shown on the about page
    pub about: String,

    /// Comments shown under each post, keyed by slug
    pub comments: HashMap<String, Vec<Comment>>,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

/// A reader comment on a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub date: String,
    pub message: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),

            url: "http://localhost:4000".to_string(),
            base_path: String::new(),

            content_dir: "content/posts".to_string(),
            public_dir: "public".to_string(),

            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            highlight_theme: crate::content::DEFAULT_HIGHLIGHT_THEME.to_string(),

            about: String::new(),
            comments: HashMap::new(),
            extra: HashMap::new(),
        }
    }
}

impl BlogConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: BlogConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(config)
    }

    /// Validator accepting this site's categories
    pub fn validator(&self) -> Validator {
        Validator::new().with_categories(self.categories.iter().cloned())
    }

    /// Comments for a post, empty when it has none
    pub fn comments_for(&self, slug: &str) -> &[Comment] {
        self.comments.get(slug).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn comment_count(&self, slug: &str) -> usize {
        self.comments_for(slug).len()
    }

    /// Prefix an internal path with the base path
    pub fn url_for(&self, path: &str) -> String {
        let base = self.base_path.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BlogConfig::default();
        assert_eq!(config.content_dir, "content/posts");
        assert_eq!(config.categories.len(), 5);
        assert_eq!(config.comment_count("anything"), 0);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Cloud Notes
base_path: /proxy/3000
categories: [Bedrock, Rust]
comments:
  getting-started:
    - author: Alex Thompson
      date: 2025-10-23T10:30:00Z
      message: Great introduction!
    - author: Maria Garcia
      date: 2025-10-24T14:15:00Z
      message: Very helpful guide.
"#;
        let config: BlogConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Cloud Notes");
        assert_eq!(config.public_dir, "public");
        assert_eq!(config.comment_count("getting-started"), 2);
        assert_eq!(config.comments_for("getting-started")[1].author, "Maria Garcia");
        assert_eq!(config.validator().categories(), ["Bedrock", "Rust"]);
    }

    #[test]
    fn test_url_for() {
        let mut config = BlogConfig::default();
        assert_eq!(config.url_for("/posts/hello/"), "/posts/hello/");

        config.base_path = "/proxy/3000/".to_string();
        assert_eq!(config.url_for("/posts/hello/"), "/proxy/3000/posts/hello/");
        assert_eq!(config.url_for("about/"), "/proxy/3000/about/");
    }
}
