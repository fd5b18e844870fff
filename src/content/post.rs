//! Post model

use chrono::NaiveDate;
use std::path::PathBuf;

use super::reading_time::reading_time;
use super::FrontMatter;

/// A blog post loaded from the content directory
#[derive(Debug, Clone)]
pub struct Post {
    /// Slug (file name without extension)
    pub slug: String,

    /// Decoded front-matter
    pub front_matter: FrontMatter,

    /// Raw markdown body
    pub body: String,

    /// Full source file path
    pub source: PathBuf,
}

impl Post {
    pub fn new(slug: String, front_matter: FrontMatter, body: String, source: PathBuf) -> Self {
        Self {
            slug,
            front_matter,
            body,
            source,
        }
    }

    pub fn title(&self) -> &str {
        &self.front_matter.title
    }

    pub fn date(&self) -> NaiveDate {
        self.front_matter.date
    }

    /// Estimated reading time in minutes
    pub fn reading_time(&self) -> usize {
        reading_time(&self.body)
    }
}
