//! Errors raised while reading content files

use std::path::PathBuf;
use thiserror::Error;

/// A failure tied to a single content file
#[derive(Debug, Error)]
pub enum ContentError {
    /// The file could not be read
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The front-matter block is not valid YAML or does not fit the post shape
    #[error("malformed front-matter in '{slug}': {source}")]
    MalformedFrontMatter {
        slug: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// The front-matter block parsed, but is not a key/value mapping
    #[error("front-matter in '{slug}' is not a mapping")]
    NotAMapping { slug: String },
}

impl ContentError {
    /// Slug of the file this error belongs to
    pub fn slug(&self) -> String {
        match self {
            ContentError::Io { path, .. } => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            ContentError::MalformedFrontMatter { slug, .. } | ContentError::NotAMapping { slug } => {
                slug.clone()
            }
        }
    }
}
