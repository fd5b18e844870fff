//! Content module - front-matter, post loading and reading time

mod error;
pub mod frontmatter;
pub mod loader;
mod markdown;
mod post;
pub mod reading_time;

pub use error::ContentError;
pub use frontmatter::{FrontMatter, Header};
pub use loader::{ContentLoader, LoadedPosts, POST_EXTENSIONS};
pub use markdown::{MarkdownRenderer, DEFAULT_HIGHLIGHT_THEME};
pub use post::Post;
pub use reading_time::{format_reading_time, reading_time};
