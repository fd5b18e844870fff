//! Reading time estimation

use lazy_static::lazy_static;
use regex::Regex;

/// Average reading speed
pub const WORDS_PER_MINUTE: usize = 200;

lazy_static! {
    static ref FENCED_CODE: Regex = Regex::new(r"(?s)```.*?```").unwrap();
    static ref INLINE_CODE: Regex = Regex::new(r"`[^`]+`").unwrap();
    static ref HEADING: Regex = Regex::new(r"(?m)^#{1,6}\s+").unwrap();
    static ref LINK: Regex = Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap();
    static ref STRONG_STAR: Regex = Regex::new(r"\*\*(.*?)\*\*").unwrap();
    static ref STRONG_UNDERSCORE: Regex = Regex::new(r"__(.*?)__").unwrap();
    static ref EMPHASIS_STAR: Regex = Regex::new(r"\*(.*?)\*").unwrap();
    static ref EMPHASIS_UNDERSCORE: Regex = Regex::new(r"_(.*?)_").unwrap();
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
}

/// Strip markdown syntax, leaving the words a reader would read
pub fn plain_text(markdown: &str) -> String {
    let text = FENCED_CODE.replace_all(markdown, "");
    let text = INLINE_CODE.replace_all(&text, "");
    let text = HEADING.replace_all(&text, "");
    let text = LINK.replace_all(&text, "$1");
    let text = STRONG_STAR.replace_all(&text, "$1");
    let text = STRONG_UNDERSCORE.replace_all(&text, "$1");
    let text = EMPHASIS_STAR.replace_all(&text, "$1");
    let text = EMPHASIS_UNDERSCORE.replace_all(&text, "$1");
    let text = HTML_TAG.replace_all(&text, "");

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Count the words of a markdown body
pub fn word_count(markdown: &str) -> usize {
    plain_text(markdown).split_whitespace().count()
}

/// Estimated reading time in whole minutes, never less than one
pub fn reading_time(markdown: &str) -> usize {
    word_count(markdown).div_ceil(WORDS_PER_MINUTE).max(1)
}

/// Format a reading time like "5 min read"
pub fn format_reading_time(minutes: usize) -> String {
    format!("{} min read", minutes)
}
