//! Built-in blog templates using the Tera template engine
//!
//! Templates are embedded in the binary, so a blog needs no theme directory.

use anyhow::Result;
use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::BlogConfig;
use crate::content::{format_reading_time, Post};

/// Template renderer with the embedded blog theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.autoescape_on(vec![".html"]);
        tera.set_escape_fn(escape_html);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("blog/layout.html")),
            ("index.html", include_str!("blog/index.html")),
            ("post.html", include_str!("blog/post.html")),
            ("about.html", include_str!("blog/about.html")),
            (
                "partials/header.html",
                include_str!("blog/partials/header.html"),
            ),
            ("partials/meta.html", include_str!("blog/partials/meta.html")),
        ])?;

        tera.register_filter("date_format", date_format_filter);
        tera.register_filter("reading_time", reading_time_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Escape text for HTML; unlike Tera's default, `/` is kept so URLs stay readable
fn escape_html(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#x27;"),
            _ => output.push(c),
        }
    }
    output
}

/// Tera filter: format a `YYYY-MM-DD` or RFC 3339 date string
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "YYYY-MM-DD".to_string(),
    };

    let date = NaiveDate::parse_from_str(&s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(&s).ok().map(|d| d.date_naive()));

    // "LL" is the long form, e.g. "October 20, 2025"
    match date {
        Some(date) if format == "LL" => Ok(tera::Value::String(
            date.format("%B %-d, %Y").to_string(),
        )),
        Some(date) => Ok(tera::Value::String(date.format("%Y-%m-%d").to_string())),
        None => Ok(tera::Value::String(s)),
    }
}

/// Tera filter: minutes to "N min read"
fn reading_time_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let minutes = tera::try_get_value!("reading_time", "value", usize, value);
    Ok(tera::Value::String(format_reading_time(minutes)))
}

// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub url: String,
}

impl From<&BlogConfig> for ConfigData {
    fn from(config: &BlogConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            url: config.url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkData {
    pub home: String,
    pub about: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub author: String,
    pub excerpt: String,
    pub category: String,
    pub tags: Vec<String>,
    pub url: String,
    pub reading_time: usize,
    pub comment_count: usize,
    /// Rendered HTML body, only filled for the post's own page
    pub content: String,
}

impl PostData {
    /// Summary of a post for listings; comment counts come from configuration
    pub fn summary(post: &Post, config: &BlogConfig) -> Self {
        let fm = &post.front_matter;
        Self {
            slug: post.slug.clone(),
            title: fm.title.clone(),
            date: fm.date.format("%Y-%m-%d").to_string(),
            author: fm.author.clone(),
            excerpt: fm.excerpt.clone(),
            category: fm.category.clone(),
            tags: fm.tags.clone(),
            url: config.url_for(&format!("/posts/{}/", post.slug)),
            reading_time: post.reading_time(),
            comment_count: config.comment_count(&post.slug),
            content: String::new(),
        }
    }
}
