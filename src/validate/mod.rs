//! Front-matter validation
//!
//! Every field is checked independently and all problems are reported in one
//! pass. An empty error list means the header is valid.

pub mod hook;

use chrono::{Local, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use serde_yaml::Value;
use std::ops::RangeInclusive;
use std::path::Path;

use crate::content::loader::read_document;
use crate::content::{ContentError, Header};

pub use hook::{HookInput, HookOutcome};

/// Categories a post may belong to
pub const DEFAULT_CATEGORIES: [&str; 5] = [
    "Bedrock",
    "Infrastructure",
    "MCP",
    "CI/CD",
    "Best Practices",
];

/// Allowed title length, in characters
pub const TITLE_LENGTH: RangeInclusive<usize> = 5..=100;

/// Allowed excerpt length, in characters
pub const EXCERPT_LENGTH: RangeInclusive<usize> = 50..=200;

/// Maximum number of tags on a post
pub const MAX_TAGS: usize = 5;

lazy_static! {
    static ref DATE_PATTERN: Regex = Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap();
}

/// Checks post headers against the field rules
#[derive(Debug, Clone)]
pub struct Validator {
    categories: Vec<String>,
    today: NaiveDate,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Validator with the default categories, dated today
    pub fn new() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            today: Local::now().date_naive(),
        }
    }

    /// Replace the allowed categories
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Pin the date used for the no-future rule
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Validate a header, returning every rule violation
    pub fn validate(&self, header: &Header) -> Vec<String> {
        let mut errors = Vec::new();

        check_text(header, "title", Some(&TITLE_LENGTH), &mut errors);
        self.check_date(header, &mut errors);
        check_text(header, "author", None, &mut errors);
        check_text(header, "excerpt", Some(&EXCERPT_LENGTH), &mut errors);
        self.check_category(header, &mut errors);
        check_tags(header, &mut errors);
        check_published(header, &mut errors);

        errors
    }

    /// Read a post file and validate its header.
    ///
    /// Unreadable files and unparseable front-matter are errors; rule
    /// violations are the returned list.
    pub fn validate_file(&self, path: &Path) -> Result<Vec<String>, ContentError> {
        let slug = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (header, _) = read_document(&slug, path)?;
        Ok(self.validate(&header))
    }

    fn check_date(&self, header: &Header, errors: &mut Vec<String>) {
        let Some(value) = present(header, "date") else {
            errors.push(missing("date"));
            return;
        };
        let Value::String(date) = value else {
            errors.push(format!(
                r#"Invalid "date": expected string in YYYY-MM-DD format, got {}"#,
                type_name(value)
            ));
            return;
        };

        if !DATE_PATTERN.is_match(date) {
            errors.push(format!(
                r#"Invalid "date": expected YYYY-MM-DD format, got "{}""#,
                date
            ));
            return;
        }

        match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(parsed) if parsed > self.today => errors.push(format!(
                r#"Invalid "date": "{}" is in the future. Use today's date or earlier."#,
                date
            )),
            Ok(_) => {}
            Err(_) => errors.push(format!(r#"Invalid "date": "{}" is not a valid date"#, date)),
        }
    }

    fn check_category(&self, header: &Header, errors: &mut Vec<String>) {
        let options = self.categories.join(", ");
        let Some(value) = present(header, "category") else {
            errors.push(format!(
                r#"Missing required field: "category". Valid options: {}"#,
                options
            ));
            return;
        };
        match value {
            Value::String(category) if self.categories.contains(category) => {}
            Value::String(category) => errors.push(format!(
                r#"Invalid "category": "{}". Valid options: {}"#,
                category, options
            )),
            other => errors.push(format!(
                r#"Invalid "category": expected string, got {}"#,
                type_name(other)
            )),
        }
    }
}

/// Validate a header with the default categories against today's date
pub fn validate(header: &Header) -> Vec<String> {
    Validator::new().validate(header)
}

fn check_text(
    header: &Header,
    field: &str,
    length: Option<&RangeInclusive<usize>>,
    errors: &mut Vec<String>,
) {
    let Some(value) = present(header, field) else {
        errors.push(missing(field));
        return;
    };
    let Value::String(text) = value else {
        errors.push(format!(
            r#"Invalid "{}": expected string, got {}"#,
            field,
            type_name(value)
        ));
        return;
    };
    if text.trim().is_empty() {
        errors.push(format!(r#"Invalid "{}": cannot be empty"#, field));
        return;
    }

    let Some(range) = length else {
        return;
    };
    let len = text.chars().count();
    if len < *range.start() {
        errors.push(format!(
            r#"Invalid "{}": too short ({} chars). Minimum {} characters."#,
            field,
            len,
            range.start()
        ));
    } else if len > *range.end() {
        errors.push(format!(
            r#"Invalid "{}": too long ({} chars). Maximum {} characters."#,
            field,
            len,
            range.end()
        ));
    }
}

fn check_tags(header: &Header, errors: &mut Vec<String>) {
    let Some(value) = present(header, "tags") else {
        errors.push(r#"Missing required field: "tags" (can be an empty list [])"#.to_string());
        return;
    };
    let Value::Sequence(tags) = value else {
        errors.push(format!(
            r#"Invalid "tags": expected list, got {}"#,
            type_name(value)
        ));
        return;
    };

    if tags.len() > MAX_TAGS {
        errors.push(format!(
            r#"Invalid "tags": too many tags ({}). Maximum {} tags."#,
            tags.len(),
            MAX_TAGS
        ));
    }
    for (index, tag) in tags.iter().enumerate() {
        match tag {
            Value::String(tag) if tag.trim().is_empty() => {
                errors.push(format!(r#"Invalid "tags[{}]": tag cannot be empty"#, index))
            }
            Value::String(_) => {}
            other => errors.push(format!(
                r#"Invalid "tags[{}]": expected string, got {}"#,
                index,
                type_name(other)
            )),
        }
    }
}

fn check_published(header: &Header, errors: &mut Vec<String>) {
    match header.get("published") {
        None | Some(Value::Bool(_)) => {}
        Some(other) => errors.push(format!(
            r#"Invalid "published": expected boolean (true/false), got {} ({})"#,
            type_name(other),
            display_value(other)
        )),
    }
}

/// A field's value, treating null, false, zero and "" as absent
fn present<'a>(header: &'a Header, field: &str) -> Option<&'a Value> {
    header.get(field).filter(|value| !is_blank(value))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn missing(field: &str) -> String {
    format!(r#"Missing required field: "{}""#, field)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => type_name(other).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXCERPT_52: &str = "A walk through setting up the blog pipeline locally.";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 14).unwrap()
    }

    fn validator() -> Validator {
        Validator::new().with_today(today())
    }

    fn header(yaml: &str) -> Header {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn valid_yaml() -> String {
        format!(
            "title: Getting Started\ndate: \"2025-10-20\"\nauthor: A\nexcerpt: \"{}\"\ncategory: Bedrock\ntags: [a, b]\npublished: true\n",
            EXCERPT_52
        )
    }

    fn with_field(field: &str, value: &str) -> Header {
        let mut h = header(&valid_yaml());
        let value: Value = serde_yaml::from_str(value).unwrap();
        h.insert(Value::String(field.to_string()), value);
        h
    }

    fn without_field(field: &str) -> Header {
        let mut h = header(&valid_yaml());
        h.remove(field);
        h
    }

    #[test]
    fn test_valid_header_passes() {
        assert_eq!(EXCERPT_52.chars().count(), 52);
        assert!(validator().validate(&header(&valid_yaml())).is_empty());
    }

    #[test]
    fn test_published_is_optional() {
        assert!(validator().validate(&without_field("published")).is_empty());
    }

    #[test]
    fn test_missing_title_reported_independently() {
        let errors = validator().validate(&without_field("title"));
        assert_eq!(errors, vec![r#"Missing required field: "title""#]);

        // Other broken fields do not hide the title error
        let mut h = with_field("tags", "3");
        h.remove("title");
        h.remove("author");
        let errors = validator().validate(&h);
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.contains("title")));
    }

    #[test]
    fn test_empty_header_reports_every_required_field() {
        let errors = validator().validate(&Header::new());
        assert_eq!(errors.len(), 6);
        for field in ["title", "date", "author", "excerpt", "category", "tags"] {
            assert!(errors.iter().any(|e| e.contains(field)), "no error for {}", field);
        }
    }

    #[test]
    fn test_short_excerpt() {
        let thirty = format!("\"{}\"", "e".repeat(30));
        let errors = validator().validate(&with_field("excerpt", &thirty));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("excerpt"));
        assert!(errors[0].contains("too short"));
        assert!(errors[0].contains("(30 chars)"));
    }

    #[test]
    fn test_long_excerpt() {
        let long = format!("\"{}\"", "x".repeat(201));
        let errors = validator().validate(&with_field("excerpt", &long));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("too long"));
    }

    #[test]
    fn test_title_rules() {
        let errors = validator().validate(&with_field("title", "\"Hey\""));
        assert!(errors[0].contains("too short"));

        let errors = validator().validate(&with_field("title", "\"   \""));
        assert_eq!(errors, vec![r#"Invalid "title": cannot be empty"#]);

        let errors = validator().validate(&with_field("title", "42"));
        assert_eq!(errors, vec![r#"Invalid "title": expected string, got number"#]);

        let errors = validator().validate(&with_field("title", "\"\""));
        assert_eq!(errors, vec![r#"Missing required field: "title""#]);

        let long = format!("\"{}\"", "t".repeat(101));
        let errors = validator().validate(&with_field("title", &long));
        assert!(errors[0].contains("too long"));
    }

    #[test]
    fn test_length_counts_characters() {
        // Five characters, more than five bytes
        assert!(validator()
            .validate(&with_field("title", "\"héllo\""))
            .is_empty());
    }

    #[test]
    fn test_date_rules() {
        let errors = validator().validate(&with_field("date", "\"20/10/2025\""));
        assert_eq!(
            errors,
            vec![r#"Invalid "date": expected YYYY-MM-DD format, got "20/10/2025""#]
        );

        let errors = validator().validate(&with_field("date", "\"2025-02-30\""));
        assert_eq!(errors, vec![r#"Invalid "date": "2025-02-30" is not a valid date"#]);

        let errors = validator().validate(&with_field("date", "\"2025-11-15\""));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("in the future"));

        assert!(validator()
            .validate(&with_field("date", "\"2025-11-14\""))
            .is_empty());

        let errors = validator().validate(&with_field("date", "20251020"));
        assert!(errors[0].contains("expected string"));
    }

    #[test]
    fn test_unquoted_yaml_date_is_text() {
        let h = header(&valid_yaml().replace("\"2025-10-20\"", "2025-10-20"));
        assert!(validator().validate(&h).is_empty());
    }

    #[test]
    fn test_category_rules() {
        let errors = validator().validate(&with_field("category", "Cooking"));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains(r#""Cooking""#));
        assert!(errors[0].contains("Best Practices"));

        let errors = validator().validate(&without_field("category"));
        assert!(errors[0].starts_with(r#"Missing required field: "category""#));

        let errors = validator().validate(&with_field("category", "3"));
        assert_eq!(
            errors,
            vec![r#"Invalid "category": expected string, got number"#]
        );

        let custom = validator().with_categories(["Cooking"]);
        assert!(custom.validate(&with_field("category", "Cooking")).is_empty());
    }

    #[test]
    fn test_tag_rules() {
        assert!(validator().validate(&with_field("tags", "[]")).is_empty());

        let errors = validator().validate(&with_field("tags", "[a, b, c, d, e, f]"));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("too many tags (6)"));

        let errors = validator().validate(&with_field("tags", "[ok, \" \", 7]"));
        assert_eq!(
            errors,
            vec![
                r#"Invalid "tags[1]": tag cannot be empty"#,
                r#"Invalid "tags[2]": expected string, got number"#,
            ]
        );

        let errors = validator().validate(&with_field("tags", "rust"));
        assert_eq!(errors, vec![r#"Invalid "tags": expected list, got string"#]);
    }

    #[test]
    fn test_published_must_be_boolean() {
        let errors = validator().validate(&with_field("published", "\"yes\""));
        assert_eq!(
            errors,
            vec![r#"Invalid "published": expected boolean (true/false), got string (yes)"#]
        );

        let errors = validator().validate(&with_field("published", "~"));
        assert_eq!(errors.len(), 1);

        assert!(validator()
            .validate(&with_field("published", "false"))
            .is_empty());
    }

    #[test]
    fn test_deterministic() {
        let h = with_field("excerpt", "short");
        assert_eq!(validator().validate(&h), validator().validate(&h));
    }

    #[test]
    fn test_validate_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("post.md");
        std::fs::write(&path, format!("---\n{}---\nBody\n", valid_yaml())).unwrap();
        assert!(validator().validate_file(&path).unwrap().is_empty());

        std::fs::write(&path, "---\ntitle: [broken\n---\n").unwrap();
        assert!(validator().validate_file(&path).is_err());

        assert!(matches!(
            validator().validate_file(&tmp.path().join("missing.md")),
            Err(ContentError::Io { .. })
        ));
    }
}
