//! Front-matter splitting and decoding

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;

use super::ContentError;

/// Undecoded front-matter: the raw YAML key/value block of a post
pub type Header = Mapping;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Typed front-matter of a blog post
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FrontMatter {
    pub title: String,
    pub date: NaiveDate,
    pub author: String,
    #[serde(default)]
    pub excerpt: String,
    pub category: String,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    /// Posts without the flag are drafts
    #[serde(default)]
    pub published: bool,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl FrontMatter {
    /// Decode a raw header into typed fields
    pub fn from_header(slug: &str, header: &Header) -> Result<Self, ContentError> {
        serde_yaml::from_value(Value::Mapping(header.clone())).map_err(|source| {
            ContentError::MalformedFrontMatter {
                slug: slug.to_string(),
                source,
            }
        })
    }
}

/// Split a document into its front-matter block and body.
///
/// The block must open on the first line with `---` and close with a line
/// holding only `---`. Anything else means the document has no front-matter
/// and the whole text is body.
pub fn split(content: &str) -> (Option<&str>, &str) {
    let content = content.trim_start_matches('\u{feff}');

    let Some(rest) = strip_opening_delimiter(content) else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start_matches(['\n', '\r']);

            if !yaml.trim().is_empty() && !parses_as_header(yaml) && !looks_like_yaml(yaml) {
                // A thematic break followed by prose, not a header
                return (None, content);
            }
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    // No closing delimiter
    (None, content)
}

/// Parse a document's front-matter into a raw header.
///
/// A document without a block, or with an empty one, yields an empty header.
pub fn parse_header(slug: &str, yaml: Option<&str>) -> Result<Header, ContentError> {
    let Some(yaml) = yaml.filter(|y| !y.trim().is_empty()) else {
        return Ok(Header::new());
    };

    let value: Value =
        serde_yaml::from_str(yaml).map_err(|source| ContentError::MalformedFrontMatter {
            slug: slug.to_string(),
            source,
        })?;

    match value {
        Value::Mapping(map) => Ok(map),
        // A block holding only comments
        Value::Null => Ok(Header::new()),
        _ => Err(ContentError::NotAMapping {
            slug: slug.to_string(),
        }),
    }
}

fn strip_opening_delimiter(content: &str) -> Option<&str> {
    let rest = content.strip_prefix("---")?.trim_start_matches([' ', '\t']);
    if let Some(rest) = rest.strip_prefix("\r\n") {
        Some(rest)
    } else {
        rest.strip_prefix('\n')
    }
}

/// A YAML mapping keyed by single words, quoted or not
fn parses_as_header(block: &str) -> bool {
    match serde_yaml::from_str::<Value>(block) {
        Ok(Value::Mapping(map)) => map.keys().all(|key| {
            key.as_str()
                .is_some_and(|k| !k.is_empty() && !k.contains(char::is_whitespace))
        }),
        _ => false,
    }
}

/// A header needs at least one `key:` line; prose between two `---` lines has none
fn looks_like_yaml(block: &str) -> bool {
    block.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        let is_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");
        let after = &trimmed[colon_pos + 1..];
        is_key && (after.is_empty() || after.starts_with(' '))
    })
}
