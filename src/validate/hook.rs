//! Write-hook gate
//!
//! An editor or agent hook sends a JSON description of a file write on stdin.
//! Posts under the content directory are validated; everything else is
//! skipped.

use serde::Deserialize;
use std::fmt::Write as _;
use std::path::Path;

use super::Validator;
use crate::content::loader::is_post_file;
use crate::content::ContentError;

/// Hook message describing a write operation
#[derive(Debug, Default, Deserialize)]
pub struct HookInput {
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub tool_input: ToolInput,
    #[serde(default)]
    pub hook_event_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ToolInput {
    #[serde(default)]
    pub file_path: Option<String>,
}

/// Decision for a single hook invocation
#[derive(Debug, PartialEq)]
pub enum HookOutcome {
    /// The post is valid
    Pass,
    /// The write does not touch a post
    Skip,
    /// The post breaks one or more rules; the write should be rejected
    Fail { file: String, errors: Vec<String> },
    /// The hook could not do its job
    Error(String),
}

impl HookOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            HookOutcome::Pass | HookOutcome::Skip => 0,
            HookOutcome::Error(_) => 1,
            HookOutcome::Fail { .. } => 2,
        }
    }

    /// Text for stderr, if the outcome has anything to say
    pub fn report(&self) -> Option<String> {
        match self {
            HookOutcome::Pass | HookOutcome::Skip => None,
            HookOutcome::Error(message) => Some(format!("Error: {}", message)),
            HookOutcome::Fail { file, errors } => {
                let mut out = String::from("\n❌ Blog post frontmatter validation failed:\n\n");
                let _ = writeln!(out, "File: {}\n", file);
                for (i, error) in errors.iter().enumerate() {
                    let _ = writeln!(out, "{}. {}", i + 1, error);
                }
                out.push_str("\nPlease fix the frontmatter and try again.\n");
                Some(out)
            }
        }
    }
}

/// Decide what to do with a raw hook message
pub fn evaluate(input: &str, content_dir: &str, validator: &Validator) -> HookOutcome {
    let input: HookInput = match serde_json::from_str(input) {
        Ok(input) => input,
        Err(e) => return HookOutcome::Error(format!("invalid hook input: {}", e)),
    };
    tracing::debug!(
        "Hook event {:?} from tool {:?}",
        input.hook_event_name,
        input.tool_name
    );

    let Some(file_path) = input.tool_input.file_path else {
        return HookOutcome::Error("no file_path found in tool_input".to_string());
    };

    if !is_content_path(&file_path, content_dir) {
        tracing::debug!("{} is outside {}, skipping", file_path, content_dir);
        return HookOutcome::Skip;
    }

    let path = Path::new(&file_path);
    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.clone());

    match validator.validate_file(path) {
        Ok(errors) if errors.is_empty() => HookOutcome::Pass,
        Ok(errors) => HookOutcome::Fail { file, errors },
        Err(e @ ContentError::Io { .. }) => HookOutcome::Error(e.to_string()),
        Err(e) => HookOutcome::Fail {
            file,
            errors: vec![format!("Failed to parse frontmatter: {}", e)],
        },
    }
}

/// A post file inside the content directory
pub fn is_content_path(file_path: &str, content_dir: &str) -> bool {
    let normalized = file_path.replace('\\', "/");
    let marker = format!("{}/", content_dir.trim_matches('/'));
    normalized.contains(&marker) && is_post_file(Path::new(&normalized))
}
