//! Front-matter check for editor and agent write hooks

use crate::validate::hook::{evaluate, HookOutcome};
use crate::Blog;

/// Evaluate a hook message against this blog's content rules
pub fn run(blog: &Blog, input: &str) -> HookOutcome {
    let outcome = evaluate(input, &blog.config.content_dir, &blog.config.validator());
    tracing::debug!("Hook outcome: {:?}", outcome);
    outcome
}
