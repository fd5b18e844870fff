//! Validate post front-matter

use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::content::loader::is_post_file;
use crate::Blog;

/// Validate the given files, or every post file when none are given.
///
/// Returns `true` when every file passed.
pub fn run(blog: &Blog, files: &[PathBuf]) -> Result<bool> {
    let files = if files.is_empty() {
        post_files(&blog.content_dir)
    } else {
        files.to_vec()
    };

    let validator = blog.config.validator();
    let mut failed = 0;

    for file in &files {
        match validator.validate_file(file) {
            Ok(errors) if errors.is_empty() => println!("ok    {}", file.display()),
            Ok(errors) => {
                failed += 1;
                println!("FAIL  {}", file.display());
                for (i, error) in errors.iter().enumerate() {
                    println!("      {}. {}", i + 1, error);
                }
            }
            Err(e) => {
                failed += 1;
                println!("FAIL  {}", file.display());
                println!("      {}", e);
            }
        }
    }

    println!("\n{} checked, {} failed", files.len(), failed);
    Ok(failed == 0)
}

/// All post files in the content directory, drafts included.
///
/// Post entries that cannot be read are kept so validation reports them.
fn post_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if !dir.is_dir() {
        return files;
    }
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) => {
                let path = entry.into_path();
                if path.is_file() && is_post_file(&path) {
                    files.push(path);
                }
            }
            Err(err) => {
                tracing::warn!("Failed to read content entry: {}", err);
                if let Some(path) = err.path().filter(|p| is_post_file(p)) {
                    files.push(path.to_path_buf());
                }
            }
        }
    }
    files
}
