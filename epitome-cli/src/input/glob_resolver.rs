//! Input resolution: files, glob patterns and directories

use crate::error::CliError;
use anyhow::{Context, Result};
use glob::{glob_with, MatchOptions};
use std::path::{Path, PathBuf};

const WALK_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: true,
};

/// Files that are never summarized when walking a directory
fn is_skipped(relative: &Path) -> bool {
    let hidden = relative
        .components()
        .any(|c| c.as_os_str().to_string_lossy().starts_with('.'));
    let lock = relative
        .file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with("lock"));
    hidden || lock
}

/// All regular files below `dir`, skipping hidden entries and lock files
fn walk_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = dir.join("**").join("*");
    let pattern = pattern.to_string_lossy();
    let paths = glob_with(&pattern, WALK_OPTIONS)
        .map_err(|_| CliError::InvalidPattern(pattern.to_string()))?;

    let mut files = Vec::new();
    for path_result in paths {
        let path = path_result.with_context(|| format!("Error walking {}", dir.display()))?;
        let relative = path.strip_prefix(dir).unwrap_or(&path);
        if path.is_file() && !is_skipped(relative) {
            files.push(path);
        }
    }
    Ok(files)
}

/// Resolve files, patterns and directories to a sorted list of files
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let literal = Path::new(pattern);
        if literal.is_dir() {
            files.extend(walk_directory(literal)?);
            continue;
        }

        let paths = glob_with(pattern, WALK_OPTIONS)
            .map_err(|_| CliError::InvalidPattern(pattern.clone()))?;

        let before = files.len();
        for path_result in paths {
            let path =
                path_result.with_context(|| format!("Error resolving pattern: {pattern}"))?;
            if path.is_file() {
                files.push(path);
            } else if path.is_dir() {
                files.extend(walk_directory(&path)?);
            }
        }

        if files.len() == before {
            log::warn!("No files matched '{pattern}'");
        }
    }

    if files.is_empty() {
        return Err(CliError::FileNotFound(patterns.join(", ")).into());
    }

    files.sort();
    files.dedup();

    Ok(files)
}
