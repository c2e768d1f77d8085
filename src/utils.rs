/*!
 * Utility functions and default rule sets for codemap
 */

use std::path::Path;

use once_cell::sync::Lazy;

use crate::types::SubstitutionRule;

/// Default name of the report written by `codemap`
pub const DEFAULT_OUTPUT_FILE: &str = "codebase_map.txt";

/// Header line opening the tree section
pub const TREE_HEADER: &str = "### PROJECT STRUCTURE ###";

/// Placeholder written instead of content that is not valid UTF-8
pub const BINARY_PLACEHOLDER: &str = "[Binary or non-UTF-8 file content skipped]";

/// Directories that are never descended into
pub static DEFAULT_IGNORE_DIRS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Version Control
        ".git",
        // Python
        "__pycache__",
        "venv",
        "env",
        // JavaScript/TypeScript
        "node_modules",
        ".next",
        "coverage",
        "dist",
        "build",
        ".firebase",
        // IDEs & Editors
        ".idea",
        ".vscode",
        // Tooling
        ".worktrees",
        ".claude",
        // Credentials that sometimes show up as a directory
        "service-account.json",
    ]
});

/// Extensions (lower-cased, with the leading dot) whose files are skipped
pub static DEFAULT_IGNORE_EXTENSIONS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Images
        ".png", ".jpg", ".jpeg", ".gif", ".svg", ".ico",
        // Binaries
        ".pyc", ".exe", ".bin", ".pdf",
        // Locks & Archives
        ".lock", ".zip", ".gz",
    ]
});

/// Exact file names that are skipped wherever they appear
pub static DEFAULT_IGNORE_FILES: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec!["package-lock.json", "yarn.lock"]);

/// Suffixes of files `recolor` rewrites by default
pub static DEFAULT_REWRITE_SUFFIXES: Lazy<Vec<&'static str>> = Lazy::new(|| vec![".tsx", ".ts"]);

/// Substitutions `recolor` applies by default, in order
pub static DEFAULT_SUBSTITUTIONS: Lazy<Vec<SubstitutionRule>> = Lazy::new(|| {
    vec![
        // purple -> cyan
        SubstitutionRule::new("indigo", "cyan"),
        // orange -> emerald
        SubstitutionRule::new("amber", "emerald"),
    ]
});

/// Base name of a path as a string, or an empty string
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Lower-cased extension including the leading dot, or an empty string.
///
/// Dotfiles such as `.gitignore` have no extension.
pub fn dotted_extension(path: &Path) -> String {
    match path.extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy().to_lowercase()),
        None => String::new(),
    }
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
