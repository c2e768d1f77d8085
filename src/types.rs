/*!
 * Core types and data structures for codemap
 */

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

/// Kind of entry yielded by a traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Real directory, descended into
    Directory,
    /// Symbolic link pointing at a directory; listed but never descended into
    LinkedDirectory,
    /// Anything else (regular files, other symlinks)
    File,
}

impl EntryKind {
    /// Whether the entry shows up as a directory in listings
    pub fn is_dir_like(self) -> bool {
        matches!(self, EntryKind::Directory | EntryKind::LinkedDirectory)
    }
}

/// A retained entry produced by the walker
#[derive(Debug, Clone)]
pub struct WalkEntry {
    /// Path as reached from the walk root
    pub path: PathBuf,
    /// Distance from the walk root (root itself is 0)
    pub depth: usize,
    /// Entry kind
    pub kind: EntryKind,
}

/// An entry the walker could not read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkError {
    /// Path of the failing entry, or the walk root when unknown
    pub path: PathBuf,
    /// Error message
    pub message: String,
}

impl fmt::Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// A visited directory and its retained children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    /// Absolute path of the directory
    pub path: PathBuf,
    /// Path relative to the scan root (empty for the root)
    pub rel_path: PathBuf,
    /// Distance from the scan root, used for indentation
    pub depth: usize,
    /// Retained child directory names, as found on disk
    pub dirs: Vec<OsString>,
    /// Retained child file names, as found on disk
    pub files: Vec<OsString>,
}

/// Result of scanning a root directory
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Canonical path of the root
    pub root: PathBuf,
    /// Base name of the root, as shown at the top of the tree
    pub root_name: String,
    /// Visited directories in traversal order, root first
    pub directories: Vec<DirectoryNode>,
}

impl ScanResult {
    /// Total number of retained files
    pub fn file_count(&self) -> usize {
        self.directories.iter().map(|d| d.files.len()).sum()
    }
}

/// What was read out of a file for the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Valid UTF-8 text
    Text(String),
    /// Content that is not valid UTF-8
    Binary,
    /// Any other read failure, with its message
    Unreadable(String),
}

/// A file read once for the report
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Path relative to the scan root
    pub rel_path: PathBuf,
    /// Decoded content or the reason it is missing
    pub content: FileContent,
}

/// Literal search/replace pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionRule {
    pub search: String,
    pub replace: String,
}

impl SubstitutionRule {
    pub fn new(search: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            replace: replace.into(),
        }
    }
}

impl fmt::Display for SubstitutionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.search, self.replace)
    }
}

/// Outcome of rewriting a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// Content changed and was written back (or would be, in dry-run mode)
    Updated,
    /// No rule matched; nothing written
    Unchanged,
    /// Reading or writing failed
    Failed(String),
}

/// Outcome for one visited file
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub outcome: RewriteOutcome,
}
