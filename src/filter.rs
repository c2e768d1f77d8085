/*!
 * Path filters deciding which entries a traversal keeps
 */

use std::collections::HashSet;
use std::path::Path;

use glob_match::glob_match;

use crate::utils::{
    dotted_extension, file_name_of, DEFAULT_IGNORE_DIRS, DEFAULT_IGNORE_EXTENSIONS,
    DEFAULT_IGNORE_FILES, DEFAULT_REWRITE_SUFFIXES,
};

/// Decisions a walker asks of its filter
pub trait EntryFilter: Send + Sync {
    /// Whether a directory with this name is skipped along with everything below it
    fn prune_directory(&self, name: &str) -> bool;

    /// Whether a file is left out
    fn skip_file(&self, path: &Path) -> bool;
}

/// The three static ignore sets, fixed for the duration of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRules {
    /// Directory names, compared exactly
    pub dirs: HashSet<String>,
    /// Extensions with leading dot, compared lower-cased
    pub extensions: HashSet<String>,
    /// Exact file names
    pub files: HashSet<String>,
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self {
            dirs: DEFAULT_IGNORE_DIRS.iter().map(|s| s.to_string()).collect(),
            extensions: DEFAULT_IGNORE_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            files: DEFAULT_IGNORE_FILES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl IgnoreRules {
    /// Rules that ignore nothing
    pub fn empty() -> Self {
        Self {
            dirs: HashSet::new(),
            extensions: HashSet::new(),
            files: HashSet::new(),
        }
    }

    /// Add directory names
    pub fn with_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// Add extensions; a missing leading dot is supplied and case is folded
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions.extend(extensions.into_iter().map(|ext| {
            let ext = ext.into().to_lowercase();
            if ext.starts_with('.') {
                ext
            } else {
                format!(".{}", ext)
            }
        }));
        self
    }

    /// Add exact file names
    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files.extend(files.into_iter().map(Into::into));
        self
    }
}

/// Filter used by the dump tool: ignore sets plus optional glob patterns
#[derive(Debug, Clone)]
pub struct PathFilter {
    rules: IgnoreRules,
    patterns: Vec<String>,
}

impl PathFilter {
    /// Create a filter from ignore rules
    pub fn new(rules: IgnoreRules) -> Self {
        Self {
            rules,
            patterns: Vec::new(),
        }
    }

    /// Also ignore any base name matching one of these glob patterns
    pub fn with_patterns(mut self, patterns: Vec<String>) -> Self {
        self.patterns = patterns;
        self
    }

    /// True iff `name` is an ignored directory name
    pub fn should_ignore_directory(&self, name: &str) -> bool {
        self.rules.dirs.contains(name) || self.matches_pattern(name)
    }

    /// True iff the base name is an ignored file name or the extension is ignored
    pub fn should_ignore_file(&self, path: &Path) -> bool {
        let name = file_name_of(path);

        if self.rules.files.contains(&name) {
            return true;
        }

        if self.rules.extensions.contains(&dotted_extension(path)) {
            return true;
        }

        self.matches_pattern(&name)
    }

    fn matches_pattern(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| glob_match(p, name))
    }
}

impl EntryFilter for PathFilter {
    fn prune_directory(&self, name: &str) -> bool {
        self.should_ignore_directory(name)
    }

    fn skip_file(&self, path: &Path) -> bool {
        self.should_ignore_file(path)
    }
}

/// Filter used by the rewriter: keeps files whose full name ends in a suffix
#[derive(Debug, Clone)]
pub struct SuffixFilter {
    suffixes: Vec<String>,
}

impl Default for SuffixFilter {
    fn default() -> Self {
        Self::new(DEFAULT_REWRITE_SUFFIXES.iter().map(|s| s.to_string()).collect())
    }
}

impl SuffixFilter {
    pub fn new(suffixes: Vec<String>) -> Self {
        Self { suffixes }
    }

    /// Plain suffix match on the file name, so `foo.tsx.bak` does not match `.tsx`
    pub fn matches(&self, path: &Path) -> bool {
        let name = file_name_of(path);
        self.suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }
}

impl EntryFilter for SuffixFilter {
    fn prune_directory(&self, _name: &str) -> bool {
        false
    }

    fn skip_file(&self, path: &Path) -> bool {
        !self.matches(path)
    }
}
