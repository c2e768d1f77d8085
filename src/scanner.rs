/*!
 * Directory scanning for the report
 */

use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::error::{Result, ResultExt};
use crate::filter::PathFilter;
use crate::types::{DirectoryNode, EntryKind, ScanResult};
use crate::utils::file_name_of;
use crate::walker::walk;

/// Scanner for directory contents
pub struct Scanner {
    /// Scanner configuration
    config: Config,
    /// Filter built from the configured rules
    filter: Arc<PathFilter>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: Config) -> Self {
        let filter = PathFilter::new(config.rules.clone())
            .with_patterns(config.ignore_patterns.clone());

        Self {
            config,
            filter: Arc::new(filter),
        }
    }

    /// Walk the target directory and collect every visited directory with its
    /// retained children, in traversal order.
    ///
    /// Entries that cannot be read are reported on stderr and left out.
    pub fn scan(&self) -> Result<ScanResult> {
        let root = fs::canonicalize(&self.config.target_dir).with_context(|| {
            format!("Failed to resolve {}", self.config.target_dir.display())
        })?;

        // "/" has no base name
        let root_name = match root.file_name() {
            Some(_) => file_name_of(&root),
            None => root.display().to_string(),
        };

        let mut directories: Vec<DirectoryNode> = Vec::new();
        let mut index: HashMap<PathBuf, usize> = HashMap::new();

        let entries = walk(
            &root,
            self.filter.clone(),
            self.config.respect_gitignore,
        );

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    eprintln!("Error walking {}", e);
                    continue;
                }
            };

            if entry.depth > 0 {
                let parent = entry.path.parent().and_then(|p| index.get(p)).copied();
                if let Some(i) = parent {
                    let name = entry
                        .path
                        .file_name()
                        .map(OsStr::to_os_string)
                        .unwrap_or_default();
                    if entry.kind.is_dir_like() {
                        directories[i].dirs.push(name);
                    } else {
                        directories[i].files.push(name);
                    }
                }
            }

            if entry.kind == EntryKind::Directory {
                let rel_path = entry
                    .path
                    .strip_prefix(&root)
                    .map(|p| p.to_path_buf())
                    .unwrap_or_default();

                index.insert(entry.path.clone(), directories.len());
                directories.push(DirectoryNode {
                    path: entry.path,
                    rel_path,
                    depth: entry.depth,
                    dirs: Vec::new(),
                    files: Vec::new(),
                });
            }
        }

        Ok(ScanResult {
            root,
            root_name,
            directories,
        })
    }
}
