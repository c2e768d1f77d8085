/*!
 * Deterministic directory traversal shared by both tools
 */

use std::fs::FileType;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ignore::WalkBuilder;
use walkdir::WalkDir;

use crate::filter::EntryFilter;
use crate::types::{EntryKind, WalkEntry, WalkError};
use crate::utils::file_name_of;

/// Walk `root` in pre-order, children sorted by file name.
///
/// Symlinks are never followed. Pruned directories are not descended into
/// and skipped files are not yielded. The root itself comes first at depth 0.
/// Entries that cannot be read are yielded as errors, in traversal order, and
/// the caller decides whether they are fatal.
pub fn walk(
    root: &Path,
    filter: Arc<dyn EntryFilter>,
    respect_gitignore: bool,
) -> Vec<Result<WalkEntry, WalkError>> {
    if respect_gitignore {
        walk_gitignore(root, filter)
    } else {
        walk_plain(root, filter)
    }
}

fn classify(path: &Path, file_type: FileType) -> EntryKind {
    if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_symlink() && path.is_dir() {
        EntryKind::LinkedDirectory
    } else {
        EntryKind::File
    }
}

fn keep(filter: &dyn EntryFilter, path: &Path, depth: usize, kind: EntryKind) -> bool {
    if depth == 0 {
        return true;
    }

    if kind.is_dir_like() {
        !filter.prune_directory(&file_name_of(path))
    } else {
        !filter.skip_file(path)
    }
}

fn walk_plain(root: &Path, filter: Arc<dyn EntryFilter>) -> Vec<Result<WalkEntry, WalkError>> {
    let mut entries = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let kind = classify(e.path(), e.file_type());
            keep(filter.as_ref(), e.path(), e.depth(), kind)
        });

    for entry in walker {
        match entry {
            Ok(entry) => entries.push(Ok(WalkEntry {
                kind: classify(entry.path(), entry.file_type()),
                depth: entry.depth(),
                path: entry.into_path(),
            })),
            Err(e) => entries.push(Err(WalkError {
                path: e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf()),
                message: e.to_string(),
            })),
        }
    }

    entries
}

fn walk_gitignore(
    root: &Path,
    filter: Arc<dyn EntryFilter>,
) -> Vec<Result<WalkEntry, WalkError>> {
    let mut entries = Vec::new();

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .git_ignore(true)
        .git_exclude(true)
        .require_git(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b));

    let entry_filter = Arc::clone(&filter);
    builder.filter_entry(move |e| match e.file_type() {
        Some(file_type) => {
            let kind = classify(e.path(), file_type);
            keep(entry_filter.as_ref(), e.path(), e.depth(), kind)
        }
        None => false,
    });

    for entry in builder.build() {
        match entry {
            Ok(entry) => {
                let Some(file_type) = entry.file_type() else {
                    continue;
                };
                entries.push(Ok(WalkEntry {
                    kind: classify(entry.path(), file_type),
                    depth: entry.depth(),
                    path: entry.into_path(),
                }));
            }
            Err(e) => entries.push(Err(WalkError {
                path: ignore_error_path(&e).unwrap_or_else(|| root.to_path_buf()),
                message: e.to_string(),
            })),
        }
    }

    entries
}

fn ignore_error_path(err: &ignore::Error) -> Option<PathBuf> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.clone()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            ignore_error_path(err)
        }
        _ => None,
    }
}
