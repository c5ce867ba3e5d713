//! Directory walking: enumerate candidate files under a scan root.
//!
//! Excluded directories are pruned while walking, so nothing beneath them is
//! ever visited.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::key::relative_component;

/// Directory names that are never descended into (environments, VCS metadata, build caches).
pub const EXCLUDED_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "__pycache__",
    ".venv",
    "venv",
    "env",
    ".tox",
    ".mypy_cache",
    ".pytest_cache",
    "node_modules",
    "target",
];

#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Descend into subdirectories; otherwise only direct children of the root are listed.
    pub recursive: bool,
    /// File name to skip wherever it appears (the running program's own file).
    pub skip_file_name: Option<OsString>,
}

/// A regular file found by [`walk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub path: PathBuf,
    /// Path relative to the scan root.
    pub relative_path: PathBuf,
}

pub fn is_excluded_dir_name(name: &OsStr) -> bool {
    EXCLUDED_DIRS.iter().any(|excluded| name == OsStr::new(excluded))
}

fn is_excluded_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_type().is_dir() && is_excluded_dir_name(entry.file_name())
}

/// Regular files, plus symlinks that resolve to one. Dangling links, devices,
/// sockets and directories are not.
fn is_regular_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return true;
    }
    file_type.is_symlink()
        && std::fs::metadata(entry.path())
            .map(|m| m.is_file())
            .unwrap_or(false)
}

/// Lazily enumerate candidate files under `root`.
///
/// Entries within a directory come out sorted by file name. Holds no state
/// between calls; walking again with the same arguments starts over.
pub fn walk<'a>(
    root: &'a Path,
    options: &'a WalkOptions,
) -> impl Iterator<Item = FileCandidate> + 'a {
    let max_depth = if options.recursive { usize::MAX } else { 1 };

    WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if is_excluded_dir(entry) {
                debug!(path = %entry.path().display(), "Skipping excluded directory");
                return false;
            }
            true
        })
        .filter_map(|res| match res {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "Skipping unreadable entry");
                None
            }
        })
        .filter(move |entry| {
            if !is_regular_file(entry) {
                if !entry.file_type().is_dir() {
                    debug!(path = %entry.path().display(), "Skipping non-regular file");
                }
                return false;
            }
            if options
                .skip_file_name
                .as_deref()
                .is_some_and(|own| entry.file_name() == own)
            {
                debug!(path = %entry.path().display(), "Skipping the program's own file");
                return false;
            }
            true
        })
        .map(move |entry| {
            let path = entry.into_path();
            let relative_path = relative_component(root, &path);
            FileCandidate {
                path,
                relative_path,
            }
        })
}
