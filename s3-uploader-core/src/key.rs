//! Destination key derivation.

use std::path::{Component, Path, PathBuf};

/// Path of `path` relative to `root`.
///
/// Falls back to the bare file name when `path` is not under `root`, so that
/// absolute local paths never leak into a remote key. Two such files with the
/// same name end up under the same key.
pub fn relative_component(root: &Path, path: &Path) -> PathBuf {
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
        _ => path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| path.to_path_buf()),
    }
}

/// Join `prefix` and `relative_path` into a `/`-separated object key.
///
/// The result never starts with `/`, whatever the host path convention.
pub fn build_key(prefix: &str, relative_path: &Path) -> String {
    let rel = relative_path
        .components()
        .filter_map(|c| match c {
            Component::Normal(seg) => Some(seg.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");

    let prefix = prefix.trim_end_matches(['/', '\\']).trim_start_matches('/');
    if prefix.is_empty() {
        rel
    } else {
        format!("{prefix}/{rel}")
    }
}
