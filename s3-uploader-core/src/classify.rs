//! File classification: which prefix (if any) a file is uploaded under.
//!
//! A user-supplied [`ExtensionMapping`] is consulted first; the built-in
//! defaults are consulted only when it has no entry for the extension.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

/// Built-in extension → prefix table.
pub const DEFAULT_PREFIXES: &[(&str, &str)] = &[
    ("py", "python"),
    ("jpg", "pictures"),
    ("jpeg", "pictures"),
    ("png", "pictures"),
];

/// User-supplied extension → prefix table.
///
/// Keys may be given with or without the leading dot and in any case; they are
/// lowercased on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "HashMap<String, String>")]
pub struct ExtensionMapping {
    entries: HashMap<String, String>,
}

impl ExtensionMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, extension: impl AsRef<str>, prefix: impl Into<String>) {
        self.entries
            .insert(extension.as_ref().to_lowercase(), prefix.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a lowercased extension (no leading dot): dotted key first, then bare.
    fn lookup(&self, extension: &str) -> Option<&str> {
        self.entries
            .get(&format!(".{extension}"))
            .or_else(|| self.entries.get(extension))
            .map(String::as_str)
    }
}

impl From<HashMap<String, String>> for ExtensionMapping {
    fn from(raw: HashMap<String, String>) -> Self {
        let mut mapping = ExtensionMapping::new();
        for (extension, prefix) in raw {
            mapping.insert(extension, prefix);
        }
        mapping
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for ExtensionMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = ExtensionMapping::new();
        for (extension, prefix) in iter {
            mapping.insert(extension, prefix);
        }
        mapping
    }
}

/// Lowercased final extension of `path`, without the dot.
///
/// Only the last suffix counts (`archive.tar.gz` → `gz`); dot-files such as
/// `.bashrc` have no extension.
pub fn normalized_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .filter(|ext| !ext.is_empty())
}

fn default_prefix(extension: &str) -> Option<&'static str> {
    DEFAULT_PREFIXES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, prefix)| *prefix)
}

/// Prefix for `path`, or `None` when the file must be skipped.
pub fn classify<'a>(path: &Path, mapping: Option<&'a ExtensionMapping>) -> Option<&'a str> {
    let extension = normalized_extension(path)?;
    if let Some(prefix) = mapping.and_then(|m| m.lookup(&extension)) {
        return Some(prefix);
    }
    default_prefix(&extension)
}
