use anyhow::Result;
use s3_uploader_core::classify::ExtensionMapping;
use std::fs;
use std::path::Path;
use tracing::{error, info};

/// Loads a JSON extension → prefix mapping file.
///
/// The top-level value must be an object whose values are strings. Any read or
/// parse failure is returned as an error; callers treat it as fatal.
pub fn load_mapping<P: AsRef<Path>>(path: P) -> Result<ExtensionMapping> {
    let path_ref = path.as_ref();
    info!(mapping_path = ?path_ref, "Loading extension mapping from file");

    let content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, mapping_path = ?path_ref, "Failed to read mapping file");
            return Err(anyhow::anyhow!(
                "Failed to read mapping file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let mapping: ExtensionMapping = match serde_json::from_str(&content) {
        Ok(mapping) => mapping,
        Err(e) => {
            error!(error = ?e, mapping_path = ?path_ref, "Failed to parse mapping JSON");
            return Err(anyhow::anyhow!(
                "Failed to parse mapping JSON {:?}: {e}",
                path_ref
            ));
        }
    };

    info!(
        mapping_path = ?path_ref,
        entries = mapping.len(),
        "Extension mapping loaded"
    );
    Ok(mapping)
}
