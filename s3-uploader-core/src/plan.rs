//! Build the list of uploads for a scan: walk → classify → key.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};

use crate::classify::{classify, ExtensionMapping};
use crate::contract::UploadTask;
use crate::key::build_key;
use crate::walk::{walk, WalkOptions};

/// Everything needed to turn a directory into upload tasks.
#[derive(Debug, Clone)]
pub struct PlanConfig {
    pub root: PathBuf,
    pub bucket: String,
    pub walk: WalkOptions,
    pub mapping: Option<ExtensionMapping>,
}

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("scan root {0} does not exist")]
    RootNotFound(PathBuf),
    #[error("scan root {0} is not a directory")]
    RootNotDirectory(PathBuf),
}

/// Lazily produce one [`UploadTask`] per accepted file under `config.root`.
///
/// Fails only when the root itself is unusable; files with no prefix are
/// skipped with a debug log.
pub fn plan_uploads(
    config: &PlanConfig,
) -> Result<impl Iterator<Item = UploadTask> + '_, PlanError> {
    if !config.root.exists() {
        return Err(PlanError::RootNotFound(config.root.clone()));
    }
    if !config.root.is_dir() {
        return Err(PlanError::RootNotDirectory(config.root.clone()));
    }

    info!(
        root = %config.root.display(),
        bucket = %config.bucket,
        recursive = config.walk.recursive,
        custom_mappings = config.mapping.as_ref().map_or(0, ExtensionMapping::len),
        "Planning uploads"
    );

    let tasks = walk(&config.root, &config.walk).filter_map(move |candidate| {
        let Some(prefix) = classify(&candidate.path, config.mapping.as_ref()) else {
            debug!(path = %candidate.path.display(), "Skipping file with unsupported extension");
            return None;
        };
        let key = build_key(prefix, &candidate.relative_path);
        debug!(path = %candidate.path.display(), key = %key, "Queued file");
        Some(UploadTask::new(
            candidate.path,
            candidate.relative_path,
            config.bucket.clone(),
            key,
        ))
    });
    Ok(tasks)
}
