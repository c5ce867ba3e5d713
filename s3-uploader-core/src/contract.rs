//! # contract: data model and the object-store seam
//!
//! This module defines the plain data that flows through the pipeline
//! ([`UploadTask`], [`UploadResult`], [`UploadReport`]) and the single trait
//! ([`ObjectStore`]) through which the dispatcher reaches the network.
//!
//! ## Interface & Extensibility
//! - Implement [`ObjectStore`] to target a new storage backend.
//! - Errors cross the seam as [`StoreError`]; the dispatcher never inspects them
//!   beyond their `Display` output.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall`, so tests get a `MockObjectStore`
//!   (exported with the `test-export-mocks` feature).

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use mockall::automock;

/// Error returned by an [`ObjectStore`] implementation.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// One file to upload, with its destination fully resolved.
///
/// Built by [`crate::plan`] and consumed once by [`crate::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTask {
    source_path: PathBuf,
    relative_path: PathBuf,
    bucket: String,
    destination_key: String,
}

impl UploadTask {
    pub fn new(
        source_path: PathBuf,
        relative_path: PathBuf,
        bucket: impl Into<String>,
        destination_key: impl Into<String>,
    ) -> Self {
        Self {
            source_path,
            relative_path,
            bucket: bucket.into(),
            destination_key: destination_key.into(),
        }
    }

    /// Path of the file on the local disk.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Path relative to the scan root, or the bare file name
    /// (see [`crate::key::relative_component`]).
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn destination_key(&self) -> &str {
        &self.destination_key
    }
}

/// The minimal data an [`ObjectStore`] needs to put one object.
#[derive(Debug, Clone, Copy)]
pub struct ObjectUpload<'a> {
    /// Local file whose bytes become the object body.
    pub local_path: &'a Path,
    /// Target bucket.
    pub bucket: &'a str,
    /// Full destination key inside the bucket.
    pub key: &'a str,
    /// Content type hint. `None` means the store gets no hint at all.
    pub content_type: Option<&'a str>,
}

/// Outcome of a single task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadResult {
    Uploaded,
    /// The task was reported but not executed (dry run).
    DryRun,
    Failed { reason: String },
}

/// A task paired with its outcome.
#[derive(Debug, Clone)]
pub struct UploadReport {
    pub task: UploadTask,
    pub result: UploadResult,
}

/// Trait for putting local files into a bucket.
/// The implementor owns transport, credentials and retries (if any).
///
/// One instance is shared by every in-flight upload, so implementations must be
/// safe for concurrent use.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload a single file under `req.key` in `req.bucket`.
    async fn upload<'a>(&self, req: ObjectUpload<'a>) -> Result<(), StoreError>;
}
