//! Upload dispatcher: runs every task against an [`ObjectStore`], sequentially
//! or on a bounded number of concurrent tokio tasks.
//!
//! # Guarantees
//! - One attempt per task, no retries.
//! - A failed (or panicking) upload is recorded for that task only; every other
//!   task still runs.
//! - `dispatch` returns only after every task has finished, with exactly one
//!   [`UploadReport`] per input task, in input order.
//! - With `workers <= 1` uploads run one after another in input order.
//! - In dry-run mode the store is never called.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::future::join_all;
use futures::FutureExt;
use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::content_type;
use crate::contract::{ObjectStore, ObjectUpload, UploadReport, UploadResult, UploadTask};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Maximum number of uploads in flight. `0` and `1` both mean sequential.
    /// Values above [`Semaphore::MAX_PERMITS`] are capped.
    pub workers: usize,
    /// Report what would be uploaded without calling the store.
    pub dry_run: bool,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            workers: 1,
            dry_run: false,
        }
    }
}

/// Tally of a dispatch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    pub uploaded: usize,
    pub failed: usize,
    pub dry_run: usize,
}

impl DispatchSummary {
    pub fn total(&self) -> usize {
        self.uploaded + self.failed + self.dry_run
    }
}

pub fn summarize(reports: &[UploadReport]) -> DispatchSummary {
    reports
        .iter()
        .fold(DispatchSummary::default(), |mut acc, report| {
            match report.result {
                UploadResult::Uploaded => acc.uploaded += 1,
                UploadResult::DryRun => acc.dry_run += 1,
                UploadResult::Failed { .. } => acc.failed += 1,
            }
            acc
        })
}

/// Upload a single task. Errors are logged and folded into the result.
async fn upload_one<S>(store: &S, task: &UploadTask) -> UploadResult
where
    S: ObjectStore + ?Sized,
{
    let content_type = content_type::for_path(task.source_path());
    let req = ObjectUpload {
        local_path: task.source_path(),
        bucket: task.bucket(),
        key: task.destination_key(),
        content_type,
    };

    match store.upload(req).await {
        Ok(()) => {
            info!(
                path = %task.source_path().display(),
                bucket = %task.bucket(),
                key = %task.destination_key(),
                "Uploaded"
            );
            UploadResult::Uploaded
        }
        Err(e) => {
            error!(
                path = %task.source_path().display(),
                bucket = %task.bucket(),
                key = %task.destination_key(),
                error = %e,
                "Upload failed"
            );
            UploadResult::Failed {
                reason: e.to_string(),
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        *msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic"
    }
}

fn report_incomplete(task: &UploadTask, error: &dyn std::fmt::Display) -> UploadResult {
    error!(
        path = %task.source_path().display(),
        key = %task.destination_key(),
        error = %error,
        "Upload task did not complete"
    );
    UploadResult::Failed {
        reason: format!("upload task did not complete: {error}"),
    }
}

fn report_dry_run(task: UploadTask) -> UploadReport {
    info!(
        path = %task.source_path().display(),
        bucket = %task.bucket(),
        key = %task.destination_key(),
        "[DRY RUN] Would upload"
    );
    UploadReport {
        task,
        result: UploadResult::DryRun,
    }
}

async fn dispatch_sequential<S>(
    store: &S,
    tasks: impl IntoIterator<Item = UploadTask>,
) -> Vec<UploadReport>
where
    S: ObjectStore + ?Sized,
{
    let mut reports = Vec::new();
    for task in tasks {
        let result = match AssertUnwindSafe(upload_one(store, &task))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(payload) => {
                let msg = format!("upload panicked: {}", panic_message(&*payload));
                report_incomplete(&task, &msg)
            }
        };
        reports.push(UploadReport { task, result });
    }
    reports
}

async fn dispatch_concurrent<S>(
    store: Arc<S>,
    tasks: impl IntoIterator<Item = UploadTask>,
    workers: usize,
) -> Vec<UploadReport>
where
    S: ObjectStore + ?Sized + 'static,
{
    let semaphore = Arc::new(Semaphore::new(workers.min(Semaphore::MAX_PERMITS)));
    let mut queued = Vec::new();
    let mut handles = Vec::new();

    for task in tasks {
        // Waiting here keeps at most `workers` uploads alive and stops the
        // walker from running ahead. The semaphore is never closed.
        let permit = semaphore.clone().acquire_owned().await.ok();
        let store = store.clone();
        queued.push(task.clone());
        handles.push(tokio::spawn(async move {
            let _permit = permit;
            upload_one(&*store, &task).await
        }));
    }

    join_all(handles)
        .await
        .into_iter()
        .zip(queued)
        .map(|(joined, task)| {
            let result = joined.unwrap_or_else(|e| report_incomplete(&task, &e));
            UploadReport { task, result }
        })
        .collect()
}

/// Run `tasks` against `store` according to `options`.
pub async fn dispatch<S>(
    store: Arc<S>,
    tasks: impl IntoIterator<Item = UploadTask>,
    options: &DispatchOptions,
) -> Vec<UploadReport>
where
    S: ObjectStore + ?Sized + 'static,
{
    info!(
        workers = options.workers,
        dry_run = options.dry_run,
        "Dispatching uploads"
    );

    let reports = if options.dry_run {
        tasks.into_iter().map(report_dry_run).collect()
    } else if options.workers <= 1 {
        dispatch_sequential(&*store, tasks).await
    } else {
        dispatch_concurrent(store, tasks, options.workers).await
    };

    let summary = summarize(&reports);
    info!(
        uploaded = summary.uploaded,
        failed = summary.failed,
        dry_run = summary.dry_run,
        "Dispatch complete"
    );
    reports
}
