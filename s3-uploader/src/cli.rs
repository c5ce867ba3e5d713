//! # s3-uploader CLI
//!
//! This module implements the CLI interface for s3-uploader: argument parsing,
//! startup validation and the async entrypoint.
//!
//! All classification, key and dispatch logic lives in the [`s3-uploader-core`] crate.
//! This module is strictly glue: it turns flags into core configuration, picks
//! the object store and prints the outcome.
//!
//! ## How To Use
//! - For command-line users: run the `s3-uploader` binary with `--help`.
//! - For programmatic/integration use: call [`run`] with a constructed [`Cli`],
//!   or [`execute`] with any [`ObjectStore`].
//!
//! [`s3-uploader-core`]: ../../s3-uploader-core/

use crate::load_mapping::load_mapping;
use crate::upload::{S3Client, S3ClientConfig};
use anyhow::{Context, Result};
use clap::Parser;
use s3_uploader_core::classify::ExtensionMapping;
use s3_uploader_core::contract::{ObjectStore, UploadReport, UploadResult};
use s3_uploader_core::dispatch::{dispatch, summarize, DispatchOptions, DispatchSummary};
use s3_uploader_core::plan::{plan_uploads, PlanConfig};
use s3_uploader_core::walk::WalkOptions;
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_BUCKET: &str = "my-s3-uploader-test";

/// Upload files from a directory to an S3 bucket, grouped by file type.
#[derive(Parser, Clone)]
#[clap(
    name = "s3-uploader",
    version,
    about = "Scan a directory, classify files by extension and upload them to an S3 bucket"
)]
pub struct Cli {
    /// Target bucket
    #[clap(long, short = 'b', default_value = DEFAULT_BUCKET)]
    pub bucket: String,

    /// Directory to scan
    #[clap(long, short = 'd', default_value = ".")]
    pub dir: PathBuf,

    /// Classify files and compute keys, but upload nothing
    #[clap(long)]
    pub dry_run: bool,

    /// Recurse into subdirectories
    #[clap(long, short = 'r')]
    pub recursive: bool,

    /// JSON file mapping extensions (with or without a leading dot) to prefixes
    #[clap(long, short = 'm')]
    pub map: Option<PathBuf>,

    /// Number of concurrent uploads
    #[clap(long, short = 'w', default_value_t = 1)]
    pub workers: usize,

    /// AWS region (defaults to the SDK's region resolution)
    #[clap(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Custom S3 endpoint, e.g. for MinIO or LocalStack
    #[clap(long, env = "S3_UPLOADER_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Named AWS profile for the default credential chain
    #[clap(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Explicit access key; used only together with --secret-key
    #[clap(long, env = "S3_UPLOADER_ACCESS_KEY", hide_env_values = true)]
    pub access_key: Option<String>,

    /// Explicit secret key; used only together with --access-key
    #[clap(long, env = "S3_UPLOADER_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,
}

impl Cli {
    pub fn client_config(&self) -> S3ClientConfig {
        S3ClientConfig {
            region: self.region.clone(),
            endpoint_url: self.endpoint_url.clone(),
            profile: self.profile.clone(),
            access_key: self.access_key.clone(),
            secret_key: self.secret_key.clone(),
        }
    }

    pub fn dispatch_options(&self) -> DispatchOptions {
        DispatchOptions {
            workers: self.workers,
            dry_run: self.dry_run,
        }
    }

    pub fn plan_config(
        &self,
        mapping: Option<ExtensionMapping>,
        skip_file_name: Option<OsString>,
    ) -> PlanConfig {
        PlanConfig {
            root: self.dir.clone(),
            bucket: self.bucket.clone(),
            walk: WalkOptions {
                recursive: self.recursive,
                skip_file_name,
            },
            mapping,
        }
    }
}

/// File name of the running executable, skipped if it sits in the scanned tree.
fn own_file_name() -> Option<OsString> {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_name().map(ToOwned::to_owned))
}

fn print_report(reports: &[UploadReport], summary: &DispatchSummary) {
    for report in reports {
        let task = &report.task;
        match &report.result {
            UploadResult::DryRun => println!(
                "[DRY RUN] {} -> s3://{}/{}",
                task.source_path().display(),
                task.bucket(),
                task.destination_key()
            ),
            UploadResult::Failed { reason } => println!(
                "[FAILED] {} -> s3://{}/{}: {}",
                task.source_path().display(),
                task.bucket(),
                task.destination_key(),
                reason
            ),
            UploadResult::Uploaded => {}
        }
    }
    println!(
        "Done: {} uploaded, {} failed, {} dry-run",
        summary.uploaded, summary.failed, summary.dry_run
    );
}

/// Plan and dispatch uploads against `store`.
///
/// Startup problems (missing scan root, unreadable mapping) are errors;
/// individual upload failures are reported in the summary and are not.
pub async fn execute<S>(cli: &Cli, store: Arc<S>) -> Result<DispatchSummary>
where
    S: ObjectStore + ?Sized + 'static,
{
    let mapping = cli.map.as_ref().map(load_mapping).transpose()?;
    let plan = cli.plan_config(mapping, own_file_name());
    let tasks = plan_uploads(&plan).context("Cannot scan directory")?;

    let reports = dispatch(store, tasks, &cli.dispatch_options()).await;
    let summary = summarize(&reports);
    print_report(&reports, &summary);
    Ok(summary)
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<DispatchSummary> {
    tracing::info!(
        bucket = %cli.bucket,
        dir = %cli.dir.display(),
        recursive = cli.recursive,
        workers = cli.workers,
        dry_run = cli.dry_run,
        "Starting upload run"
    );
    let store = Arc::new(S3Client::new(cli.client_config()));
    tracing::info!(credentials = ?store.credential_source(), "Object store configured");
    execute(&cli, store).await
}
