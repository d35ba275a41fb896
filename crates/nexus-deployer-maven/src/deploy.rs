//! The deploy flow: validate, stage, then upload the plan sequentially or in
//! parallel.
//!
//! Staging (including the artifact checksum) always completes before the
//! first PUT. In sequential mode the first failing upload stops the run; in
//! parallel mode every upload is attempted and the failure with the lowest
//! task index is reported. Nothing is retried or rolled back.

use futures_util::future::join_all;

use nexus_deployer_core::request::DeploymentRequest;
use nexus_deployer_core::timestamp;
use nexus_deployer_util::errors::{DeployError, DeployResult};
use nexus_deployer_util::progress::Reporter;

use crate::layout::{self, UploadKind, UploadTask};
use crate::staging::{self, StagedFiles};
use crate::upload::{HttpUploader, TransportOptions, UploadBody, Uploader};

/// A completed PUT.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub task: UploadTask,
    pub url: String,
    pub status: u16,
}

/// Result of a successful deployment.
#[derive(Debug, Clone)]
pub struct DeployReport {
    pub last_updated: String,
    pub staged: StagedFiles,
    /// In plan order, regardless of execution mode.
    pub uploads: Vec<UploadOutcome>,
}

/// Deploy `request` over HTTP using its own transport settings.
pub async fn deploy(request: DeploymentRequest) -> DeployResult<DeployReport> {
    request.validate()?;
    let uploader = HttpUploader::new(&TransportOptions::from_request(&request))?;
    deploy_with(request, &uploader).await
}

/// Deploy `request` through an arbitrary [`Uploader`].
///
/// `last_updated` is filled in from the clock (or `MOCK_NEXUS`) when the
/// request doesn't carry one.
pub async fn deploy_with<U: Uploader>(
    mut request: DeploymentRequest,
    uploader: &U,
) -> DeployResult<DeployReport> {
    request.validate()?;
    let last_updated = request
        .last_updated
        .get_or_insert_with(timestamp::last_updated)
        .clone();

    let staged = staging::stage(&request, &last_updated)?;
    let tasks = layout::plan(&request);

    let result = if request.parallel {
        run_parallel(&tasks, &request, uploader).await
    } else {
        run_sequential(&tasks, &request, uploader).await
    };

    let reporter = Reporter::new(request.quiet);
    match result {
        Ok(uploads) => {
            reporter.action(
                "Finished",
                &format!(
                    "uploaded {} files for {}:{}:{}",
                    uploads.len(),
                    request.group_id,
                    request.artifact_id,
                    request.version
                ),
            );
            Ok(DeployReport {
                last_updated,
                staged,
                uploads,
            })
        }
        Err(e) => {
            reporter.error("error", &format!("artifact upload failed: {e}"));
            Err(e)
        }
    }
}

/// Upload one task at a time in plan order, stopping at the first failure.
pub async fn run_sequential<U: Uploader>(
    tasks: &[UploadTask],
    request: &DeploymentRequest,
    uploader: &U,
) -> DeployResult<Vec<UploadOutcome>> {
    let mut outcomes = Vec::with_capacity(tasks.len());
    for task in tasks {
        outcomes.push(upload_one(task, request, uploader).await?);
    }
    Ok(outcomes)
}

/// Drive every upload concurrently and wait for all of them. The error
/// reported is the one from the lowest-index failing task.
pub async fn run_parallel<U: Uploader>(
    tasks: &[UploadTask],
    request: &DeploymentRequest,
    uploader: &U,
) -> DeployResult<Vec<UploadOutcome>> {
    let results = join_all(tasks.iter().map(|task| upload_one(task, request, uploader))).await;
    results.into_iter().collect()
}

async fn upload_one<U: Uploader>(
    task: &UploadTask,
    request: &DeploymentRequest,
    uploader: &U,
) -> DeployResult<UploadOutcome> {
    let url = task.url(request.base_url());
    let reporter = Reporter::new(request.quiet);

    // The artifact is streamed; staged documents are small and read whole.
    let body = match task.kind {
        UploadKind::Artifact => UploadBody::file(&task.local).await.map_err(|source| {
            DeployError::ArtifactRead {
                path: task.local.clone(),
                source,
            }
        })?,
        _ => tokio::fs::read(&task.local)
            .await
            .map(UploadBody::Bytes)
            .map_err(|source| DeployError::StagingIo {
                path: task.local.clone(),
                source,
            })?,
    };

    reporter.action("Uploading", &url);

    match uploader.put(&url, body).await {
        Ok(status) => {
            tracing::debug!("uploaded {} -> {url} ({status})", task.local.display());
            reporter.info(
                "Uploaded",
                &format!("{} with status code {status}", task.local.display()),
            );
            Ok(UploadOutcome {
                task: task.clone(),
                url,
                status,
            })
        }
        Err(e) => {
            tracing::warn!("upload of {} failed: {e}", task.local.display());
            Err(e)
        }
    }
}
