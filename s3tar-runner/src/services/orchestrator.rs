//! Batch orchestration: one s3tar run per manifest, failures isolated.
//!
//! Jobs start in discovery order with at most `max_concurrent_jobs` archivers
//! alive at once (1 = strictly sequential). Results always come back in
//! discovery order, one per job, whatever happened to the others.

use crate::config::DEFAULT_REGION;
use crate::error::RunnerError;
use crate::models::archive_job::{ArchiveJob, ArchiveResult, FailureReason, JobOutcome, JobState};
use crate::services::archiver::{ArchiveRequest, Archiver};
use crate::services::discovery::discover_jobs;
use futures_util::stream::{self, StreamExt};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info};

#[derive(Debug, Clone)]
pub struct OrchestrateOptions {
    pub region: String,
    pub concat_in_memory: bool,
    pub max_concurrent_jobs: usize,
}

impl Default for OrchestrateOptions {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            concat_in_memory: false,
            max_concurrent_jobs: 1,
        }
    }
}

pub struct Orchestrator<A> {
    archiver: A,
    options: OrchestrateOptions,
}

impl<A: Archiver> Orchestrator<A> {
    pub fn new(archiver: A, options: OrchestrateOptions) -> Self {
        Self { archiver, options }
    }

    /// Discover the manifests in `manifest_dir` and archive each into `dest_bucket`.
    pub async fn orchestrate(
        &self,
        manifest_dir: &Path,
        dest_bucket: &str,
    ) -> Result<Vec<ArchiveResult>, RunnerError> {
        let jobs = discover_jobs(manifest_dir, dest_bucket)?;
        Ok(self.run_all(jobs).await)
    }

    pub async fn run_all(&self, jobs: Vec<ArchiveJob>) -> Vec<ArchiveResult> {
        let limit = self.options.max_concurrent_jobs.max(1);
        info!(jobs = jobs.len(), max_concurrent_jobs = limit, "Starting archive batch");

        stream::iter(jobs)
            .map(|job| {
                debug!(job = %job.name, state = %JobState::Pending, "Queued manifest");
                self.run_job(job)
            })
            .buffered(limit)
            .collect()
            .await
    }

    /// Run a single job to a terminal state. Never fails: errors become a `Failed` outcome.
    pub async fn run_job(&self, job: ArchiveJob) -> ArchiveResult {
        let start_time = Instant::now();
        info!(job = %job.name, state = %JobState::Running, destination = %job.destination_uri, "Archiving manifest");

        let request = ArchiveRequest {
            region: &self.options.region,
            destination_uri: &job.destination_uri,
            manifest_path: &job.manifest_path,
            concat_in_memory: self.options.concat_in_memory,
        };

        let outcome = match self.archiver.run(request).await {
            Ok(exit) if exit.success() => JobOutcome::Succeeded,
            Ok(exit) => JobOutcome::Failed(FailureReason::ExitCode(exit.code)),
            Err(e) => JobOutcome::Failed(FailureReason::Launch(e.to_string())),
        };

        let result = ArchiveResult {
            job,
            outcome,
            duration: start_time.elapsed(),
        };

        match &result.outcome {
            JobOutcome::Succeeded => info!(
                job = %result.job.name,
                state = %result.outcome.state(),
                duration_ms = result.duration.as_millis() as u64,
                "Archive created"
            ),
            JobOutcome::Failed(reason) => error!(
                job = %result.job.name,
                state = %result.outcome.state(),
                manifest = %result.job.manifest_path.display(),
                reason = %reason,
                "Archive failed"
            ),
        }
        println!("{}", result.status_line());

        result
    }
}
