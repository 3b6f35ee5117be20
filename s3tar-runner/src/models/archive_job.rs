use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

// ── ArchiveJob ──

/// One manifest-to-archive unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveJob {
    pub name: String,
    pub manifest_path: PathBuf,
    pub destination_uri: String,
}

// ── JobState ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobState::Pending => "pending",
            JobState::Running => "running",
            JobState::Succeeded => "succeeded",
            JobState::Failed => "failed",
        };
        f.write_str(s)
    }
}

// ── JobOutcome ──

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Succeeded,
    Failed(FailureReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// s3tar ran and exited non-zero (None = killed by a signal)
    ExitCode(Option<i32>),
    /// s3tar could not be started
    Launch(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::ExitCode(Some(code)) => write!(f, "exited with status {}", code),
            FailureReason::ExitCode(None) => f.write_str("terminated by signal"),
            FailureReason::Launch(e) => write!(f, "failed to launch: {}", e),
        }
    }
}

impl JobOutcome {
    pub fn state(&self) -> JobState {
        match self {
            JobOutcome::Succeeded => JobState::Succeeded,
            JobOutcome::Failed(_) => JobState::Failed,
        }
    }
}

// ── ArchiveResult ──

#[derive(Debug, Clone)]
pub struct ArchiveResult {
    pub job: ArchiveJob,
    pub outcome: JobOutcome,
    pub duration: Duration,
}

impl ArchiveResult {
    pub fn is_success(&self) -> bool {
        self.outcome == JobOutcome::Succeeded
    }

    /// Operator-facing status line.
    pub fn status_line(&self) -> String {
        match &self.outcome {
            JobOutcome::Succeeded => format!("✅ Success: {}", self.job.name),
            JobOutcome::Failed(_) => format!("❌ Failed: {}", self.job.name),
        }
    }
}

// ── BatchSummary ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[ArchiveResult]) -> Self {
        let succeeded = results.iter().filter(|r| r.is_success()).count();
        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} manifests: {} succeeded, {} failed",
            self.total, self.succeeded, self.failed
        )
    }
}

/// Jobs worth a manual retry, in run order.
pub fn failed_jobs(results: &[ArchiveResult]) -> Vec<&ArchiveJob> {
    results
        .iter()
        .filter(|r| !r.is_success())
        .map(|r| &r.job)
        .collect()
}
