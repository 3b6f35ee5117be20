//! JSON batch report, written on request for operators and retry tooling.

use crate::error::RunnerError;
use crate::models::archive_job::{ArchiveResult, BatchSummary, FailureReason, JobOutcome, JobState};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct BatchReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub dest_bucket: &'a str,
    pub region: &'a str,
    pub summary: BatchSummary,
    pub jobs: Vec<JobReport<'a>>,
}

#[derive(Debug, Serialize)]
pub struct JobReport<'a> {
    pub name: &'a str,
    pub manifest_path: &'a Path,
    pub destination_uri: &'a str,
    pub state: JobState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_ms: u64,
}

impl<'a> JobReport<'a> {
    fn from_result(result: &'a ArchiveResult) -> Self {
        let (exit_code, error) = match &result.outcome {
            JobOutcome::Succeeded => (Some(0), None),
            JobOutcome::Failed(reason) => {
                let code = match reason {
                    FailureReason::ExitCode(code) => *code,
                    FailureReason::Launch(_) => None,
                };
                (code, Some(reason.to_string()))
            }
        };

        Self {
            name: &result.job.name,
            manifest_path: &result.job.manifest_path,
            destination_uri: &result.job.destination_uri,
            state: result.outcome.state(),
            exit_code,
            error,
            duration_ms: result.duration.as_millis() as u64,
        }
    }
}

impl<'a> BatchReport<'a> {
    pub fn new(dest_bucket: &'a str, region: &'a str, results: &'a [ArchiveResult]) -> Self {
        Self {
            generated_at: Utc::now(),
            dest_bucket,
            region,
            summary: BatchSummary::from_results(results),
            jobs: results.iter().map(JobReport::from_result).collect(),
        }
    }

    pub fn write_to(&self, path: &Path) -> Result<(), RunnerError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| RunnerError::Report {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Batch report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::archive_job::ArchiveJob;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::TempDir;

    fn result(name: &str, outcome: JobOutcome) -> ArchiveResult {
        ArchiveResult {
            job: ArchiveJob {
                name: name.to_string(),
                manifest_path: PathBuf::from(format!("/manifests/{name}.csv")),
                destination_uri: format!("s3://archives/tars/{name}.tar"),
            },
            outcome,
            duration: Duration::from_millis(1500),
        }
    }

    #[test]
    fn test_report_lists_failures_for_retry() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("report.json");
        let results = vec![
            result("ok", JobOutcome::Succeeded),
            result("broken", JobOutcome::Failed(FailureReason::ExitCode(Some(3)))),
            result("missing", JobOutcome::Failed(FailureReason::Launch("No such file".into()))),
        ];

        BatchReport::new("archives", "us-east-2", &results).write_to(&path)?;

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(value["summary"]["total"], 3);
        assert_eq!(value["summary"]["failed"], 2);
        assert_eq!(value["jobs"][0]["state"], "succeeded");
        assert_eq!(value["jobs"][1]["name"], "broken");
        assert_eq!(value["jobs"][1]["manifest_path"], "/manifests/broken.csv");
        assert_eq!(value["jobs"][1]["exit_code"], 3);
        assert_eq!(value["jobs"][2]["state"], "failed");
        assert!(value["jobs"][2].get("exit_code").is_none());
        assert_eq!(value["jobs"][0]["duration_ms"], 1500);
        Ok(())
    }

    #[test]
    fn test_unwritable_report_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing/report.json");

        let err = BatchReport::new("archives", "us-east-2", &[]).write_to(&path).unwrap_err();
        assert!(matches!(err, RunnerError::Report { .. }));
    }
}
