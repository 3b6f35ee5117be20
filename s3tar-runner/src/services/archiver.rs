//! The s3tar process boundary.
//!
//! [`Archiver`] is the only place the orchestrator touches the outside
//! world; tests swap in scripted exit codes.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Arguments for one s3tar invocation.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveRequest<'a> {
    pub region: &'a str,
    pub destination_uri: &'a str,
    pub manifest_path: &'a Path,
    pub concat_in_memory: bool,
}

/// Exit status of a finished archiver process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiverExit {
    /// None when the process was killed by a signal
    pub code: Option<i32>,
}

impl ArchiverExit {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ArchiverExit {
    fn from(status: std::process::ExitStatus) -> Self {
        Self { code: status.code() }
    }
}

#[async_trait]
pub trait Archiver: Send + Sync {
    /// Run the archiver to completion. `Err` means it never started.
    async fn run(&self, request: ArchiveRequest<'_>) -> std::io::Result<ArchiverExit>;
}

/// `s3tar --region <region> -cvf <destination> -m <manifest> [--concat-in-memory]`
pub fn command_args(request: &ArchiveRequest<'_>) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "--region".into(),
        request.region.into(),
        "-cvf".into(),
        request.destination_uri.into(),
        "-m".into(),
        request.manifest_path.into(),
    ];
    if request.concat_in_memory {
        args.push("--concat-in-memory".into());
    }
    args
}

/// Human-readable command line for the `Running:` log line.
pub fn command_line(program: &Path, request: &ArchiveRequest<'_>) -> String {
    std::iter::once(program.as_os_str().to_owned())
        .chain(command_args(request))
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Spawns the real s3tar binary.
pub struct S3TarArchiver {
    program: PathBuf,
}

impl S3TarArchiver {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

#[async_trait]
impl Archiver for S3TarArchiver {
    async fn run(&self, request: ArchiveRequest<'_>) -> std::io::Result<ArchiverExit> {
        println!("Running: {}", command_line(&self.program, &request));

        // stdout/stderr are inherited so `-v` output reaches the operator.
        let status = Command::new(&self.program)
            .args(command_args(&request))
            .kill_on_drop(true)
            .status()
            .await?;

        Ok(status.into())
    }
}
