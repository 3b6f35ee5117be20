mod config;
mod error;
mod models;
mod report;
mod services;

use crate::config::RunnerConfig;
use crate::models::archive_job::{failed_jobs, BatchSummary};
use crate::report::BatchReport;
use crate::services::archiver::S3TarArchiver;
use crate::services::orchestrator::{OrchestrateOptions, Orchestrator};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit status when the batch could not start or its report could not be written.
const EXIT_SETUP_ERROR: u8 = 2;

#[derive(Parser, Debug)]
#[command(version, about = "Run s3tar on manifests", long_about = None)]
struct Args {
    /// Directory containing manifest files [env: MANIFEST_DIR, default: /home/ec2-user/data/manifests]
    #[arg(long)]
    manifest_dir: Option<PathBuf>,

    /// Destination S3 bucket name
    #[arg(long, value_parser = clap::builder::NonEmptyStringValueParser::new())]
    dest_bucket: String,

    /// Path to s3tar executable [env: S3TAR_PATH, default: ./s3tar]
    #[arg(long)]
    s3tar_path: Option<PathBuf>,

    /// AWS region [env: AWS_REGION, default: us-east-2]
    #[arg(long)]
    region: Option<String>,

    /// Build each tarball in memory instead of staging parts in S3
    #[arg(long)]
    concat_in_memory: bool,

    /// Maximum s3tar processes running at once [env: MAX_CONCURRENT_JOBS, default: 1]
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    max_concurrent_jobs: Option<u16>,

    /// Write a JSON report of every job to this file
    #[arg(long, value_name = "FILE")]
    report_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error) [env: LOG_LEVEL]
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let config = RunnerConfig::from_env();

    // Initialize logging
    let log_level = args.log_level.as_deref().unwrap_or(&config.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new(log_level))
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(args, config).await {
        Ok(summary) if summary.all_succeeded() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_SETUP_ERROR)
        }
    }
}

async fn run(args: Args, config: RunnerConfig) -> anyhow::Result<BatchSummary> {
    let manifest_dir = args.manifest_dir.unwrap_or(config.manifest_dir);
    let options = OrchestrateOptions {
        region: args.region.unwrap_or(config.region),
        concat_in_memory: args.concat_in_memory,
        max_concurrent_jobs: args
            .max_concurrent_jobs
            .map(usize::from)
            .unwrap_or(config.max_concurrent_jobs),
    };

    let archiver = S3TarArchiver::new(args.s3tar_path.unwrap_or(config.s3tar_path));
    tracing::info!(
        "Starting run-s3tar v{} (s3tar: {}, region: {}, manifests: {})",
        env!("CARGO_PKG_VERSION"),
        archiver.program().display(),
        options.region,
        manifest_dir.display()
    );

    let region = options.region.clone();
    let orchestrator = Orchestrator::new(archiver, options);
    let results = orchestrator
        .orchestrate(&manifest_dir, &args.dest_bucket)
        .await?;

    let summary = BatchSummary::from_results(&results);
    println!("{}", summary);
    for job in failed_jobs(&results) {
        tracing::warn!(job = %job.name, manifest = %job.manifest_path.display(), "Needs retry");
    }

    if let Some(path) = &args.report_file {
        BatchReport::new(&args.dest_bucket, &region, &results).write_to(path)?;
    }

    Ok(summary)
}
