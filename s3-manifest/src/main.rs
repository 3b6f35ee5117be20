//! create-s3-manifest - Main entry point
//!
//! Writes a CSV manifest of every object in an S3 bucket.

use anyhow::Result;
use clap::Parser;
use s3_manifest::{config::Config, generate, listing::S3Lister, utils, GenerateRequest};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Create S3 manifest from bucket", long_about = None)]
struct Args {
    /// S3 bucket name to create manifest for
    #[arg(value_parser = clap::builder::NonEmptyStringValueParser::new())]
    bucket_name: String,

    /// Output CSV file name
    #[arg(long, default_value = "s3_manifest.csv")]
    output_file: PathBuf,

    /// Only list keys starting with this prefix
    #[arg(long)]
    prefix: Option<String>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Load configuration
    let config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => Config::default(),
    };

    // Initialize logging
    let log_level = args.log_level.as_deref().unwrap_or(&config.log.level);
    utils::logger::init(log_level)?;

    tracing::info!(
        "Starting create-s3-manifest v{} (bucket: {})",
        env!("CARGO_PKG_VERSION"),
        args.bucket_name
    );

    let lister = S3Lister::from_config(&config.s3).await;
    let request = GenerateRequest {
        bucket: args.bucket_name,
        prefix: args.prefix,
        output_path: args.output_file,
    };

    println!("Generating manifest for bucket: {}...", request.bucket);

    match generate(&lister, &request).await {
        Ok(outcome) => {
            println!("{}", outcome);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("{}", e.operator_line());
            Ok(ExitCode::FAILURE)
        }
    }
}
