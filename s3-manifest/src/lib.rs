//! S3 Manifest Library
//!
//! Lists the objects of an S3 bucket page by page and writes them to a CSV
//! manifest consumed by `s3tar`.

pub mod config;
pub mod generator;
pub mod listing;
pub mod manifest;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use generator::{generate, GenerateOutcome, GenerateRequest};
pub use manifest::ManifestRecord;
pub use utils::errors::ListingError;
pub type Result<T> = std::result::Result<T, ListingError>;
