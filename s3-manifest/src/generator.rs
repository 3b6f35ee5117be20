//! Manifest generation: drain a bucket listing, then write one manifest.
//!
//! Nothing touches the output path until the last page has arrived, so a
//! listing failure on any page leaves no file behind.

use crate::listing::ObjectLister;
use crate::manifest::{write_manifest, ManifestRecord};
use crate::utils::errors::{ListingError, Result};
use std::fmt;
use std::path::PathBuf;
use tracing::{error, info};

/// What to list and where to write it.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub bucket: String,
    pub prefix: Option<String>,
    pub output_path: PathBuf,
}

/// Non-error result of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// Manifest written with this many rows
    Written { path: PathBuf, records: usize },

    /// Listing was empty; no file was created
    NoObjects { bucket: String },
}

impl fmt::Display for GenerateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateOutcome::Written { path, .. } => {
                write!(f, "Manifest created successfully: {}", path.display())
            }
            GenerateOutcome::NoObjects { bucket } => write!(
                f,
                "No objects found in bucket: {}. No manifest file was created.",
                bucket
            ),
        }
    }
}

/// Collect every object of `request.bucket` page by page.
pub async fn collect_records<L>(lister: &L, request: &GenerateRequest) -> Result<Vec<ManifestRecord>>
where
    L: ObjectLister + ?Sized,
{
    if request.bucket.trim().is_empty() {
        return Err(ListingError::InvalidBucket(request.bucket.clone()));
    }

    let mut records = Vec::new();
    let mut token: Option<String> = None;
    let mut pages: u64 = 0;

    loop {
        let page = lister
            .list_page(&request.bucket, request.prefix.as_deref(), token.take())
            .await?;
        pages += 1;

        records.extend(
            page.objects
                .into_iter()
                .map(|obj| ManifestRecord::new(request.bucket.as_str(), obj.key, obj.size)),
        );

        match page.next_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }

    info!(
        bucket = %request.bucket,
        pages,
        records = records.len(),
        "Listing complete"
    );

    Ok(records)
}

/// List the bucket and write the manifest if anything was found.
pub async fn generate<L>(lister: &L, request: &GenerateRequest) -> Result<GenerateOutcome>
where
    L: ObjectLister + ?Sized,
{
    let records = collect_records(lister, request).await.map_err(|e| {
        error!(bucket = %request.bucket, category = e.category(), error = %e, "Listing failed");
        e
    })?;

    if records.is_empty() {
        return Ok(GenerateOutcome::NoObjects {
            bucket: request.bucket.clone(),
        });
    }

    write_manifest(&request.output_path, &records)?;
    info!(
        path = %request.output_path.display(),
        records = records.len(),
        "Manifest written"
    );

    Ok(GenerateOutcome::Written {
        path: request.output_path.clone(),
        records: records.len(),
    })
}
