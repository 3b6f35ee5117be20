//! Job discovery: manifest directory entries → `ArchiveJob`s.

use crate::error::RunnerError;
use crate::models::archive_job::ArchiveJob;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const MANIFEST_EXTENSION: &str = ".csv";

/// Archive location for a manifest named `name`.
pub fn destination_uri(dest_bucket: &str, name: &str) -> String {
    format!("s3://{}/tars/{}.tar", dest_bucket, name)
}

/// Turn directory entries into jobs, keeping their order.
///
/// Entries whose file name does not end in `.csv` are skipped. A name that
/// is not valid UTF-8 is kept; its job name and destination use the lossy
/// form while `manifest_path` stays byte-exact.
pub fn jobs_from_paths<I>(paths: I, dest_bucket: &str) -> Vec<ArchiveJob>
where
    I: IntoIterator<Item = PathBuf>,
{
    paths
        .into_iter()
        .filter_map(|manifest_path| {
            let name = manifest_name(manifest_path.file_name()?)?;
            Some(ArchiveJob {
                destination_uri: destination_uri(dest_bucket, &name),
                name,
                manifest_path,
            })
        })
        .collect()
}

/// File name without the manifest extension, or `None` if it has none.
fn manifest_name(file_name: &OsStr) -> Option<String> {
    file_name
        .as_encoded_bytes()
        .strip_suffix(MANIFEST_EXTENSION.as_bytes())?;

    let lossy = file_name.to_string_lossy();
    if file_name.to_str().is_none() {
        tracing::warn!(file = %lossy, "Manifest name is not valid UTF-8");
    }
    // The extension is ASCII, so it survives the lossy conversion intact.
    lossy
        .strip_suffix(MANIFEST_EXTENSION)
        .map(str::to_string)
}

/// List the regular files directly inside `dir`, in directory order.
pub fn list_manifest_dir(dir: &Path) -> Result<Vec<PathBuf>, RunnerError> {
    let dir_error = |source: std::io::Error| RunnerError::ManifestDir {
        path: dir.to_path_buf(),
        source,
    };

    // Surface a missing or unreadable root before walking.
    std::fs::read_dir(dir).map_err(dir_error)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() > 0 => {
                // Broken link or vanished entry: not a manifest.
                tracing::warn!(error = %e, "Skipping unreadable manifest dir entry");
                continue;
            }
            Err(e) => return Err(dir_error(e.into())),
        };

        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Discover every job for `dir`.
pub fn discover_jobs(dir: &Path, dest_bucket: &str) -> Result<Vec<ArchiveJob>, RunnerError> {
    let files = list_manifest_dir(dir)?;
    let jobs = jobs_from_paths(files, dest_bucket);
    tracing::info!(dir = %dir.display(), jobs = jobs.len(), "Discovered manifests");
    Ok(jobs)
}
