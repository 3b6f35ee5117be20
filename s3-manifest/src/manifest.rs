//! Manifest records and the CSV file format read by `s3tar -m`.
//!
//! ```text
//! Bucket,Key,Content-Length
//! <bucket>,<key>,<integer>
//! ```
//!
//! Keys containing the delimiter, quotes or newlines are quoted per RFC 4180.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// Header row, spelled exactly as `s3tar` expects it.
pub const MANIFEST_HEADER: [&str; 3] = ["Bucket", "Key", "Content-Length"];

/// One object in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRecord {
    #[serde(rename = "Bucket")]
    pub bucket: String,

    #[serde(rename = "Key")]
    pub key: String,

    #[serde(rename = "Content-Length")]
    pub content_length: u64,
}

impl ManifestRecord {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>, content_length: u64) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            content_length,
        }
    }
}

/// Write `records` to `path`, replacing any existing file.
///
/// Rows go to `<path>.tmp` first and are renamed into place after a flush,
/// so `path` either keeps its old content or holds the complete manifest.
pub fn write_manifest(path: &Path, records: &[ManifestRecord]) -> io::Result<()> {
    let tmp_path = temp_path_for(path);

    let result = write_rows(&tmp_path, records).and_then(|()| std::fs::rename(&tmp_path, path));
    if result.is_err() {
        let _ = std::fs::remove_file(&tmp_path);
    }
    result
}

fn write_rows(path: &Path, records: &[ManifestRecord]) -> io::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(path)?;

    // Written by hand so the header exists even for an empty slice.
    writer.write_record(MANIFEST_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a manifest back into records, checking the header.
pub fn read_manifest(path: &Path) -> io::Result<Vec<ManifestRecord>> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?;
    if headers.iter().ne(MANIFEST_HEADER.iter().copied()) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("unexpected manifest header in {}: {:?}", path.display(), headers),
        ));
    }

    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut tmp: OsString = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}
