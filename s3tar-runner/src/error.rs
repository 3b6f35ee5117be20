use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum RunnerError {
    #[error("cannot read manifest directory {}: {source}", .path.display())]
    ManifestDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write report {}: {source}", .path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}
