//! Error types for manifest generation.

use thiserror::Error;

/// Why a listing run produced no manifest.
///
/// Every variant is terminal for the run: the listing loop stops at the
/// first one and nothing is written.
#[derive(Error, Debug)]
pub enum ListingError {
    #[error("Invalid bucket name: {0:?}")]
    InvalidBucket(String),

    #[error("Bucket '{bucket}' does not exist.")]
    BucketNotFound { bucket: String },

    #[error("Access denied to bucket '{bucket}'. Check your AWS credentials and permissions.")]
    AccessDenied { bucket: String },

    #[error("An AWS S3 error occurred: {0}")]
    Backend(String),

    #[error("An unexpected error occurred: {0}")]
    Unknown(String),
}

impl ListingError {
    /// Short machine-readable category, used in logs.
    pub fn category(&self) -> &'static str {
        match self {
            ListingError::InvalidBucket(_) => "invalid_bucket",
            ListingError::BucketNotFound { .. } => "bucket_not_found",
            ListingError::AccessDenied { .. } => "access_denied",
            ListingError::Backend(_) => "backend_error",
            ListingError::Unknown(_) => "unknown_error",
        }
    }

    /// The line printed to the operator when a run fails.
    ///
    /// Bucket and input errors carry an `Error: ` prefix; backend and
    /// unexpected errors are printed bare.
    pub fn operator_line(&self) -> String {
        match self {
            ListingError::Backend(_) | ListingError::Unknown(_) => self.to_string(),
            _ => format!("Error: {}", self),
        }
    }
}

impl From<std::io::Error> for ListingError {
    fn from(e: std::io::Error) -> Self {
        ListingError::Unknown(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ListingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_are_unknown() {
        let err: ListingError = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert_eq!(err.category(), "unknown_error");
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_messages_name_the_bucket() {
        let err = ListingError::BucketNotFound { bucket: "demo".to_string() };
        assert_eq!(err.to_string(), "Bucket 'demo' does not exist.");

        let err = ListingError::AccessDenied { bucket: "demo".to_string() };
        assert!(err.to_string().starts_with("Access denied to bucket 'demo'"));
    }

    #[test]
    fn test_operator_line_prefix() {
        let err = ListingError::BucketNotFound { bucket: "demo".to_string() };
        assert_eq!(err.operator_line(), "Error: Bucket 'demo' does not exist.");

        let err = ListingError::AccessDenied { bucket: "demo".to_string() };
        assert!(err.operator_line().starts_with("Error: Access denied to bucket 'demo'"));

        let err = ListingError::Backend("SlowDown".to_string());
        assert_eq!(err.operator_line(), "An AWS S3 error occurred: SlowDown");

        let err = ListingError::Unknown("disk full".to_string());
        assert_eq!(err.operator_line(), "An unexpected error occurred: disk full");
    }
}
