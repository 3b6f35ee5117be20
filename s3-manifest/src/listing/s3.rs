//! `ListObjectsV2` adapter backed by the AWS SDK.

use super::{ListedObject, ListingPage, ObjectLister};
use crate::config::S3Config;
use crate::utils::errors::{ListingError, Result};
use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Error;
use tracing::{debug, warn};

/// Lists objects through an `aws_sdk_s3::Client`.
pub struct S3Lister {
    client: aws_sdk_s3::Client,
    page_size: i32,
}

impl S3Lister {
    pub fn new(client: aws_sdk_s3::Client, page_size: i32) -> Self {
        Self { client, page_size }
    }

    /// Build a client from the default provider chain plus config overrides.
    pub async fn from_config(config: &S3Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        let shared = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(url) = &config.endpoint_url {
            builder = builder.endpoint_url(url);
        }
        let force_path_style = config
            .force_path_style
            .unwrap_or(config.endpoint_url.is_some());
        if force_path_style {
            builder = builder.force_path_style(true);
        }

        Self::new(aws_sdk_s3::Client::from_conf(builder.build()), config.page_size)
    }
}

#[async_trait]
impl ObjectLister for S3Lister {
    async fn list_page(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        continuation_token: Option<String>,
    ) -> Result<ListingPage> {
        let mut req = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .max_keys(self.page_size);
        if let Some(p) = prefix {
            req = req.prefix(p);
        }
        if let Some(t) = continuation_token {
            req = req.continuation_token(t);
        }

        let resp = req.send().await.map_err(|e| classify_sdk_error(bucket, e))?;

        let objects: Vec<ListedObject> = resp
            .contents()
            .iter()
            .filter_map(|obj| {
                let Some(key) = obj.key() else {
                    warn!(bucket, size = ?obj.size(), "Skipping listed object without a key");
                    return None;
                };
                // Size is content-length in bytes
                let size = obj.size().unwrap_or(0).max(0) as u64;
                Some(ListedObject { key: key.to_string(), size })
            })
            .collect();

        let next_token = next_page_token(resp.is_truncated(), resp.next_continuation_token())?;

        debug!(
            bucket,
            objects = objects.len(),
            truncated = next_token.is_some(),
            "Fetched listing page"
        );

        Ok(ListingPage { objects, next_token })
    }
}

/// Token for the next request, or `None` once the listing is exhausted.
///
/// A truncated page must carry a token; treating it as the last page would
/// yield a partial manifest.
fn next_page_token(is_truncated: Option<bool>, token: Option<&str>) -> Result<Option<String>> {
    match (is_truncated.unwrap_or(false), token) {
        (false, _) => Ok(None),
        (true, Some(token)) => Ok(Some(token.to_string())),
        (true, None) => Err(ListingError::Backend(
            "truncated listing without continuation token".to_string(),
        )),
    }
}

fn classify_sdk_error(bucket: &str, err: SdkError<ListObjectsV2Error>) -> ListingError {
    let message = DisplayErrorContext(&err).to_string();
    match err.as_service_error() {
        Some(service) if service.is_no_such_bucket() => ListingError::BucketNotFound {
            bucket: bucket.to_string(),
        },
        Some(service) => classify_error_code(bucket, service.code(), message),
        // Credentials, dispatch and timeout failures never reached S3.
        None => ListingError::Unknown(message),
    }
}

/// Map an S3 service error code to a listing error.
fn classify_error_code(bucket: &str, code: Option<&str>, message: String) -> ListingError {
    match code {
        Some("NoSuchBucket") => ListingError::BucketNotFound {
            bucket: bucket.to_string(),
        },
        Some("AccessDenied") => ListingError::AccessDenied {
            bucket: bucket.to_string(),
        },
        _ => ListingError::Backend(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::error::ErrorMetadata;
    use aws_sdk_s3::types::error::NoSuchBucket;
    use aws_smithy_runtime_api::http::{Response, StatusCode};
    use aws_smithy_types::body::SdkBody;

    fn http_response(status: u16) -> Response {
        Response::new(StatusCode::try_from(status).unwrap(), SdkBody::empty())
    }

    #[test]
    fn test_next_page_token() {
        assert_eq!(next_page_token(Some(true), Some("abc")).unwrap(), Some("abc".to_string()));
        assert_eq!(next_page_token(Some(false), None).unwrap(), None);
        assert_eq!(next_page_token(None, None).unwrap(), None);
        // A stray token on the last page is ignored.
        assert_eq!(next_page_token(Some(false), Some("stale")).unwrap(), None);
    }

    #[test]
    fn test_truncated_page_without_token_is_an_error() {
        let err = next_page_token(Some(true), None).unwrap_err();
        assert_eq!(err.category(), "backend_error");
        assert!(err.to_string().contains("truncated listing without continuation token"));
    }

    #[test]
    fn test_sdk_failure_before_the_service_is_unknown() {
        let err: SdkError<ListObjectsV2Error> =
            SdkError::construction_failure("no region was configured");

        match classify_sdk_error("demo", err) {
            ListingError::Unknown(msg) => assert!(msg.contains("no region was configured")),
            other => panic!("expected unknown error, got {other:?}"),
        }
    }

    #[test]
    fn test_no_such_bucket_service_error() {
        let service = ListObjectsV2Error::NoSuchBucket(
            NoSuchBucket::builder().message("The specified bucket does not exist").build(),
        );
        let err = SdkError::service_error(service, http_response(404));

        let err = classify_sdk_error("demo", err);
        assert!(matches!(err, ListingError::BucketNotFound { ref bucket } if bucket == "demo"));
    }

    #[test]
    fn test_generic_service_errors_use_the_code() {
        let denied = ListObjectsV2Error::generic(ErrorMetadata::builder().code("AccessDenied").build());
        let err = classify_sdk_error("demo", SdkError::service_error(denied, http_response(403)));
        assert!(matches!(err, ListingError::AccessDenied { ref bucket } if bucket == "demo"));

        let throttled = ListObjectsV2Error::generic(
            ErrorMetadata::builder()
                .code("SlowDown")
                .message("please reduce your request rate")
                .build(),
        );
        let err = classify_sdk_error("demo", SdkError::service_error(throttled, http_response(503)));
        assert_eq!(err.category(), "backend_error");
    }

    #[test]
    fn test_classify_error_code() {
        let err = classify_error_code("demo", Some("NoSuchBucket"), String::new());
        assert!(matches!(err, ListingError::BucketNotFound { ref bucket } if bucket == "demo"));

        let err = classify_error_code("demo", Some("AccessDenied"), String::new());
        assert!(matches!(err, ListingError::AccessDenied { .. }));

        let err = classify_error_code("demo", Some("SlowDown"), "please reduce your request rate".into());
        match err {
            ListingError::Backend(msg) => assert!(msg.contains("reduce")),
            other => panic!("expected backend error, got {other:?}"),
        }

        assert!(matches!(
            classify_error_code("demo", None, String::new()),
            ListingError::Backend(_)
        ));
    }
}
