//! Paginated object listing.
//!
//! [`ObjectLister`] hands out one page at a time: the caller passes back the
//! token of the previous page and stops when a page carries no next token.

pub mod s3;

use crate::utils::errors::Result;
use async_trait::async_trait;

pub use s3::S3Lister;

/// An object as reported by a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedObject {
    pub key: String,
    pub size: u64,
}

/// One page of a listing.
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    pub objects: Vec<ListedObject>,

    /// Continuation token for the next page (None = listing exhausted)
    pub next_token: Option<String>,
}

/// Source of listing pages for a bucket.
#[async_trait]
pub trait ObjectLister: Send + Sync {
    /// Fetch the page following `continuation_token`, or the first page when it is None.
    async fn list_page(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        continuation_token: Option<String>,
    ) -> Result<ListingPage>;
}
