//! The seam between the listing pipeline and the upstream content API.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::content::{Author, Category, Post, Tag};
use crate::domain::filter::FilterSelection;

/// Filter identifiers forwarded verbatim to the posts lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilters {
    pub author: Option<String>,
    pub tag: Option<String>,
    pub category: Option<String>,
}

impl From<&FilterSelection> for PostFilters {
    fn from(selection: &FilterSelection) -> Self {
        Self {
            author: selection.author.clone(),
            tag: selection.tag.clone(),
            category: selection.category.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    /// The upstream could not be reached at all (connect/timeout).
    #[error("content API unreachable: {0}")]
    Unreachable(String),
    /// The upstream answered with a non-success status.
    #[error("content API returned status {status} for {resource}")]
    Status { resource: &'static str, status: u16 },
    /// The upstream answered but the payload did not decode.
    #[error("failed to decode {resource} payload: {message}")]
    Decode {
        resource: &'static str,
        message: String,
    },
}

/// Read-only view of the content API. All four operations return the
/// upstream's ordering; rendered-page pagination is never pushed down to
/// this layer — posts matching the filters are fetched eagerly.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn list_posts(&self, filters: &PostFilters) -> Result<Vec<Post>, FetchError>;

    async fn list_authors(&self) -> Result<Vec<Author>, FetchError>;

    async fn list_tags(&self) -> Result<Vec<Tag>, FetchError>;

    async fn list_categories(&self) -> Result<Vec<Category>, FetchError>;

    /// Cheap reachability probe for the health endpoint.
    async fn health_check(&self) -> Result<(), FetchError>;
}
