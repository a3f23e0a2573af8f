//! The page-fetching collaborator a paginator drives

use super::page::{Page, PageRequest};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Performs one list call for one page
///
/// Implementations carry whatever context the call needs (client, path,
/// credentials). A failed fetch is returned as-is; the paginator never
/// retries on its own.
#[async_trait]
pub trait PageFetcher<T>: Send + Sync {
    /// Fetch the page identified by `request`
    async fn fetch(&self, request: &PageRequest) -> Result<Page<T>>;
}

#[async_trait]
impl<T, F> PageFetcher<T> for &F
where
    T: Send + 'static,
    F: PageFetcher<T> + ?Sized,
{
    async fn fetch(&self, request: &PageRequest) -> Result<Page<T>> {
        (**self).fetch(request).await
    }
}

#[async_trait]
impl<T, F> PageFetcher<T> for Arc<F>
where
    T: Send + 'static,
    F: PageFetcher<T> + ?Sized,
{
    async fn fetch(&self, request: &PageRequest) -> Result<Page<T>> {
        (**self).fetch(request).await
    }
}
