//! Fetcher-backed data source
//!
//! [`RemotePagedSource`] adapts a [`PageFetcher`] to the [`PagedDataSource`]
//! contract so an authoritative source can terminate a repository chain.
//! Whatever transport sits behind the fetcher is not this crate's concern.

use crate::cache::types::{Cacheable, ItemKey};
use crate::error::Result;
use crate::page::PaginatedCollection;
use crate::source::{PagedDataSource, PageFetcher};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// A data source that answers every window by fetching it.
///
/// `get` never misses on its own: the fetcher either produces a page
/// (possibly empty, possibly shorter than the limit) or fails, and failures
/// propagate to the caller unmodified - retry policy belongs to the fetcher
/// or its caller, not here. Mutation operations are no-ops because the
/// remote system owns its own state.
pub struct RemotePagedSource<T> {
    fetcher: Arc<dyn PageFetcher<T>>,
}

impl<T> RemotePagedSource<T>
where
    T: Send + Sync + 'static,
{
    /// Wraps a fetcher as a chain-terminating source.
    pub fn new(fetcher: Arc<dyn PageFetcher<T>>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl<T> PagedDataSource<T> for RemotePagedSource<T>
where
    T: Cacheable + Clone + Send + Sync + 'static,
{
    async fn get(&self, offset: usize, limit: usize) -> Result<Option<PaginatedCollection<T>>> {
        debug!("Fetching remote page: offset={} limit={}", offset, limit);

        let page = self.fetcher.fetch_page(offset, limit).await?;
        debug!(
            "Remote page fetched: offset={} returned={} has_more={}",
            offset,
            page.len(),
            page.has_more()
        );

        Ok(Some(page))
    }

    async fn add_or_update(
        &self,
        _offset: usize,
        _limit: usize,
        _items: Vec<T>,
        _has_more: bool,
    ) -> Result<()> {
        // Remote state is not writable through this adapter.
        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, _keys: &[ItemKey]) -> Result<()> {
        Ok(())
    }
}
