//! Data-source capability contracts
//!
//! [`PagedDataSource`] is the polymorphic contract every source variant
//! implements: the in-memory cache, the remote adapter, and the repository
//! coordinator itself. A miss is signalled with `Ok(None)`; errors are
//! reserved for real failures.
//!
//! [`PageFetcher`] is the consumed capability on the authoritative side -
//! whatever actually produces pages (an HTTP client, a database reader, a
//! fixture in tests). Transport concerns live entirely behind it.

use crate::cache::types::{Cacheable, ItemKey};
use crate::error::Result;
use crate::page::PaginatedCollection;
use async_trait::async_trait;

/// A source of paginated data addressed by (offset, limit) windows.
#[async_trait]
pub trait PagedDataSource<T>: Send + Sync
where
    T: Cacheable + Clone + Send + Sync + 'static,
{
    /// Requests a window. `Ok(None)` means the window cannot be satisfied
    /// from this source's current state - no data, out of range, or stale.
    async fn get(&self, offset: usize, limit: usize) -> Result<Option<PaginatedCollection<T>>>;

    /// Records or merges a page into this source's state, associating
    /// `has_more` with the trailing edge of the stored window.
    async fn add_or_update(
        &self,
        offset: usize,
        limit: usize,
        items: Vec<T>,
        has_more: bool,
    ) -> Result<()>;

    /// Clears all stored state unconditionally.
    async fn delete_all(&self) -> Result<()>;

    /// Removes specific entries by identity key.
    async fn delete(&self, keys: &[ItemKey]) -> Result<()>;
}

/// The authoritative page producer a repository delegates to.
///
/// Unlike [`PagedDataSource::get`], a fetch has no miss channel: the
/// authoritative source either answers (possibly with an empty page) or
/// fails, and failures propagate to the caller unchanged.
#[async_trait]
pub trait PageFetcher<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    /// Produces the page for the requested window.
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<PaginatedCollection<T>>;
}
