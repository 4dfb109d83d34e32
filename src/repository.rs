//! Repository coordinator
//!
//! A [`PagedRepository`] composes an ordered chain of data sources behind
//! the single [`PagedDataSource`] contract consumers call. Sources are
//! ordered fastest first; the last source is the authoritative one and is
//! expected to answer rather than miss (typically a [`RemotePagedSource`]).
//!
//! On a hit from any source, every faster source is back-filled with the
//! returned page, so the next request for the same window is served closer
//! to the caller.
//!
//! [`RemotePagedSource`]: crate::remote::RemotePagedSource

use crate::cache::types::{Cacheable, ItemKey};
use crate::error::{RepoError, Result};
use crate::page::PaginatedCollection;
use crate::source::PagedDataSource;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Coordinates a chain of paginated data sources.
pub struct PagedRepository<T> {
    sources: Vec<Arc<dyn PagedDataSource<T>>>,
}

impl<T> PagedRepository<T>
where
    T: Cacheable + Clone + Send + Sync + 'static,
{
    /// Create a new builder for a repository chain
    pub fn builder() -> PagedRepositoryBuilder<T> {
        PagedRepositoryBuilder::new()
    }

    /// Requests a window, bypassing every cache layer.
    ///
    /// Goes straight to the authoritative source, back-fills the faster
    /// sources with the result, and returns it. Use after a mutation on the
    /// backing system, or for an explicit user-driven refresh.
    pub async fn get_fresh(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Option<PaginatedCollection<T>>> {
        debug!("Fresh get: offset={} limit={}", offset, limit);

        let last = self.sources.len() - 1;
        let page = self.sources[last].get(offset, limit).await?;

        if let Some(page) = &page {
            self.back_fill(last, page).await?;
        }

        Ok(page)
    }

    /// Pushes a page into every source faster than `hit_index`.
    async fn back_fill(&self, hit_index: usize, page: &PaginatedCollection<T>) -> Result<()> {
        for source in &self.sources[..hit_index] {
            source
                .add_or_update(
                    page.offset(),
                    page.limit(),
                    page.items().to_vec(),
                    page.has_more(),
                )
                .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl<T> PagedDataSource<T> for PagedRepository<T>
where
    T: Cacheable + Clone + Send + Sync + 'static,
{
    /// Tries each source in order and stops at the first non-miss. The
    /// authoritative source's failure, if any, propagates untouched.
    async fn get(&self, offset: usize, limit: usize) -> Result<Option<PaginatedCollection<T>>> {
        for (index, source) in self.sources.iter().enumerate() {
            if let Some(page) = source.get(offset, limit).await? {
                debug!(
                    "Window served by source {}: offset={} limit={}",
                    index, offset, limit
                );

                if index > 0 {
                    self.back_fill(index, &page).await?;
                }
                return Ok(Some(page));
            }
        }

        // Every source missed, including the authoritative one: the data
        // genuinely does not exist.
        debug!("Window missed by all sources: offset={} limit={}", offset, limit);
        Ok(None)
    }

    /// Broadcasts the page to every source in the chain.
    async fn add_or_update(
        &self,
        offset: usize,
        limit: usize,
        items: Vec<T>,
        has_more: bool,
    ) -> Result<()> {
        for source in &self.sources {
            source
                .add_or_update(offset, limit, items.clone(), has_more)
                .await?;
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        for source in &self.sources {
            source.delete_all().await?;
        }
        Ok(())
    }

    async fn delete(&self, keys: &[ItemKey]) -> Result<()> {
        for source in &self.sources {
            source.delete(keys).await?;
        }
        Ok(())
    }
}

/// Builder for a repository chain
pub struct PagedRepositoryBuilder<T> {
    sources: Vec<Arc<dyn PagedDataSource<T>>>,
}

impl<T> PagedRepositoryBuilder<T>
where
    T: Cacheable + Clone + Send + Sync + 'static,
{
    fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Appends a source to the chain. Order matters: fastest first, the
    /// authoritative source last.
    pub fn source(mut self, source: Arc<dyn PagedDataSource<T>>) -> Self {
        self.sources.push(source);
        self
    }

    /// Build the repository, rejecting an empty chain
    pub fn build(self) -> Result<PagedRepository<T>> {
        if self.sources.is_empty() {
            return Err(RepoError::ConfigError(
                "a repository needs at least one source".to_string(),
            ));
        }

        Ok(PagedRepository {
            sources: self.sources,
        })
    }
}

impl<T> Default for PagedRepositoryBuilder<T>
where
    T: Cacheable + Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::config::CacheConfig;
    use crate::cache::store::InMemoryPagedSource;
    use crate::remote::RemotePagedSource;
    use crate::source::PageFetcher;
    use crate::time::ManualClock;
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, PartialEq)]
    struct Record(String);

    impl Cacheable for Record {
        fn cache_key(&self) -> ItemKey {
            self.0.clone()
        }
    }

    /// Fetcher over a fixed dataset that counts how often it is called.
    struct CountingFetcher {
        total: usize,
        calls: AtomicUsize,
    }

    impl CountingFetcher {
        fn new(total: usize) -> Self {
            Self {
                total,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PageFetcher<Record> for CountingFetcher {
        async fn fetch_page(&self, offset: usize, limit: usize) -> Result<PaginatedCollection<Record>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let end = (offset + limit).min(self.total);
            let items: Vec<Record> = (offset..end).map(|i| Record(i.to_string())).collect();
            Ok(PaginatedCollection::new(items, offset, limit, end < self.total))
        }
    }

    struct Fixture {
        repository: PagedRepository<Record>,
        memory: Arc<InMemoryPagedSource<Record>>,
        fetcher: Arc<CountingFetcher>,
        clock: Arc<ManualClock>,
    }

    fn given_chain(ttl: Duration, total: usize) -> Fixture {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = Arc::new(ManualClock::new(start));
        let config = CacheConfig::builder().ttl(ttl).build();
        let memory = Arc::new(InMemoryPagedSource::new(config, clock.clone()));
        let fetcher = Arc::new(CountingFetcher::new(total));
        let remote = Arc::new(RemotePagedSource::new(fetcher.clone()));

        let repository = PagedRepository::builder()
            .source(memory.clone())
            .source(remote)
            .build()
            .expect("chain is non-empty");

        Fixture {
            repository,
            memory,
            fetcher,
            clock,
        }
    }

    #[tokio::test]
    async fn test_empty_chain_is_rejected() {
        let result = PagedRepository::<Record>::builder().build();
        assert!(matches!(result, Err(RepoError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_cold_get_fetches_and_back_fills() {
        let fx = given_chain(Duration::seconds(60), 30);

        let page = fx.repository.get(0, 10).await.unwrap().expect("remote answers");
        assert_eq!(page.len(), 10);
        assert_eq!(fx.fetcher.calls(), 1);

        // The in-memory layer now answers the same window alone.
        let cached = fx.memory.get(0, 10).await.unwrap().expect("back-filled");
        assert_eq!(cached.items(), page.items());
    }

    #[tokio::test]
    async fn test_warm_get_skips_the_remote() {
        let fx = given_chain(Duration::seconds(60), 30);

        fx.repository.get(0, 10).await.unwrap();
        fx.repository.get(0, 10).await.unwrap();
        fx.repository.get(0, 10).await.unwrap();

        assert_eq!(fx.fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_expired_cache_falls_through_to_remote() {
        let fx = given_chain(Duration::seconds(10), 30);

        fx.repository.get(0, 10).await.unwrap();
        fx.clock.advance(Duration::seconds(11));
        fx.repository.get(0, 10).await.unwrap();

        assert_eq!(fx.fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_get_fresh_bypasses_a_fresh_cache() {
        let fx = given_chain(Duration::seconds(60), 30);

        fx.repository.get(0, 10).await.unwrap();
        let page = fx.repository.get_fresh(0, 10).await.unwrap().unwrap();

        assert_eq!(page.len(), 10);
        assert_eq!(fx.fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_mutations_broadcast_to_the_chain() {
        let fx = given_chain(Duration::seconds(60), 30);

        fx.repository.get(0, 10).await.unwrap();
        fx.repository.delete_all().await.unwrap();

        assert!(fx.memory.is_empty().await);

        // Next read goes back to the remote.
        fx.repository.get(0, 10).await.unwrap();
        assert_eq!(fx.fetcher.calls(), 2);
    }
}
