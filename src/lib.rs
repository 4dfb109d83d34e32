//! # pagerepo
//!
//! A paginated repository layer: windowed collections of items served from
//! an ordered chain of data sources, with TTL-based in-memory caching in
//! front and an authoritative source at the back.
//!
//! ## Features
//!
//! - Windowed pagination addressed by (offset, limit)
//! - In-memory cache that merges overlapping pages by identity key
//! - Per-source TTL freshness with an injectable clock for deterministic tests
//! - Source composition with automatic back-fill of faster layers
//! - Async-first design using tokio
//!
//! ## Getting a page through a chain
//!
//! ```no_run
//! use pagerepo::{
//!     CacheConfig, Cacheable, InMemoryPagedSource, ItemKey, PagedDataSource,
//!     PagedRepository, PageFetcher, PaginatedCollection, RemotePagedSource, Result,
//! };
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! #[derive(Clone)]
//! struct Hipster {
//!     id: String,
//!     name: String,
//! }
//!
//! impl Cacheable for Hipster {
//!     fn cache_key(&self) -> ItemKey {
//!         self.id.clone()
//!     }
//! }
//!
//! struct ApiFetcher;
//!
//! #[async_trait]
//! impl PageFetcher<Hipster> for ApiFetcher {
//!     async fn fetch_page(&self, offset: usize, limit: usize) -> Result<PaginatedCollection<Hipster>> {
//!         // Call your transport here.
//!         Ok(PaginatedCollection::empty(offset, limit))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let memory = Arc::new(InMemoryPagedSource::with_system_clock(CacheConfig::default()));
//!     let remote = Arc::new(RemotePagedSource::new(Arc::new(ApiFetcher)));
//!
//!     let repository = PagedRepository::builder()
//!         .source(memory)
//!         .source(remote)
//!         .build()?;
//!
//!     // Cold: fetched and back-filled. Warm: served from memory.
//!     if let Some(page) = repository.get(0, 20).await? {
//!         println!("got {} items, has_more={}", page.len(), page.has_more());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Using the cache alone
//!
//! ```
//! use pagerepo::{CacheConfig, InMemoryPagedSource, PagedDataSource};
//! use chrono::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = CacheConfig::builder().ttl(Duration::seconds(10)).build();
//! let source = InMemoryPagedSource::with_system_clock(config);
//!
//! let items: Vec<String> = (0..20).map(|i| i.to_string()).collect();
//! source.add_or_update(0, 20, items, true).await?;
//!
//! let page = source.get(0, 20).await?.expect("fresh window");
//! assert_eq!(page.len(), 20);
//! assert!(page.has_more());
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod error;
pub mod page;
pub mod remote;
pub mod repository;
pub mod source;
pub mod time;

// Re-export main types for convenience
pub use cache::{
    start_auto_evict, CacheConfig, CacheConfigBuilder, Cacheable, CacheStats, CachedEntry,
    InMemoryPagedSource, ItemKey,
};
pub use error::{RepoError, Result};
pub use page::PaginatedCollection;
pub use remote::RemotePagedSource;
pub use repository::{PagedRepository, PagedRepositoryBuilder};
pub use source::{PagedDataSource, PageFetcher};
pub use time::{ManualClock, SystemClock, TimeProvider};
