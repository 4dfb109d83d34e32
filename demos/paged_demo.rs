//! Walkthrough of a memory-then-remote repository chain.
//!
//! Run with: cargo run --example paged_demo

use async_trait::async_trait;
use chrono::Duration;
use pagerepo::{
    CacheConfig, Cacheable, InMemoryPagedSource, ItemKey, ManualClock, PageFetcher,
    PagedDataSource, PagedRepository, PaginatedCollection, RemotePagedSource, Result,
};
use std::sync::Arc;

#[derive(Debug, Clone)]
struct Hipster {
    id: String,
    name: String,
}

impl Cacheable for Hipster {
    fn cache_key(&self) -> ItemKey {
        self.id.clone()
    }
}

/// Stands in for a remote API serving a fixed roster of 45 hipsters.
struct RosterFetcher;

#[async_trait]
impl PageFetcher<Hipster> for RosterFetcher {
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<PaginatedCollection<Hipster>> {
        println!("  [backend] fetching offset={} limit={}", offset, limit);

        let total = 45;
        let end = (offset + limit).min(total);
        let items: Vec<Hipster> = (offset..end)
            .map(|i| Hipster {
                id: i.to_string(),
                name: format!("Hipster #{}", i),
            })
            .collect();

        Ok(PaginatedCollection::new(items, offset, limit, end < total))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pagerepo=debug".into()),
        )
        .init();

    // A manual clock so expiry can be demonstrated without sleeping.
    let clock = Arc::new(ManualClock::from_system_time());

    let config = CacheConfig::builder().ttl(Duration::seconds(30)).build();
    let memory = Arc::new(InMemoryPagedSource::new(config, clock.clone()));
    let remote = Arc::new(RemotePagedSource::new(Arc::new(RosterFetcher)));

    let repository = PagedRepository::builder()
        .source(memory.clone())
        .source(remote)
        .build()?;

    println!("cold read (hits the backend):");
    let page = repository.get(0, 20).await?.expect("backend answers");
    println!("  got {} items, has_more={}", page.len(), page.has_more());

    println!("warm read (served from memory):");
    let page = repository.get(0, 20).await?.expect("cache answers");
    println!("  got {} items, has_more={}", page.len(), page.has_more());

    println!("scrolling to the next window:");
    let page = repository.get(20, 20).await?.expect("backend answers");
    println!("  got {} items, has_more={}", page.len(), page.has_more());

    println!("last window (shorter than the limit):");
    let page = repository.get(40, 20).await?.expect("backend answers");
    println!("  got {} items, has_more={}", page.len(), page.has_more());

    println!("advancing the clock past the TTL...");
    clock.advance(Duration::seconds(31));

    println!("expired read (falls through to the backend again):");
    let page = repository.get(0, 20).await?.expect("backend answers");
    println!("  got {} items, has_more={}", page.len(), page.has_more());

    let stats = memory.stats().await;
    println!("cache stats: {}", stats);

    Ok(())
}
