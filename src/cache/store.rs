//! In-memory paginated source with TTL-based expiry and page merging
//!
//! This is the authoritative in-process cache behind a repository chain.
//! Pages are merged by identity key rather than by position, so overlapping
//! or re-fetched windows correct earlier data without duplicating entries.
//! Logical position comes from a dedicated ordered index; the key map alone
//! has no ordering guarantee.

use crate::cache::config::CacheConfig;
use crate::cache::entry::CachedEntry;
use crate::cache::types::{Cacheable, CacheStats, ItemKey};
use crate::error::{RepoError, Result};
use crate::page::PaginatedCollection;
use crate::source::PagedDataSource;
use crate::time::TimeProvider;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// TTL-expiring in-memory cache of paginated items.
///
/// All mutation happens under one write lock over the map and the ordered
/// index together, so concurrent `add_or_update` calls serialize and every
/// `get` observes a consistent snapshot.
pub struct InMemoryPagedSource<T> {
    /// Cache configuration (the TTL)
    config: CacheConfig,

    /// Clock used for freshness checks
    clock: Arc<dyn TimeProvider>,

    /// Internal storage
    store: Arc<RwLock<PageStore<T>>>,
}

/// Internal storage: the ordered index and the key map move together.
struct PageStore<T> {
    /// Insertion order of keys; index position = logical position
    order: Vec<ItemKey>,

    /// Main storage: key -> entry
    entries: HashMap<ItemKey, CachedEntry<T>>,

    /// hasMore flags keyed by the trailing edge of each stored page
    page_ends: HashMap<usize, bool>,

    /// hasMore of the most recently added page; fallback for windows whose
    /// trailing edge was never recorded
    last_has_more: bool,

    /// Hit/miss statistics
    stats: CacheStats,
}

impl<T> PageStore<T> {
    fn new() -> Self {
        Self {
            order: Vec::new(),
            entries: HashMap::new(),
            page_ends: HashMap::new(),
            last_has_more: false,
            stats: CacheStats::default(),
        }
    }

    /// Shifts recorded hasMore boundaries down to match a compacted index.
    ///
    /// Each boundary moves left by the number of removed positions below
    /// it, so a flag keeps describing the same trailing item after the
    /// survivors close ranks. A boundary that collapses to zero no longer
    /// ends any stored page and is dropped; when two boundaries land on
    /// the same position, the one closer to the collection's end wins.
    fn remap_boundaries(&mut self, removed_positions: &[usize]) {
        if removed_positions.is_empty() || self.page_ends.is_empty() {
            return;
        }

        let mut boundaries: Vec<(usize, bool)> = self.page_ends.drain().collect();
        boundaries.sort_unstable_by_key(|(boundary, _)| *boundary);

        for (boundary, flag) in boundaries {
            let shift = removed_positions
                .iter()
                .filter(|position| **position < boundary)
                .count();
            let remapped = boundary - shift;
            if remapped > 0 {
                self.page_ends.insert(remapped, flag);
            }
        }
    }
}

impl<T> InMemoryPagedSource<T>
where
    T: Cacheable + Clone + Send + Sync + 'static,
{
    /// Creates a source with the given configuration and clock.
    pub fn new(config: CacheConfig, clock: Arc<dyn TimeProvider>) -> Self {
        info!("Initializing in-memory paged source, ttl_ms={}", config.ttl_ms);

        Self {
            config,
            clock,
            store: Arc::new(RwLock::new(PageStore::new())),
        }
    }

    /// Creates a source driven by the wall clock.
    pub fn with_system_clock(config: CacheConfig) -> Self {
        Self::new(config, Arc::new(crate::time::SystemClock))
    }

    /// Number of entries currently stored, including physically retained
    /// expired ones.
    pub async fn len(&self) -> usize {
        let inner = self.store.read().await;
        inner.order.len()
    }

    /// True when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        let inner = self.store.read().await;
        inner.order.is_empty()
    }

    /// Current statistics snapshot.
    pub async fn stats(&self) -> CacheStats {
        let inner = self.store.read().await;
        inner.stats.clone()
    }

    /// Physically removes expired entries, compacting the ordered index.
    ///
    /// Expired entries are normally left in place so logical positions stay
    /// stable; this pass trades that stability for memory, with the same
    /// survivor-order semantics as [`delete`](PagedDataSource::delete).
    /// Returns the number of entries removed.
    pub async fn evict_expired(&self) -> usize {
        let now = self.clock.now();
        let ttl = self.config.ttl();

        let mut guard = self.store.write().await;
        let inner = &mut *guard;

        let expired: Vec<ItemKey> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now, ttl))
            .map(|(key, _)| key.clone())
            .collect();

        if expired.is_empty() {
            return 0;
        }

        for key in &expired {
            inner.entries.remove(key);
        }

        let removed_positions: Vec<usize> = inner
            .order
            .iter()
            .enumerate()
            .filter(|(_, key)| !inner.entries.contains_key(*key))
            .map(|(position, _)| position)
            .collect();

        inner.order.retain(|key| inner.entries.contains_key(key));
        inner.remap_boundaries(&removed_positions);

        inner.stats.invalidations += expired.len() as u64;
        inner.stats.entries = inner.entries.len();

        debug!("Evicted {} expired entries", expired.len());
        expired.len()
    }
}

#[async_trait]
impl<T> PagedDataSource<T> for InMemoryPagedSource<T>
where
    T: Cacheable + Clone + Send + Sync + 'static,
{
    async fn get(&self, offset: usize, limit: usize) -> Result<Option<PaginatedCollection<T>>> {
        if limit == 0 {
            return Err(RepoError::InvalidRequest(
                "limit must be greater than 0".to_string(),
            ));
        }

        let now = self.clock.now();
        let ttl = self.config.ttl();

        let mut guard = self.store.write().await;
        let inner = &mut *guard;

        // Always-stale policy: a non-positive TTL never serves from cache.
        if self.config.is_passthrough() {
            inner.stats.misses += 1;
            debug!("Window miss (passthrough ttl): offset={} limit={}", offset, limit);
            return Ok(None);
        }

        if offset >= inner.order.len() {
            inner.stats.misses += 1;
            debug!(
                "Window miss (offset {} beyond {} stored): limit={}",
                offset,
                inner.order.len(),
                limit
            );
            return Ok(None);
        }

        let end = (offset + limit).min(inner.order.len());
        let mut values = Vec::with_capacity(end - offset);

        for key in &inner.order[offset..end] {
            match inner.entries.get(key) {
                None => {
                    // Index/map drift; treated as absent data, not a fault.
                    warn!("Key {} present in index but not in map", key);
                    inner.stats.misses += 1;
                    return Ok(None);
                }
                Some(entry) if entry.is_expired(now, ttl) => {
                    // One stale item invalidates the whole window: a partial
                    // page must never be presented as complete.
                    inner.stats.misses += 1;
                    inner.stats.expired += 1;
                    debug!("Window miss (expired key {}): offset={} limit={}", key, offset, limit);
                    return Ok(None);
                }
                Some(entry) => values.push(entry.value().clone()),
            }
        }

        let has_more = match inner.page_ends.get(&end) {
            Some(flag) => *flag,
            // More cached items demonstrably exist past this window.
            None if end < inner.order.len() => true,
            None => inner.last_has_more,
        };

        inner.stats.hits += 1;
        debug!(
            "Window hit: offset={} limit={} returned={} has_more={}",
            offset,
            limit,
            values.len(),
            has_more
        );

        Ok(Some(PaginatedCollection::new(values, offset, limit, has_more)))
    }

    async fn add_or_update(
        &self,
        offset: usize,
        limit: usize,
        items: Vec<T>,
        has_more: bool,
    ) -> Result<()> {
        let now = self.clock.now();
        let boundary = offset + items.len();

        let mut guard = self.store.write().await;
        let inner = &mut *guard;

        debug!(
            "Storing page: offset={} limit={} items={} has_more={}",
            offset,
            limit,
            items.len(),
            has_more
        );

        for item in items {
            let key = item.cache_key();
            match inner.entries.get_mut(&key) {
                // Existing key: refresh in place, position unchanged. This
                // also makes the last occurrence win for duplicate keys
                // within a single call.
                Some(entry) => entry.refresh(item, now),
                None => {
                    inner.order.push(key.clone());
                    inner.entries.insert(key, CachedEntry::new(item, now));
                }
            }
        }

        inner.page_ends.insert(boundary, has_more);
        inner.last_has_more = has_more;
        inner.stats.entries = inner.entries.len();

        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        let mut inner = self.store.write().await;

        let count = inner.order.len();
        inner.order.clear();
        inner.entries.clear();
        inner.page_ends.clear();
        inner.last_has_more = false;
        inner.stats.invalidations += count as u64;
        inner.stats.entries = 0;

        info!("Cleared {} entries", count);
        Ok(())
    }

    /// Removes entries by key. The ordered index compacts: survivors keep
    /// their relative order, and a later `get` over a window that spanned a
    /// deleted key returns the surviving items under the end-of-collection
    /// rule rather than missing. Recorded hasMore boundaries shift left
    /// with the survivors they describe.
    async fn delete(&self, keys: &[ItemKey]) -> Result<()> {
        let mut guard = self.store.write().await;
        let inner = &mut *guard;

        let mut removed: HashSet<&ItemKey> = HashSet::new();
        for key in keys {
            if inner.entries.remove(key).is_some() {
                removed.insert(key);
            }
        }

        if removed.is_empty() {
            return Ok(());
        }

        let removed_positions: Vec<usize> = inner
            .order
            .iter()
            .enumerate()
            .filter(|(_, key)| removed.contains(key))
            .map(|(position, _)| position)
            .collect();

        inner.order.retain(|key| !removed.contains(key));
        inner.remap_boundaries(&removed_positions);

        inner.stats.invalidations += removed.len() as u64;
        inner.stats.entries = inner.entries.len();

        debug!("Deleted {} entries by key", removed.len());
        Ok(())
    }
}

/// Background task that periodically evicts expired entries.
///
/// Callers that prefer position-stable storage simply never start this.
pub async fn start_auto_evict<T>(source: Arc<InMemoryPagedSource<T>>, interval: std::time::Duration)
where
    T: Cacheable + Clone + Send + Sync + 'static,
{
    info!("Starting automatic eviction task (interval: {:?})", interval);

    loop {
        tokio::time::sleep(interval).await;

        let evicted = source.evict_expired().await;
        if evicted > 0 {
            debug!("Auto eviction removed {} entries", evicted);
        }
    }
}
