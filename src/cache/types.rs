//! Core type definitions for the cache layer

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity key type for cached items - string-based, stable per entity
pub type ItemKey = String;

/// Capability contract for any entity that can live in the cache.
///
/// The key is the item's stable identity: two items with the same key are the
/// same logical entity, and a later item with that key supersedes the earlier
/// one. Keys must never change once assigned.
pub trait Cacheable {
    /// Returns the stable identity key for this item.
    fn cache_key(&self) -> ItemKey;
}

impl Cacheable for String {
    fn cache_key(&self) -> ItemKey {
        self.clone()
    }
}

/// Statistics for cache performance monitoring
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CacheStats {
    /// Total number of window hits
    pub hits: u64,

    /// Total number of window misses (absent or out-of-range data)
    pub misses: u64,

    /// Misses caused by an expired entry inside the requested window
    pub expired: u64,

    /// Number of entries currently stored (including physically retained
    /// expired ones)
    pub entries: usize,

    /// Entries removed via delete, delete_all, or expiry eviction
    pub invalidations: u64,
}

impl CacheStats {
    /// Cache hit rate as a percentage.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }

    /// Cache miss rate as a percentage.
    pub fn miss_rate(&self) -> f64 {
        100.0 - self.hit_rate()
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CacheStats {{ hits: {}, misses: {}, hit_rate: {:.2}%, expired: {}, entries: {}, invalidations: {} }}",
            self.hits,
            self.misses,
            self.hit_rate(),
            self.expired,
            self.entries,
            self.invalidations
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_cacheable() {
        let item = "item-42".to_string();
        assert_eq!(item.cache_key(), "item-42");
    }

    #[test]
    fn test_stats_hit_rate() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            ..Default::default()
        };

        assert_eq!(stats.hit_rate(), 80.0);
        assert_eq!(stats.miss_rate(), 20.0);
    }

    #[test]
    fn test_stats_zero_requests() {
        let stats = CacheStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats.miss_rate(), 100.0);
    }

    #[test]
    fn test_stats_display() {
        let stats = CacheStats {
            hits: 100,
            misses: 50,
            expired: 7,
            entries: 75,
            invalidations: 3,
        };

        let display = format!("{}", stats);
        assert!(display.contains("hits: 100"));
        assert!(display.contains("misses: 50"));
        assert!(display.contains("expired: 7"));
    }
}
