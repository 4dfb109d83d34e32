//! # In-memory paginated caching
//!
//! The cache layer of the repository: an ordered index of identity keys
//! plus a key-to-entry map, with TTL-based freshness evaluated at read time.
//!
//! ## Semantics
//!
//! - **Merge by key**: re-added items refresh in place without changing
//!   their logical position, so overlapping windows from scroll-driven
//!   pagination correct earlier data instead of duplicating it
//! - **Whole-window staleness**: one expired entry inside a requested
//!   window misses the entire window; partial pages are never presented as
//!   complete
//! - **Pass-through mode**: a non-positive TTL makes every `get` miss,
//!   turning the source into a no-op cache for chains that should always
//!   reach the authoritative source

pub mod config;
pub mod entry;
pub mod store;
pub mod types;

pub use config::{CacheConfig, CacheConfigBuilder};
pub use entry::CachedEntry;
pub use store::{start_auto_evict, InMemoryPagedSource};
pub use types::{Cacheable, CacheStats, ItemKey};
