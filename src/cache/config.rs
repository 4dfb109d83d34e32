//! Configuration for the in-memory paginated cache

use crate::error::{RepoError, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Environment variable read by [`CacheConfig::from_env`]
pub const TTL_MS_ENV_VAR: &str = "PAGEREPO_TTL_MS";

/// Configuration for an in-memory paginated source.
///
/// The cache contract exposes a single tunable: the time-to-live applied to
/// every entry. A TTL of zero or below means "never considered fresh" -
/// every `get` misses, which turns the source into a pure pass-through for
/// callers that want no caching at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live for cache entries, in milliseconds. Zero or negative
    /// disables freshness entirely.
    pub ttl_ms: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            // 1 hour, matching common defaults for relatively stable content
            ttl_ms: 3_600_000,
        }
    }
}

impl CacheConfig {
    /// Create a new builder for cache configuration
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::default()
    }

    /// The TTL as a signed duration.
    pub fn ttl(&self) -> Duration {
        Duration::milliseconds(self.ttl_ms)
    }

    /// True when the TTL disables caching (every `get` misses).
    pub fn is_passthrough(&self) -> bool {
        self.ttl_ms <= 0
    }

    /// Loads the TTL from the environment (`PAGEREPO_TTL_MS`), falling back
    /// to the default when the variable is unset. A present but unparsable
    /// value is a configuration error.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        match std::env::var(TTL_MS_ENV_VAR) {
            Ok(raw) => {
                let ttl_ms = raw.parse::<i64>().map_err(|e| {
                    RepoError::ConfigError(format!("{} is not a valid TTL: {}", TTL_MS_ENV_VAR, e))
                })?;
                Ok(Self { ttl_ms })
            }
            Err(_) => Ok(Self::default()),
        }
    }

    /// Configuration for rapidly changing data (5 minute TTL).
    pub fn realtime() -> Self {
        Self { ttl_ms: 300_000 }
    }

    /// Configuration that never serves from cache.
    ///
    /// Useful when a chain should always reach the authoritative source but
    /// the wiring expects an in-memory layer to be present.
    pub fn passthrough() -> Self {
        Self { ttl_ms: 0 }
    }
}

/// Builder for cache configuration
#[derive(Debug, Default)]
pub struct CacheConfigBuilder {
    ttl_ms: Option<i64>,
}

impl CacheConfigBuilder {
    /// Set the TTL from a signed duration
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl_ms = Some(ttl.num_milliseconds());
        self
    }

    /// Set the TTL in milliseconds
    pub fn ttl_ms(mut self, ttl_ms: i64) -> Self {
        self.ttl_ms = Some(ttl_ms);
        self
    }

    /// Build the cache configuration
    pub fn build(self) -> CacheConfig {
        let defaults = CacheConfig::default();

        CacheConfig {
            ttl_ms: self.ttl_ms.unwrap_or(defaults.ttl_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // The process environment is shared across the whole test binary, so
    // tests that touch PAGEREPO_TTL_MS take this lock to avoid racing each
    // other under the parallel test runner.
    static ENV_GUARD: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl(), Duration::hours(1));
        assert!(!config.is_passthrough());
    }

    #[test]
    fn test_config_builder() {
        let config = CacheConfig::builder().ttl(Duration::seconds(10)).build();
        assert_eq!(config.ttl_ms, 10_000);

        let config = CacheConfig::builder().ttl_ms(250).build();
        assert_eq!(config.ttl(), Duration::milliseconds(250));
    }

    #[test]
    fn test_passthrough_presets() {
        assert!(CacheConfig::passthrough().is_passthrough());
        assert!(CacheConfig::builder().ttl_ms(-1).build().is_passthrough());
        assert!(!CacheConfig::realtime().is_passthrough());
    }

    #[test]
    fn test_from_env_reads_ttl() {
        let _guard = ENV_GUARD.lock().unwrap_or_else(|e| e.into_inner());

        std::env::set_var(TTL_MS_ENV_VAR, "2500");
        let result = CacheConfig::from_env();
        std::env::remove_var(TTL_MS_ENV_VAR);

        assert_eq!(result.unwrap().ttl_ms, 2500);
    }

    #[test]
    fn test_from_env_rejects_garbage() {
        let _guard = ENV_GUARD.lock().unwrap_or_else(|e| e.into_inner());

        std::env::set_var(TTL_MS_ENV_VAR, "not-a-number");
        let result = CacheConfig::from_env();
        std::env::remove_var(TTL_MS_ENV_VAR);

        assert!(matches!(result, Err(RepoError::ConfigError(_))));
    }
}
