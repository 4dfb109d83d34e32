//! Cache entry management
//!
//! A [`CachedEntry`] wraps one cached item with the timestamp of its last
//! write. Expiry is evaluated lazily against the source-level TTL at read
//! time; entries do not carry their own deadlines.

use chrono::{DateTime, Duration, Utc};

/// A cached item plus the instant it was last stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedEntry<T> {
    /// The cached item
    value: T,

    /// When the item was last written
    stored_at: DateTime<Utc>,
}

impl<T> CachedEntry<T> {
    /// Creates a fresh entry stamped with `now`.
    pub fn new(value: T, now: DateTime<Utc>) -> Self {
        Self {
            value,
            stored_at: now,
        }
    }

    /// Replaces the value and refreshes the timestamp.
    ///
    /// The timestamp is monotonic non-decreasing: a refresh observed with an
    /// earlier clock reading keeps the existing timestamp.
    pub fn refresh(&mut self, value: T, now: DateTime<Utc>) {
        self.value = value;
        self.stored_at = self.stored_at.max(now);
    }

    /// The cached item.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// When the item was last written.
    pub fn stored_at(&self) -> DateTime<Utc> {
        self.stored_at
    }

    /// Age of the entry relative to `now`.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.stored_at
    }

    /// Whether the entry is stale under the given TTL.
    ///
    /// An entry is expired when its age strictly exceeds `ttl`. A
    /// non-positive TTL expires everything, including entries written at
    /// `now` itself.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        if ttl <= Duration::zero() {
            return true;
        }
        self.age(now) > ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_entry_creation() {
        let entry = CachedEntry::new("payload", base());

        assert_eq!(*entry.value(), "payload");
        assert_eq!(entry.stored_at(), base());
        assert!(!entry.is_expired(base(), Duration::seconds(10)));
    }

    #[test]
    fn test_refresh_updates_value_and_timestamp() {
        let mut entry = CachedEntry::new("old", base());
        entry.refresh("new", base() + Duration::seconds(5));

        assert_eq!(*entry.value(), "new");
        assert_eq!(entry.stored_at(), base() + Duration::seconds(5));
    }

    #[test]
    fn test_refresh_timestamp_never_goes_backwards() {
        let mut entry = CachedEntry::new("old", base() + Duration::seconds(10));
        entry.refresh("new", base());

        assert_eq!(*entry.value(), "new");
        assert_eq!(entry.stored_at(), base() + Duration::seconds(10));
    }

    #[test]
    fn test_expiry_boundary_is_strict() {
        let entry = CachedEntry::new("v", base());
        let ttl = Duration::seconds(10);

        // Exactly at the TTL the entry is still fresh; one step past, stale.
        assert!(!entry.is_expired(base() + Duration::seconds(10), ttl));
        assert!(entry.is_expired(base() + Duration::seconds(11), ttl));
    }

    #[test]
    fn test_non_positive_ttl_always_expired() {
        let entry = CachedEntry::new("v", base());

        assert!(entry.is_expired(base(), Duration::zero()));
        assert!(entry.is_expired(base(), Duration::seconds(-5)));
    }

    #[test]
    fn test_age() {
        let entry = CachedEntry::new("v", base());
        assert_eq!(entry.age(base() + Duration::seconds(42)), Duration::seconds(42));
    }
}
