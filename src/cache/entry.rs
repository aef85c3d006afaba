//! Cache Entry Module
//!
//! Defines a cached payload together with its absolute expiry instant.

use chrono::{DateTime, Duration, Utc};

// == Cache Entry ==
/// A single cached payload with its lifetime bounds.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored payload
    pub payload: V,
    /// When the entry was written
    pub created_at: DateTime<Utc>,
    /// Last instant at which the entry is still served
    pub expires_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry written at `now` that lives for `ttl`.
    pub fn new(payload: V, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            payload,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry is still valid at exactly `expires_at`; it only expires once
    /// the clock has moved past it.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Time since the entry was written.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.created_at
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let now = Utc::now();
        let entry = CacheEntry::new("payload".to_string(), now, Duration::minutes(5));

        assert_eq!(entry.payload, "payload");
        assert_eq!(entry.created_at, now);
        assert_eq!(entry.expires_at, now + Duration::minutes(5));
        assert!(!entry.is_expired(now));
    }

    #[test]
    fn test_entry_expiration() {
        let now = Utc::now();
        let entry = CacheEntry::new(1u32, now, Duration::seconds(10));

        assert!(!entry.is_expired(now + Duration::seconds(9)));
        assert!(entry.is_expired(now + Duration::seconds(11)));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Utc::now();
        let entry = CacheEntry::new("test", now, Duration::seconds(30));

        // Still served exactly at the expiry instant
        assert!(!entry.is_expired(entry.expires_at));
        assert!(entry.is_expired(entry.expires_at + Duration::milliseconds(1)));
    }

    #[test]
    fn test_age() {
        let now = Utc::now();
        let entry = CacheEntry::new("test", now, Duration::seconds(10));

        assert_eq!(entry.age(now + Duration::seconds(4)), Duration::seconds(4));
    }
}
