//! Cache Statistics Module
//!
//! Tracks cache hits and misses for the stats endpoint.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache performance counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups answered from a live entry
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Entries currently held, expired ones included
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Adds another cache's counters to this snapshot.
    pub fn merge(mut self, other: CacheStats) -> Self {
        self.hits += other.hits;
        self.misses += other.misses;
        self.total_entries += other.total_entries;
        self
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        assert_eq!(CacheStats::new().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            total_entries: 0,
        };
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_merge_sums_counters() {
        let live = CacheStats {
            hits: 2,
            misses: 1,
            total_entries: 1,
        };
        let listings = CacheStats {
            hits: 1,
            misses: 4,
            total_entries: 3,
        };

        let merged = live.merge(listings);
        assert_eq!(merged.hits, 3);
        assert_eq!(merged.misses, 5);
        assert_eq!(merged.total_entries, 4);
    }

    #[test]
    fn test_set_total_entries() {
        let mut stats = CacheStats::new();
        stats.set_total_entries(42);
        assert_eq!(stats.total_entries, 42);
    }
}
