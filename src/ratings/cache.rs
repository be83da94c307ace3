//! TTL-based caching for ratings lookups.

use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::time::{Duration, Instant};

/// A cache key derived from the lookup parameters (school id plus query, or
/// a professor id). Hashed so keys stay short and uniform.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct QueryKey(String);

impl QueryKey {
    /// Builds a key from the parts that identify one lookup.
    pub fn from_parts(parts: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part.as_bytes());
            hasher.update([0u8]);
        }
        let result = hasher.finalize();
        // Use first 16 bytes as hex string
        let hash = hex::encode(&result[..16]);
        Self(hash)
    }

    /// Returns the internal hash string (for logging/debugging).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}...", &self.0[..8.min(self.0.len())])
    }
}

/// A cached lookup result with metadata.
#[derive(Clone)]
struct CachedEntry<V> {
    value: V,
    cached_at: Instant,
    ttl: Duration,
}

/// Thread-safe TTL cache for ratings lookups.
///
/// Uses DashMap for concurrent access without external locking.
pub struct TtlCache<V: Clone> {
    entries: DashMap<QueryKey, CachedEntry<V>>,
    default_ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    /// Creates a new cache with the specified default TTL.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            default_ttl,
        }
    }

    /// Creates a cache with a 5-minute default TTL.
    pub fn with_default_ttl() -> Self {
        Self::new(Duration::from_secs(5 * 60))
    }

    /// Gets a cached value if it exists and hasn't expired.
    pub fn get(&self, key: &QueryKey) -> Option<V> {
        self.entries.get(key).and_then(|entry| {
            if entry.cached_at.elapsed() < entry.ttl {
                Some(entry.value.clone())
            } else {
                // Entry expired, remove it
                drop(entry);
                self.entries.remove(key);
                None
            }
        })
    }

    /// Inserts a value with the default TTL.
    pub fn insert(&self, key: QueryKey, value: V) {
        self.insert_with_ttl(key, value, self.default_ttl);
    }

    /// Inserts a value with a custom TTL.
    pub fn insert_with_ttl(&self, key: QueryKey, value: V, ttl: Duration) {
        self.entries.insert(
            key,
            CachedEntry {
                value,
                cached_at: Instant::now(),
                ttl,
            },
        );
    }

    /// Clears all entries from the cache.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Returns the number of entries in the cache (including expired ones).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Gets cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut total = 0;
        let mut expired = 0;

        for entry in self.entries.iter() {
            total += 1;
            if entry.cached_at.elapsed() >= entry.ttl {
                expired += 1;
            }
        }

        CacheStats {
            total_entries: total,
            expired_entries: expired,
            active_entries: total - expired,
        }
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::with_default_ttl()
    }
}

/// Cache statistics for monitoring.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
    pub active_entries: usize,
}

/// Circuit breaker protecting the ratings provider from repeated failures.
pub struct CircuitBreaker {
    failure_count: std::sync::atomic::AtomicU32,
    last_failure: std::sync::Mutex<Option<Instant>>,
    threshold: u32,
    recovery_time: Duration,
}

impl CircuitBreaker {
    /// Creates a new circuit breaker.
    ///
    /// - `threshold`: Number of failures before the breaker opens
    /// - `recovery_time`: How long to wait before allowing requests again
    pub fn new(threshold: u32, recovery_time: Duration) -> Self {
        Self {
            failure_count: std::sync::atomic::AtomicU32::new(0),
            last_failure: std::sync::Mutex::new(None),
            threshold,
            recovery_time,
        }
    }

    /// Creates a circuit breaker with default settings (5 failures, 30s recovery).
    pub fn with_defaults() -> Self {
        Self::new(5, Duration::from_secs(30))
    }

    /// Returns true if the circuit breaker is open (blocking requests).
    pub fn is_open(&self) -> bool {
        let count = self
            .failure_count
            .load(std::sync::atomic::Ordering::Relaxed);
        if count < self.threshold {
            return false;
        }

        // Check if recovery time has passed
        if let Ok(guard) = self.last_failure.lock() {
            if let Some(last) = *guard {
                if last.elapsed() > self.recovery_time {
                    drop(guard);
                    self.reset();
                    return false;
                }
            }
        }

        true
    }

    /// Records a successful operation, resetting the failure count.
    pub fn record_success(&self) {
        self.failure_count
            .store(0, std::sync::atomic::Ordering::Relaxed);
    }

    /// Records a failed operation.
    pub fn record_failure(&self) {
        self.failure_count
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        if let Ok(mut guard) = self.last_failure.lock() {
            *guard = Some(Instant::now());
        }
    }

    /// Resets the circuit breaker state.
    pub fn reset(&self) {
        self.failure_count
            .store(0, std::sync::atomic::Ordering::Relaxed);
        if let Ok(mut guard) = self.last_failure.lock() {
            *guard = None;
        }
    }
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Helper module for hex encoding (avoiding extra dependency).
mod hex {
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_key_hashing() {
        let key1 = QueryKey::from_parts(&["school1", "smith"]);
        let key2 = QueryKey::from_parts(&["school1", "smith"]);
        let key3 = QueryKey::from_parts(&["school1", "jones"]);

        assert_eq!(key1, key2);
        assert_ne!(key1, key3);
    }

    #[test]
    fn test_query_key_separator_matters() {
        // "ab" + "c" must not collide with "a" + "bc"
        let key1 = QueryKey::from_parts(&["ab", "c"]);
        let key2 = QueryKey::from_parts(&["a", "bc"]);
        assert_ne!(key1, key2);
    }

    #[test]
    fn test_cache_get_insert() {
        let cache: TtlCache<Vec<u32>> = TtlCache::with_default_ttl();
        let key = QueryKey::from_parts(&["k"]);

        assert!(cache.get(&key).is_none());
        cache.insert(key.clone(), vec![1, 2, 3]);
        assert_eq!(cache.get(&key), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_cache_expiry() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(0));
        let key = QueryKey::from_parts(&["k"]);
        cache.insert(key.clone(), 7);
        assert!(cache.get(&key).is_none());
    }

    #[test]
    fn test_circuit_breaker_threshold() {
        let cb = CircuitBreaker::new(3, Duration::from_secs(1));

        assert!(!cb.is_open());
        cb.record_failure();
        assert!(!cb.is_open());
        cb.record_failure();
        assert!(!cb.is_open());
        cb.record_failure();
        assert!(cb.is_open());

        cb.record_success();
        assert!(!cb.is_open());
    }
}
