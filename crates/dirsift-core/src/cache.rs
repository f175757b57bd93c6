//! Caller-owned in-memory cache with per-entry TTL.
//!
//! Entries expire lazily: an expired entry is dropped on the `get`
//! that observes it. Callers that want eager sweeping call
//! [`TtlCache::purge_expired`] themselves; there is no background
//! eviction.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

struct CacheEntry<V> {
    value: V,
    expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }
}

/// In-memory key-value cache with optional per-entry expiration.
pub struct TtlCache<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
}

impl<K: Eq + Hash, V> TtlCache<K, V> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Insert a value. `ttl = None` means the entry never expires.
    /// An existing entry under the same key is replaced, TTL included.
    pub fn insert(&mut self, key: K, value: V, ttl: Option<Duration>) {
        let expires_at = ttl.map(|ttl| Instant::now() + ttl);
        self.entries.insert(key, CacheEntry { value, expires_at });
    }

    /// Look up a value, dropping it first if its TTL has elapsed.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let now = Instant::now();
        if self.entries.get(key).is_some_and(|e| e.is_expired(now)) {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|e| &e.value)
    }

    /// Remove an entry, returning its value if it was present and live.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let now = Instant::now();
        let entry = self.entries.remove(key)?;
        if entry.is_expired(now) {
            None
        } else {
            Some(entry.value)
        }
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, e| !e.is_expired(now));
        before - self.entries.len()
    }

    /// Number of stored entries, expired ones included until purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the cache holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: Eq + Hash, V> Default for TtlCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
