// ABOUTME: In-memory result cache with TTL expiry and LRU eviction
// ABOUTME: Memoizes computed values by canonical key; synchronous, many readers, serialized writers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Match Intelligence

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

/// Cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    fn new(value: V, ttl: Option<Duration>) -> Self {
        Self {
            value,
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        }
    }

    fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|expires_at| Instant::now() >= expires_at)
    }
}

/// Aggregate counters for cache behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Lookups answered from an unexpired entry
    pub hits: u64,
    /// Lookups that ran the compute function
    pub misses: u64,
    /// Entries removed under capacity pressure
    pub evictions: u64,
}

/// Memoization cache keyed by canonical query strings.
///
/// `LruCache` provides O(1) least-recently-used eviction; expiry is
/// checked on access against each entry's `expires_at`. Everything in
/// this engine is synchronous CPU-bound work (no I/O), so the store sits
/// behind a `std::sync::RwLock` rather than an async lock, and there is
/// no background sweeper: capacity eviction bounds memory, and expired
/// entries are dropped the next time they are touched.
///
/// Values are never mutated after insertion; a hit clones the stored
/// value out. A changed corpus goes through [`ResultCache::invalidate_all`],
/// never an in-place edit.
#[derive(Debug)]
pub struct ResultCache<V> {
    store: RwLock<LruCache<String, CacheEntry<V>>>,
    ttl: Option<Duration>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl<V: Clone> ResultCache<V> {
    /// Default capacity when configuration asks for zero entries.
    /// Note: the `unreachable` arm is verified at compile time.
    const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1000) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Create a cache holding at most `max_entries` values, each living
    /// `ttl_seconds` after insertion. A TTL of zero disables time-based
    /// expiry; capacity eviction still applies.
    #[must_use]
    pub fn new(max_entries: usize, ttl_seconds: u64) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(Self::DEFAULT_CAPACITY);
        Self {
            store: RwLock::new(LruCache::new(capacity)),
            ttl: (ttl_seconds > 0).then(|| Duration::from_secs(ttl_seconds)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Return the cached value for `key`, or run `compute`, store its
    /// result, and return it.
    ///
    /// A hit refreshes the entry's LRU position and clones the value out
    /// unchanged. A miss (or an expired entry) runs `compute` outside the
    /// lock, so two threads missing the same key may both compute, and the
    /// last writer wins, which is acceptable because computation is cheap
    /// and deterministic. Inserting into a full cache evicts the
    /// least-recently-used entry.
    ///
    /// # Errors
    ///
    /// Propagates whatever `compute` returns; failed computations are
    /// not cached.
    pub fn get_or_compute<E>(
        &self,
        key: &str,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        {
            let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
            if let Some(entry) = store.get(key) {
                if entry.is_expired() {
                    store.pop(key);
                } else {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(key, "result cache hit");
                    return Ok(entry.value.clone());
                }
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(key, "result cache miss");
        let value = compute()?;

        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        if let Some((evicted_key, _)) = store.push(key.to_string(), CacheEntry::new(value.clone(), self.ttl)) {
            if evicted_key != key {
                self.evictions.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(key = %evicted_key, "evicted least-recently-used cache entry");
            }
        }
        Ok(value)
    }

    /// Drop every entry. Used when the corpus is reloaded or rating
    /// aggregates shift enough to affect tie-breaking.
    pub fn invalidate_all(&self) {
        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        let dropped = store.len();
        store.clear();
        drop(store);
        if dropped > 0 {
            tracing::debug!(dropped, "invalidated all cache entries");
        }
    }

    /// Whether an unexpired entry exists for `key`, without touching LRU
    /// order or counters.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        store.peek(key).is_some_and(|entry| !entry.is_expired())
    }

    /// Number of stored entries, expired or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the hit/miss/eviction counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}
