//! Thread-safe wrapper around [`LruCache`].

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::info;

use super::config::{CacheConfig, CacheMetrics};
use super::error::Result;
use super::lru_cache::{EntryMetadata, LruCache, PutOutcome};

/// LRU cache safe to share between threads
///
/// Each call takes one exclusive lock for its whole duration, so the index
/// and the recency list are never observed out of step. Values come back
/// as clones; callers never hold a reference into a live entry.
pub struct ThreadSafeLruCache<K, V> {
    cache: Mutex<LruCache<K, V>>,
}

impl<K, V> ThreadSafeLruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Creates a new cache with the given configuration
    pub fn new(config: CacheConfig) -> Result<Self> {
        info!("Initializing ThreadSafeLruCache with capacity: {}", config.capacity);
        Ok(Self {
            cache: Mutex::new(LruCache::with_config(config)?),
        })
    }

    /// Creates a new cache with the given capacity
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::new(CacheConfig::with_capacity(capacity))
    }

    /// Creates from environment configuration
    pub fn from_env() -> Result<Self> {
        Self::new(CacheConfig::from_env()?)
    }

    /// Gets a value from the cache, promoting it on a hit
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().get_cloned(key)
    }

    /// Puts a value into the cache
    pub fn put(&self, key: K, value: V) -> PutOutcome<K, V> {
        self.lock().put(key, value)
    }

    /// Gets a value without affecting LRU order
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().peek(key).cloned()
    }

    /// Removes a value from the cache
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().remove(key)
    }

    /// Checks if a key exists in the cache (without affecting LRU order)
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().contains(key)
    }

    /// Gets entry metadata without returning the value
    pub fn get_metadata<Q>(&self, key: &Q) -> Option<EntryMetadata>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().get_metadata(key)
    }

    /// Returns the current number of entries
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Checks if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns the capacity of the cache
    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    /// Keys from most- to least-recently-used, as a snapshot
    pub fn keys(&self) -> Vec<K> {
        self.lock().keys().cloned().collect()
    }

    /// Clears all entries from the cache
    pub fn clear(&self) {
        info!("Clearing ThreadSafeLruCache");
        self.lock().clear();
    }

    /// Returns the current cache metrics
    pub fn metrics(&self) -> CacheMetrics {
        self.lock().metrics()
    }

    /// Resets all metrics counters
    pub fn reset_metrics(&self) {
        self.lock().reset_metrics();
    }

    // LruCache only drops keys and values once the index and the list agree
    // again, so a guard poisoned by a panicking Drop is still safe to reuse.
    fn lock(&self) -> MutexGuard<'_, LruCache<K, V>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Thread-safe cache handle shared through an [`Arc`]
pub type SharedLruCache<K, V> = Arc<ThreadSafeLruCache<K, V>>;

/// Creates a new shared cache
pub fn new_shared_cache<K, V>(config: CacheConfig) -> Result<SharedLruCache<K, V>>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    Ok(Arc::new(ThreadSafeLruCache::new(config)?))
}
