//! Fixed-capacity LRU cache.
//!
//! [`LruCache`] owns a recency list and an index and is the only code
//! that mutates either of them. Every public operation goes through one of
//! the composite helpers below, so a key is in the index exactly when its
//! entry is linked in the list.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use tracing::{debug, info, trace, warn};

use super::config::{CacheConfig, CacheMetrics};
use super::entry::Entry;
use super::error::Result;
use super::index::Index;
use super::recency_list::{self, RecencyList};

/// Upper bound on slots reserved up front; larger caches grow on demand
const MAX_PREALLOCATED: usize = 4096;

/// Result of a [`LruCache::put`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutOutcome<K, V> {
    /// A new key was stored without exceeding capacity
    Inserted,

    /// The key was already cached; its value was replaced in place
    Updated { previous: V },

    /// A new key was stored and the least-recently-used entry was dropped
    Evicted { key: K, value: V },
}

impl<K, V> PutOutcome<K, V> {
    /// Returns the evicted pair, if any
    pub fn into_evicted(self) -> Option<(K, V)> {
        match self {
            PutOutcome::Evicted { key, value } => Some((key, value)),
            _ => None,
        }
    }
}

/// Metadata about a cache entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMetadata {
    /// Number of times the entry has been written or read
    pub access_count: u64,

    /// Whether the entry is the most recently used one
    pub is_most_recent: bool,

    /// Whether the entry is next in line for eviction
    pub is_least_recent: bool,
}

/// Least-recently-used cache with O(1) `get` and `put`
pub struct LruCache<K, V> {
    list: RecencyList<K, V>,
    index: Index<K>,
    config: CacheConfig,
    metrics: CacheMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Creates a new cache with the given capacity
    ///
    /// Fails with [`CacheError::InvalidCapacity`](super::CacheError::InvalidCapacity)
    /// when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_config(CacheConfig::with_capacity(capacity))
    }

    /// Creates a new cache with the given configuration
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        info!("Creating LruCache with capacity: {}", config.capacity);
        let reserve = config.capacity.min(MAX_PREALLOCATED);
        Ok(Self {
            list: RecencyList::with_capacity(reserve + 1),
            index: Index::with_capacity(reserve),
            config,
            metrics: CacheMetrics::default(),
        })
    }

    /// Gets a value and marks it as most recently used
    ///
    /// A miss leaves the recency order untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(id) = self.index.lookup(key) else {
            trace!("Cache miss");
            self.record(|m| m.misses += 1);
            return None;
        };

        trace!("Cache hit");
        self.record(|m| m.hits += 1);
        self.list.move_to_head(id);
        let entry = self.list.get_mut(id)?;
        entry.touch();
        Some(&entry.value)
    }

    /// Like [`get`](Self::get), returning an owned copy of the value
    pub fn get_cloned<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.get(key).cloned()
    }

    /// Inserts or updates a value, evicting the least-recently-used entry
    /// when a new key pushes the cache over capacity
    pub fn put(&mut self, key: K, value: V) -> PutOutcome<K, V> {
        if let Some(id) = self.index.lookup(&key) {
            self.list.move_to_head(id);
            let entry = self.list.get_mut(id);
            debug_assert!(entry.is_some(), "indexed key has no entry in the recency list");
            if let Some(entry) = entry {
                let previous = entry.replace(value);
                self.record(|m| m.updates += 1);
                return PutOutcome::Updated { previous };
            }
            warn!("Dropping stale index slot before re-inserting key");
            self.index.unregister(&key);
        }

        self.insert_and_register(key, value);
        if self.list.len() > self.config.capacity {
            if let Some((key, value)) = self.evict_and_unregister() {
                return PutOutcome::Evicted { key, value };
            }
        }
        PutOutcome::Inserted
    }

    /// Gets a value without touching the recency order
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.lookup(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Returns the entry that the next insertion would evict
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let id = self.list.tail()?;
        self.list.get(id).map(|entry| (&entry.key, &entry.value))
    }

    /// Checks if a key exists in the cache (without affecting LRU order)
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains(key)
    }

    /// Removes a value from the cache
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.lookup(key)?;
        let entry = self.list.remove(id);
        // last step: the index drops its copy of the key here
        self.index.unregister(key);
        let entry = entry?;
        self.record(|m| m.removals += 1);
        debug!("Removed entry, {} remaining", self.list.len());
        Some(entry.value)
    }

    /// Gets entry metadata without promoting the entry
    pub fn get_metadata<Q>(&self, key: &Q) -> Option<EntryMetadata>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.lookup(key)?;
        let entry = self.list.get(id)?;
        Some(EntryMetadata {
            access_count: entry.access_count,
            is_most_recent: self.list.head() == Some(id),
            is_least_recent: self.list.tail() == Some(id),
        })
    }

    /// Returns the current number of entries
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Alias of [`len`](Self::len)
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Checks if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the capacity of the cache
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Clears all entries from the cache
    ///
    /// Both structures are emptied before any key or value is dropped, so a
    /// panicking `Drop` leaves an empty, consistent cache behind.
    pub fn clear(&mut self) {
        info!("Clearing {} cache entries", self.list.len());
        let reserve = self.config.capacity.min(MAX_PREALLOCATED);
        let index = std::mem::replace(&mut self.index, Index::with_capacity(reserve));
        let list = std::mem::replace(&mut self.list, RecencyList::with_capacity(reserve + 1));
        drop(index);
        drop(list);
    }

    /// Iterates from most- to least-recently-used without promoting anything
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Keys from most- to least-recently-used
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Returns the current cache metrics
    pub fn metrics(&self) -> CacheMetrics {
        CacheMetrics {
            size: self.len(),
            ..self.metrics.clone()
        }
    }

    /// Resets all metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics = CacheMetrics::default();
    }

    /// Returns the configuration
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn insert_and_register(&mut self, key: K, value: V) {
        let id = self.list.insert_at_head(Entry::new(key.clone(), value));
        self.index.register(key, id);
        self.record(|m| m.insertions += 1);
    }

    fn evict_and_unregister(&mut self) -> Option<(K, V)> {
        let victim = self.list.evict_tail()?;
        self.index.unregister(&victim.key);
        self.record(|m| m.evictions += 1);
        debug!(
            "Evicted LRU entry (accessed {} times), capacity {}",
            victim.access_count, self.config.capacity
        );
        Some(victim.into_parts())
    }

    fn record(&mut self, update: impl FnOnce(&mut CacheMetrics)) {
        if self.config.track_metrics {
            update(&mut self.metrics);
        }
    }

    #[cfg(test)]
    fn assert_consistent(&self) {
        assert_eq!(self.index.len(), self.list.len());
        assert!(self.list.len() <= self.config.capacity);
        for entry in self.list.iter() {
            let id = self.index.lookup(&entry.key).expect("linked key not indexed");
            assert!(std::ptr::eq(self.list.get(id).unwrap(), entry));
        }
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.list.iter().map(|entry| (&entry.key, &entry.value)))
            .finish()
    }
}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over cached pairs, most recently used first
pub struct Iter<'a, K, V> {
    inner: recency_list::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
