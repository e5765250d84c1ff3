//! Fixed-capacity LRU cache.
//!
//! - [`LruCache`]: single-owner cache with O(1) `get` and `put`
//! - [`ThreadSafeLruCache`]: the same cache behind one exclusive lock
//! - Cache metrics for monitoring
//!
//! Internally an arena-backed recency list orders entries from most- to
//! least-recently-used and an index maps each key to its slot. Neither is
//! reachable from outside this module.
//!
//! # Example
//!
//! ```rust
//! use recency_cache::cache::{LruCache, PutOutcome};
//!
//! let mut cache = LruCache::new(2)?;
//! cache.put(1, "apple");
//! cache.put(2, "banana");
//! cache.get(&1);
//!
//! // key 2 is now the least recently used
//! assert_eq!(cache.put(3, "cherry"), PutOutcome::Evicted { key: 2, value: "banana" });
//! # Ok::<(), recency_cache::cache::CacheError>(())
//! ```

pub mod config;
pub mod error;
pub mod lru_cache;
pub mod shared;

mod entry;
mod index;
mod recency_list;

// Re-exports
pub use config::{CacheConfig, CacheMetrics};
pub use error::{CacheError, Result};
pub use lru_cache::{EntryMetadata, Iter, LruCache, PutOutcome};
pub use shared::{new_shared_cache, SharedLruCache, ThreadSafeLruCache};
