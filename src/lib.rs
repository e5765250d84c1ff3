//! recency-cache: fixed-capacity least-recently-used cache
//!
//! This module exposes the public API of the library.

pub mod cache;

// Cache exports
pub use cache::{
    new_shared_cache, CacheConfig, CacheError, CacheMetrics, EntryMetadata, LruCache,
    PutOutcome, SharedLruCache, ThreadSafeLruCache,
};
