//! Cache entry with recency links.

/// Position of an entry inside the recency list arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

/// One cached key-value pair and its place in the recency ordering
#[derive(Debug, Clone)]
pub struct Entry<K, V> {
    /// The key, unique across live entries
    pub key: K,

    /// The cached value
    pub value: V,

    /// Number of times this entry has been accessed
    pub access_count: u64,

    /// Neighbour towards the most-recently-used end
    pub(crate) prev: Option<SlotId>,

    /// Neighbour towards the least-recently-used end
    pub(crate) next: Option<SlotId>,
}

impl<K, V> Entry<K, V> {
    /// Creates a new, unlinked entry
    pub fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            access_count: 1,
            prev: None,
            next: None,
        }
    }

    /// Marks the entry as accessed
    pub fn touch(&mut self) {
        self.access_count += 1;
    }

    /// Replaces the value in place and returns the old one
    pub fn replace(&mut self, value: V) -> V {
        self.touch();
        std::mem::replace(&mut self.value, value)
    }

    /// Whether the entry has any neighbour
    pub(crate) fn has_links(&self) -> bool {
        self.prev.is_some() || self.next.is_some()
    }

    /// Consumes the entry and returns key and value
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}
