//! Key to slot lookup for the recency list.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use super::entry::SlotId;

/// Non-owning map from key to the slot holding its entry
pub(crate) struct Index<K> {
    slots: HashMap<K, SlotId>,
}

impl<K: Hash + Eq> Index<K> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: HashMap::with_capacity(capacity),
        }
    }

    pub(crate) fn lookup<Q>(&self, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.get(key).copied()
    }

    /// Inserts or overwrites the mapping, returning the previous slot
    pub(crate) fn register(&mut self, key: K, id: SlotId) -> Option<SlotId> {
        self.slots.insert(key, id)
    }

    pub(crate) fn unregister<Q>(&mut self, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.remove(key)
    }

    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.contains_key(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }
}
