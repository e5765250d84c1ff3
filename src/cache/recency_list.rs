//! Arena-backed doubly-linked list ordering entries by recency.
//!
//! Entries live in a slot table and link to each other by [`SlotId`]
//! instead of pointers, so there are no reference cycles and a freed slot
//! is simply recycled by the next insertion. The head is the
//! most-recently-used entry, the tail the next eviction candidate.
//!
//! Only the cache orchestrator drives this list; it must keep the index in
//! step with every insertion and removal made here.

use super::entry::{Entry, SlotId};

pub(crate) struct RecencyList<K, V> {
    slots: Vec<Option<Entry<K, V>>>,
    free: Vec<usize>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of linked entries
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Most-recently-used entry
    pub(crate) fn head(&self) -> Option<SlotId> {
        self.head
    }

    /// Least-recently-used entry
    pub(crate) fn tail(&self) -> Option<SlotId> {
        self.tail
    }

    pub(crate) fn get(&self, id: SlotId) -> Option<&Entry<K, V>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, id: SlotId) -> Option<&mut Entry<K, V>> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Stores an unlinked entry and links it as most-recently-used.
    pub(crate) fn insert_at_head(&mut self, entry: Entry<K, V>) -> SlotId {
        debug_assert!(!entry.has_links(), "entry is already linked");

        let id = match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(entry);
                SlotId(index)
            }
            None => {
                self.slots.push(Some(entry));
                SlotId(self.slots.len() - 1)
            }
        };
        self.link_at_head(id);
        id
    }

    /// Unlinks an entry by joining its neighbours. The entry keeps its slot.
    pub(crate) fn detach(&mut self, id: SlotId) {
        if !self.is_linked(id) {
            return;
        }

        let (prev, next) = match self.get_mut(id) {
            Some(entry) => (entry.prev.take(), entry.next.take()),
            None => return,
        };

        match prev.and_then(|p| self.get_mut(p)) {
            Some(prev_entry) => prev_entry.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.get_mut(n)) {
            Some(next_entry) => next_entry.prev = prev,
            None => self.tail = prev,
        }
        self.len -= 1;
    }

    /// Moves an entry to the head. A no-op when it is already there.
    pub(crate) fn move_to_head(&mut self, id: SlotId) {
        if self.head == Some(id) {
            return;
        }
        self.detach(id);
        self.link_at_head(id);
    }

    /// Removes and returns the least-recently-used entry.
    pub(crate) fn evict_tail(&mut self) -> Option<Entry<K, V>> {
        let tail = self.tail?;
        self.remove(tail)
    }

    /// Unlinks an entry and releases its slot.
    pub(crate) fn remove(&mut self, id: SlotId) -> Option<Entry<K, V>> {
        self.detach(id);
        let entry = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        Some(entry)
    }

    /// Walks entries from most- to least-recently-used.
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn is_linked(&self, id: SlotId) -> bool {
        self.head == Some(id) || self.get(id).is_some_and(Entry::has_links)
    }

    fn link_at_head(&mut self, id: SlotId) {
        let old_head = self.head;
        match self.get_mut(id) {
            Some(entry) => {
                entry.prev = None;
                entry.next = old_head;
            }
            None => return,
        }

        match old_head.and_then(|h| self.get_mut(h)) {
            Some(head_entry) => head_entry.prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        self.len += 1;
    }
}

pub(crate) struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<SlotId>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.list.get(self.cursor?)?;
        self.cursor = entry.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &RecencyList<i32, &str>) -> Vec<i32> {
        list.iter().map(|e| e.key).collect()
    }

    fn keys_backwards(list: &RecencyList<i32, &str>) -> Vec<i32> {
        let mut out = Vec::new();
        let mut cursor = list.tail();
        while let Some(id) = cursor {
            let entry = list.get(id).unwrap();
            out.push(entry.key);
            cursor = entry.prev;
        }
        out
    }

    fn filled(n: i32) -> (RecencyList<i32, &'static str>, Vec<SlotId>) {
        let mut list = RecencyList::with_capacity(n as usize);
        let ids = (1..=n)
            .map(|k| list.insert_at_head(Entry::new(k, "v")))
            .collect();
        (list, ids)
    }

    #[test]
    fn test_empty_list() {
        let mut list: RecencyList<i32, &str> = RecencyList::with_capacity(4);
        assert!(list.is_empty());
        assert_eq!(list.head(), None);
        assert_eq!(list.tail(), None);
        assert!(list.evict_tail().is_none());
        assert_eq!(list.iter().len(), 0);
    }

    #[test]
    fn test_insert_at_head_orders_mru_first() {
        let (list, ids) = filled(3);
        assert_eq!(list.len(), 3);
        assert_eq!(keys(&list), vec![3, 2, 1]);
        assert_eq!(keys_backwards(&list), vec![1, 2, 3]);
        assert_eq!(list.head(), Some(ids[2]));
        assert_eq!(list.tail(), Some(ids[0]));
    }

    #[test]
    fn test_move_to_head_from_tail_and_middle() {
        let (mut list, ids) = filled(3);

        list.move_to_head(ids[0]);
        assert_eq!(keys(&list), vec![1, 3, 2]);
        assert_eq!(keys_backwards(&list), vec![2, 3, 1]);

        list.move_to_head(ids[2]);
        assert_eq!(keys(&list), vec![3, 1, 2]);
        assert_eq!(keys_backwards(&list), vec![2, 1, 3]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_move_to_head_is_idempotent() {
        let (mut list, ids) = filled(3);
        list.move_to_head(ids[1]);
        let once = keys(&list);
        list.move_to_head(ids[1]);
        assert_eq!(keys(&list), once);
        assert_eq!(keys_backwards(&list), vec![1, 3, 2]);
    }

    #[test]
    fn test_detach_head_keeps_links_consistent() {
        let (mut list, ids) = filled(3);
        list.detach(ids[2]);
        assert_eq!(list.len(), 2);
        assert_eq!(keys(&list), vec![2, 1]);
        assert_eq!(keys_backwards(&list), vec![1, 2]);

        // second detach of an unlinked entry changes nothing
        list.detach(ids[2]);
        assert_eq!(list.len(), 2);
        assert_eq!(keys(&list), vec![2, 1]);
    }

    #[test]
    fn test_detach_single_entry() {
        let (mut list, ids) = filled(1);
        list.detach(ids[0]);
        assert!(list.is_empty());
        assert_eq!(list.head(), None);
        assert_eq!(list.tail(), None);
    }

    #[test]
    fn test_evict_tail_returns_lru() {
        let (mut list, _) = filled(3);
        let victim = list.evict_tail().unwrap();
        assert_eq!(victim.key, 1);
        assert!(!victim.has_links());
        assert_eq!(keys(&list), vec![3, 2]);
        assert_eq!(keys_backwards(&list), vec![2, 3]);
    }

    #[test]
    fn test_freed_slot_is_reused() {
        let (mut list, ids) = filled(2);
        list.evict_tail();
        let id = list.insert_at_head(Entry::new(9, "nine"));
        assert_eq!(id, ids[0]);
        assert_eq!(keys(&list), vec![9, 2]);
    }

    #[test]
    fn test_remove_middle() {
        let (mut list, ids) = filled(3);
        let removed = list.remove(ids[1]).unwrap();
        assert_eq!(removed.key, 2);
        assert_eq!(keys(&list), vec![3, 1]);
        assert_eq!(keys_backwards(&list), vec![1, 3]);
        assert!(list.remove(ids[1]).is_none());
    }
}
