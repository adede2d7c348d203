//! Cache Store Module
//!
//! Combines the key index with the recency list. Every mutation keeps the two
//! in lockstep: an entry is either indexed and linked, or neither.

use std::collections::HashMap;

use crate::cache::{CacheEntry, RecencyList, SlotId};

// == Cache Store ==
/// Hash index over an arena-backed recency list.
///
/// None of these operations lock; callers hold the cache mutex.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key to slot lookup
    index: HashMap<String, SlotId>,
    /// Entries ordered most to least recently used
    list: RecencyList,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store sized for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity(capacity),
            list: RecencyList::with_capacity(capacity),
        }
    }

    // == Lookup ==
    /// Finds the slot holding `key` without touching recency order.
    pub fn lookup(&self, key: &str) -> Option<SlotId> {
        self.index.get(key).copied()
    }

    /// Returns the entry stored at `id`.
    pub fn entry(&self, id: SlotId) -> Option<&CacheEntry> {
        self.list.get(id)
    }

    /// Returns a mutable reference to the entry stored at `id`.
    pub fn entry_mut(&mut self, id: SlotId) -> Option<&mut CacheEntry> {
        self.list.get_mut(id)
    }

    // == Insert Front ==
    /// Links a new entry as most recently used and indexes it.
    ///
    /// # Panics
    /// If the key is already indexed.
    pub fn insert_front(&mut self, entry: CacheEntry) -> SlotId {
        assert!(
            !self.index.contains_key(&entry.key),
            "insert_front of already indexed key {:?}",
            entry.key
        );
        let key = entry.key.clone();
        let id = self.list.push_front(entry);
        self.index.insert(key, id);
        id
    }

    // == Unlink ==
    /// Splices `id` out of the recency list, leaving the index untouched.
    ///
    /// The caller must relink or release the slot before the lock is dropped.
    pub fn unlink(&mut self, id: SlotId) {
        self.list.unlink(id);
    }

    /// Relinks a previously unlinked slot as most recently used.
    pub fn relink_front(&mut self, id: SlotId) {
        self.list.link_front(id);
    }

    // == Move To Front ==
    /// Marks `id` as most recently used.
    pub fn move_to_front(&mut self, id: SlotId) {
        if self.list.front() == Some(id) {
            return;
        }
        self.unlink(id);
        self.relink_front(id);
    }

    // == Evict Back ==
    /// Removes and returns the least recently used entry.
    ///
    /// # Panics
    /// If the store is empty; callers only evict when at capacity.
    pub fn evict_back(&mut self) -> CacheEntry {
        let Some(id) = self.list.back() else {
            panic!("evict_back called on an empty cache store");
        };
        let entry = self.list.release(id);
        self.index.remove(&entry.key);
        entry
    }

    // == Remove ==
    /// Unlinks and de-indexes `key`, returning its entry if present.
    pub fn remove(&mut self, key: &str) -> Option<CacheEntry> {
        let id = self.index.remove(key)?;
        Some(self.list.release(id))
    }

    // == Length ==
    /// Returns the number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.index.len(), self.list.len());
        self.index.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = &CacheEntry> {
        self.list.iter().map(|(_, entry)| entry)
    }

    /// Checks that the index and the list describe the same set of entries.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
        assert_eq!(self.index.len(), self.list.len(), "index/list size diverged");
        for (id, entry) in self.list.iter() {
            assert_eq!(
                self.index.get(&entry.key),
                Some(&id),
                "linked key {:?} is not indexed at its slot",
                entry.key
            );
        }
    }
}
