//! Recency List Module
//!
//! Arena-backed doubly linked list ordering entries from most recently used
//! (front) to least recently used (back).
//!
//! Nodes live in a `Vec` and link to each other by slot index. Two sentinel
//! nodes bound the chain, so linking and unlinking never branch on an empty
//! list:
//!
//! ```text
//!   [FRONT] <-> [mru] <-> ... <-> [lru] <-> [BACK]
//! ```
//!
//! Freed slots are recycled through a free list.

use super::CacheEntry;

/// Stable handle to a node in the [`RecencyList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

const FRONT: SlotId = SlotId(0);
const BACK: SlotId = SlotId(1);

// == Node ==
/// One arena slot. Sentinels and free slots carry no entry.
#[derive(Debug)]
struct Node {
    entry: Option<CacheEntry>,
    prev: SlotId,
    next: SlotId,
}

impl Node {
    fn sentinel(prev: SlotId, next: SlotId) -> Self {
        Self {
            entry: None,
            prev,
            next,
        }
    }
}

// == Recency List ==
/// Doubly linked list of cache entries with sentinel bounds.
#[derive(Debug)]
pub struct RecencyList {
    nodes: Vec<Node>,
    free: Vec<SlotId>,
    len: usize,
}

impl RecencyList {
    // == Constructor ==
    /// Creates an empty list containing only the two sentinels.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.saturating_add(2));
        nodes.push(Node::sentinel(FRONT, BACK));
        nodes.push(Node::sentinel(FRONT, BACK));
        Self {
            nodes,
            free: Vec::new(),
            len: 0,
        }
    }

    // == Push Front ==
    /// Stores `entry` in a slot and links it right after the front sentinel.
    pub fn push_front(&mut self, entry: CacheEntry) -> SlotId {
        let id = match self.free.pop() {
            Some(id) => {
                self.nodes[id.0].entry = Some(entry);
                id
            }
            None => {
                self.nodes.push(Node {
                    entry: Some(entry),
                    prev: FRONT,
                    next: FRONT,
                });
                SlotId(self.nodes.len() - 1)
            }
        };
        self.link_front(id);
        self.len += 1;
        id
    }

    // == Unlink ==
    /// Splices `id` out of the chain by rewiring its neighbours.
    ///
    /// The node keeps its stale links until it is relinked or released.
    pub fn unlink(&mut self, id: SlotId) {
        debug_assert!(self.is_occupied(id), "unlink of vacant slot {:?}", id);
        self.splice(id);
    }

    /// Returns the most recently used slot.
    pub fn front(&self) -> Option<SlotId> {
        let id = self.nodes[FRONT.0].next;
        (id != BACK).then_some(id)
    }

    // == Back ==
    /// Returns the least recently used slot, the node just before the back sentinel.
    pub fn back(&self) -> Option<SlotId> {
        let id = self.nodes[BACK.0].prev;
        (id != FRONT).then_some(id)
    }

    // == Release ==
    /// Unlinks `id`, frees its slot and returns the entry it held.
    pub fn release(&mut self, id: SlotId) -> CacheEntry {
        let entry = match self.nodes.get_mut(id.0).and_then(|node| node.entry.take()) {
            Some(entry) => entry,
            None => panic!("release of vacant slot {:?}", id),
        };
        self.splice(id);
        self.free.push(id);
        self.len -= 1;
        entry
    }

    // == Accessors ==
    /// Returns the entry stored at `id`, if the slot is occupied.
    pub fn get(&self, id: SlotId) -> Option<&CacheEntry> {
        self.nodes.get(id.0).and_then(|node| node.entry.as_ref())
    }

    /// Returns a mutable reference to the entry stored at `id`.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut CacheEntry> {
        self.nodes.get_mut(id.0).and_then(|node| node.entry.as_mut())
    }

    /// Returns the number of linked entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if only the sentinels remain.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            current: self.nodes[FRONT.0].next,
        }
    }

    fn splice(&mut self, id: SlotId) {
        let (prev, next) = {
            let node = &self.nodes[id.0];
            (node.prev, node.next)
        };
        self.nodes[prev.0].next = next;
        self.nodes[next.0].prev = prev;
    }

    // == Link Front ==
    /// Links an unlinked, occupied slot right after the front sentinel.
    pub fn link_front(&mut self, id: SlotId) {
        let first = self.nodes[FRONT.0].next;
        self.nodes[id.0].prev = FRONT;
        self.nodes[id.0].next = first;
        self.nodes[first.0].prev = id;
        self.nodes[FRONT.0].next = id;
    }

    fn is_occupied(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    /// Walks the chain both ways and checks link symmetry and length.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let mut count = 0usize;
        let mut prev = FRONT;
        let mut current = self.nodes[FRONT.0].next;

        while current != BACK {
            let node = &self.nodes[current.0];
            assert!(node.entry.is_some(), "vacant slot {:?} is linked", current);
            assert_eq!(node.prev, prev, "broken back link at {:?}", current);
            prev = current;
            current = node.next;
            count += 1;
            assert!(count <= self.len, "cycle detected in recency list");
        }

        assert_eq!(self.nodes[BACK.0].prev, prev);
        assert_eq!(count, self.len);
        assert_eq!(self.nodes.len() - 2, self.len + self.free.len());
    }
}

impl Default for RecencyList {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over entries from front (MRU) to back (LRU).
pub struct Iter<'a> {
    list: &'a RecencyList,
    current: SlotId,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (SlotId, &'a CacheEntry);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == BACK {
            return None;
        }
        let id = self.current;
        let node = &self.list.nodes[id.0];
        self.current = node.next;
        node.entry.as_ref().map(|entry| (id, entry))
    }
}
