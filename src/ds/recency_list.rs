//! Recency list: an arena-backed doubly linked list ordered from least- to
//! most-recently-used.
//!
//! Nodes live in a [`SlotArena`] and link to their neighbors by [`SlotId`],
//! so splicing a node out of the middle and re-appending it at the MRU end
//! is pure handle rewiring with no allocation, no reference counting, and no
//! possibility of an ownership cycle. The list boundaries are `Option<SlotId>`
//! rather than sentinel nodes; the empty and single-node cases fall out of
//! the same `match` arms as the general case.
//!
//! ```text
//!   lru ─► [id_3] ◄──► [id_1] ◄──► [id_2] ◄─ mru
//!          least recent            most recent
//! ```
//!
//! Invariants (checked by `debug_validate` in debug/test builds):
//! - walking lru -> mru visits each node exactly once, in strictly
//!   increasing recency;
//! - every node's `prev` resolves to its true predecessor (a stale back
//!   link would corrupt eviction order silently, so both links are rewired
//!   together on every structural change);
//! - node count equals arena occupancy.
//!
//! All structural operations are O(1): `push_mru`, `pop_lru`,
//! `move_to_mru`, `remove`.

use crate::ds::arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Doubly linked recency order over arena slots, LRU at the front and MRU at
/// the back.
#[derive(Debug)]
pub struct RecencyList<T> {
    arena: SlotArena<Node<T>>,
    lru: Option<SlotId>,
    mru: Option<SlotId>,
}

impl<T> RecencyList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            lru: None,
            mru: None,
        }
    }

    /// Creates an empty list with node storage reserved for `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            lru: None,
            mru: None,
        }
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the list holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `id` is a live node of this list.
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    /// Returns the least-recently-used value.
    pub fn peek_lru(&self) -> Option<&T> {
        self.lru
            .and_then(|id| self.arena.get(id).map(|node| &node.value))
    }

    /// Returns the handle of the least-recently-used node.
    pub fn lru_id(&self) -> Option<SlotId> {
        self.lru
    }

    /// Returns the handle of the most-recently-used node.
    pub fn mru_id(&self) -> Option<SlotId> {
        self.mru
    }

    /// Returns the value at `id`, if present.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value at `id`, if present.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Appends a new node at the most-recently-used end and returns its
    /// handle.
    pub fn push_mru(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: self.mru,
            next: None,
        });
        match self.mru {
            Some(old_mru) => {
                if let Some(node) = self.arena.get_mut(old_mru) {
                    node.next = Some(id);
                }
            }
            None => self.lru = Some(id),
        }
        self.mru = Some(id);
        id
    }

    /// Removes and returns the least-recently-used value.
    pub fn pop_lru(&mut self) -> Option<T> {
        let id = self.lru?;
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Removes the node `id` and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Moves an existing node to the most-recently-used end; returns `false`
    /// if `id` is not present.
    pub fn move_to_mru(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if Some(id) == self.mru {
            return true;
        }
        self.detach(id);
        self.attach_mru(id);
        true
    }

    /// Drops every node and resets the boundaries.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.lru = None;
        self.mru = None;
    }

    /// Returns an iterator over values from LRU to MRU.
    pub fn iter(&self) -> RecencyIter<'_, T> {
        RecencyIter {
            list: self,
            current: self.lru,
        }
    }

    /// Unlinks `id` from the chain without freeing its slot. Both neighbor
    /// links and the boundary handles are rewired in one pass so the
    /// back-link invariant holds at every exit.
    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.arena.get_mut(prev_id) {
                    prev_node.next = next;
                }
            }
            None => self.lru = next,
        }

        match next {
            Some(next_id) => {
                if let Some(next_node) = self.arena.get_mut(next_id) {
                    next_node.prev = prev;
                }
            }
            None => self.mru = prev,
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }

        Some(())
    }

    /// Links a detached node at the MRU end.
    fn attach_mru(&mut self, id: SlotId) -> Option<()> {
        let old_mru = self.mru;
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = old_mru;
            node.next = None;
        } else {
            return None;
        }
        match old_mru {
            Some(old_id) => {
                if let Some(old_node) = self.arena.get_mut(old_id) {
                    old_node.next = Some(id);
                }
            }
            None => self.lru = Some(id),
        }
        self.mru = Some(id);
        Some(())
    }

    #[cfg(any(test, debug_assertions))]
    /// Walks the chain and asserts every structural invariant.
    pub fn debug_validate(&self) {
        if self.lru.is_none() || self.mru.is_none() {
            assert!(self.lru.is_none());
            assert!(self.mru.is_none());
            assert_eq!(self.len(), 0);
            return;
        }

        let mut seen = std::collections::HashSet::new();
        let mut count = 0usize;
        let mut current = self.lru;
        let mut prev = None;

        while let Some(id) = current {
            assert!(seen.insert(id), "cycle through node {:?}", id);
            let node = self.arena.get(id).expect("linked node missing from arena");
            assert_eq!(node.prev, prev, "stale back link at {:?}", id);
            if node.next.is_none() {
                assert_eq!(self.mru, Some(id));
            }
            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len());
        }

        assert_eq!(count, self.len());
        assert_eq!(self.arena.len(), self.len());
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over values from LRU to MRU.
pub struct RecencyIter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for RecencyIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}
