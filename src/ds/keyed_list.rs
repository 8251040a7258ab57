//! Keyed doubly linked list backed by `SlotArena`.
//!
//! An ordered sequence of `(key, value)` entries with O(1) lookup, removal,
//! move-to-front and pop from either end. Nodes live in a [`SlotArena`] and
//! link to each other by [`SlotId`]; a hash index maps each key to its slot.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<K, SlotId>          arena: SlotArena<Node<K, V>>
//!   ┌─────────┬─────────┐                ┌────────┬──────────────────────────────┐
//!   │ "a"     │  id_0   │───────────────►│ id_0   │ { a, va, prev: -,    next: 2 } │
//!   │ "b"     │  id_1   │───────────────►│ id_1   │ { b, vb, prev: 2,    next: - } │
//!   │ "c"     │  id_2   │───────────────►│ id_2   │ { c, vc, prev: 0,    next: 1 } │
//!   └─────────┴─────────┘                └────────┴──────────────────────────────┘
//!
//!   head (front) ─► [a] ◄──► [c] ◄──► [b] ◄── tail (back)
//! ```
//!
//! Engines decide what "front" means: FIFO and MRU insert at the front and
//! discard from the back or front respectively; ARC keeps each of its four
//! lists MRU-at-front.
//!
//! ## Operations
//!
//! | Operation        | Time |
//! |------------------|------|
//! | `push_front`     | O(1) |
//! | `move_to_front`  | O(1) |
//! | `pop_front/back` | O(1) |
//! | `remove`         | O(1) |
//! | `get/contains`   | O(1) |
//! | `iter`           | O(n) |
//!
//! `debug_validate_invariants()` is available in debug/test builds.

use std::borrow::Borrow;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Ordered map of keys to values with O(1) reordering.
#[derive(Debug)]
pub struct KeyedList<K, V> {
    arena: SlotArena<Node<K, V>>,
    index: FxHashMap<K, SlotId>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<K, V> KeyedList<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.contains_key(key)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let id = *self.index.get(key)?;
        self.arena.get(id).map(|node| &node.value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let id = *self.index.get(key)?;
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Inserts `value` at the front.
    ///
    /// An existing entry for `key` has its value replaced and is moved to the
    /// front; the previous value is returned.
    pub fn push_front(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            let old = self
                .arena
                .get_mut(id)
                .map(|node| std::mem::replace(&mut node.value, value));
            self.move_id_to_front(id);
            return old;
        }

        let id = self.arena.insert(Node {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.attach_front(id);
        self.index.insert(key, id);
        None
    }

    /// Moves an existing entry to the front; returns `false` if `key` is absent.
    pub fn move_to_front<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        match self.index.get(key) {
            Some(&id) => {
                self.move_id_to_front(id);
                true
            },
            None => false,
        }
    }

    /// Removes the entry for `key`, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let id = self.index.remove(key)?;
        self.detach(id);
        self.arena.remove(id).map(|node| node.value)
    }

    /// Removes and returns the front entry.
    pub fn pop_front(&mut self) -> Option<(K, V)> {
        let id = self.head?;
        self.take(id)
    }

    /// Removes and returns the back entry.
    pub fn pop_back(&mut self) -> Option<(K, V)> {
        let id = self.tail?;
        self.take(id)
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.index.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterates entries from front to back.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    /// Iterates keys from front to back.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    fn take(&mut self, id: SlotId) -> Option<(K, V)> {
        self.detach(id);
        let node = self.arena.remove(id)?;
        self.index.remove(&node.key);
        Some((node.key, node.value))
    }

    fn move_id_to_front(&mut self, id: SlotId) {
        if self.head == Some(id) {
            return;
        }
        self.detach(id);
        self.attach_front(id);
    }

    fn detach(&mut self, id: SlotId) {
        let Some((prev, next)) = self.arena.get(id).map(|node| (node.prev, node.next)) else {
            return;
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.arena.get_mut(prev_id) {
                    prev_node.next = next;
                }
            },
            None => self.head = next,
        }

        match next {
            Some(next_id) => {
                if let Some(next_node) = self.arena.get_mut(next_id) {
                    next_node.prev = prev;
                }
            },
            None => self.tail = prev,
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(old_head) => {
                if let Some(head_node) = self.arena.get_mut(old_head) {
                    head_node.prev = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.arena.len(), self.index.len(), "index/arena size mismatch");

        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert!(self.is_empty());
            return;
        }

        let mut seen = std::collections::HashSet::new();
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            assert!(seen.insert(id), "cycle detected");
            let node = self.arena.get(id).expect("linked node missing from arena");
            assert_eq!(node.prev, prev, "broken back link");
            assert_eq!(self.index.get(&node.key), Some(&id), "index points elsewhere");
            prev = Some(id);
            current = node.next;
        }
        assert_eq!(self.tail, prev, "tail does not terminate the chain");
        assert_eq!(seen.len(), self.len());
    }
}

impl<K, V> Default for KeyedList<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over `(key, value)` from front to back.
pub struct Iter<'a, K, V> {
    list: &'a KeyedList<K, V>,
    current: Option<SlotId>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.arena.get(self.current?)?;
        self.current = node.next;
        Some((&node.key, &node.value))
    }
}
