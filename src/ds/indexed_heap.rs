//! Indexed binary min-heap keyed by access count.
//!
//! Unlike a lazy heap, every key has exactly one entry. A position index
//! (`key -> slot in the heap array`) lets a single entry's priority change and
//! be restored to heap order in O(log n), and lets any key be removed in
//! O(log n).
//!
//! ## Architecture
//!
//! ```text
//!   entries: Vec<Entry>  (heap order, min at 0)      index: FxHashMap<K, usize>
//!   ┌─────┬───────────────────────┐                  ┌──────┬─────┐
//!   │  0  │ { b, count: 0, vb }   │ ◄────────────────│ "b"  │  0  │
//!   │  1  │ { a, count: 2, va }   │ ◄────────────────│ "a"  │  1  │
//!   │  2  │ { c, count: 1, vc }   │ ◄────────────────│ "c"  │  2  │
//!   └─────┴───────────────────────┘                  └──────┴─────┘
//!
//!   swap(i, j) always rewrites index[entries[i].key] and index[entries[j].key]
//! ```
//!
//! ## Ties
//!
//! Entries with equal counts come out in whatever order the heap structure
//! happens to hold them. Insertion order is not preserved among ties.

use std::borrow::Borrow;
use std::hash::Hash;

use rustc_hash::FxHashMap;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    count: u64,
    value: V,
}

/// Min-heap of values ordered by a per-key access count.
#[derive(Debug)]
pub struct IndexedMinHeap<K, V> {
    entries: Vec<Entry<K, V>>,
    index: FxHashMap<K, usize>,
}

impl<K, V> IndexedMinHeap<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Looks up a value without changing its count.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let pos = *self.index.get(key)?;
        Some(&self.entries[pos].value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let pos = *self.index.get(key)?;
        Some(&mut self.entries[pos].value)
    }

    /// Current count for `key`.
    pub fn count<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let pos = *self.index.get(key)?;
        Some(self.entries[pos].count)
    }

    /// Inserts `key` with count zero, or replaces the value of an existing
    /// key while keeping its count. Returns the previous value.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&pos) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[pos].value, value));
        }

        let pos = self.entries.len();
        self.index.insert(key.clone(), pos);
        self.entries.push(Entry {
            key,
            count: 0,
            value,
        });
        self.sift_up(pos);
        None
    }

    /// Bumps the count for `key` and restores heap order; returns the new count.
    pub fn increment<Q>(&mut self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let pos = *self.index.get(key)?;
        let entry = &mut self.entries[pos];
        entry.count = entry.count.saturating_add(1);
        let count = entry.count;
        self.sift_down(pos);
        Some(count)
    }

    /// Entry with the smallest count.
    pub fn peek_min(&self) -> Option<(&K, &V, u64)> {
        self.entries
            .first()
            .map(|entry| (&entry.key, &entry.value, entry.count))
    }

    /// Removes the entry with the smallest count.
    pub fn pop_min(&mut self) -> Option<(K, V, u64)> {
        let entry = self.remove_at(0)?;
        Some((entry.key, entry.value, entry.count))
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let pos = *self.index.get(key)?;
        self.remove_at(pos).map(|entry| entry.value)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    fn remove_at(&mut self, pos: usize) -> Option<Entry<K, V>> {
        let last = self.entries.len().checked_sub(1)?;
        self.swap(pos, last);
        let entry = self.entries.pop()?;
        self.index.remove(&entry.key);
        if pos < self.entries.len() {
            self.sift_down(pos);
            self.sift_up(pos);
        }
        Some(entry)
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.entries.swap(a, b);
        if let Some(slot) = self.index.get_mut(&self.entries[a].key) {
            *slot = a;
        }
        if let Some(slot) = self.index.get_mut(&self.entries[b].key) {
            *slot = b;
        }
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.entries[pos].count >= self.entries[parent].count {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;
            if left < len && self.entries[left].count < self.entries[smallest].count {
                smallest = left;
            }
            if right < len && self.entries[right].count < self.entries[smallest].count {
                smallest = right;
            }
            if smallest == pos {
                break;
            }
            self.swap(pos, smallest);
            pos = smallest;
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.entries.len(), self.index.len(), "index/heap size mismatch");
        for (pos, entry) in self.entries.iter().enumerate() {
            assert_eq!(self.index.get(&entry.key), Some(&pos), "stale position index");
            if pos > 0 {
                let parent = (pos - 1) / 2;
                assert!(
                    self.entries[parent].count <= entry.count,
                    "heap order violated at {pos}"
                );
            }
        }
    }
}

impl<K, V> Default for IndexedMinHeap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
