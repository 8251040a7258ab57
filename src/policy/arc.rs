//! Adaptive Replacement Cache (ARC) engine.
//!
//! Balances recency against frequency with four lists and an adaptive target
//! `p` for the size of T1. Hits on the ghost lists tell the engine which side
//! it shortchanged and move `p` accordingly.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                          ArcContainer<V> Layout                             │
//! │                                                                             │
//! │   Each list is a KeyedList<String, Item<V>> (arena + key index).            │
//! │                                                                             │
//! │   T1 (seen once recently)                T2 (seen twice or more)            │
//! │   ┌─────────────────────────┐            ┌─────────────────────────┐        │
//! │   │ front             back  │            │ front             back  │        │
//! │   │ [c] ◄──► [b] ◄──► [..]  │            │ [a] ◄──► [..] ◄──► [..] │        │
//! │   │ new               demote│            │ hot               demote│        │
//! │   └───────────┬─────────────┘            └───────────┬─────────────┘        │
//! │               ▼                                      ▼                      │
//! │   B1 (ghosts evicted from T1)            B2 (ghosts evicted from T2)        │
//! │   ┌─────────────────────────┐            ┌─────────────────────────┐        │
//! │   │ not live, kept for      │            │ not live, kept for      │        │
//! │   │ adaptation + re-admit   │            │ adaptation + re-admit   │        │
//! │   └─────────────────────────┘            └─────────────────────────┘        │
//! │                                                                             │
//! │   p: target |T1|, 0 ≤ p ≤ capacity                                          │
//! │     hit in B1 → p += max(|B2| / |B1|, 1)      (favor recency)               │
//! │     hit in B2 → p -= max(|B1| / |B2|, 1)      (favor frequency)             │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Flows
//!
//! ```text
//!   get(key):
//!     T1 hit  → move to front of T2
//!     T2 hit  → move to front of T2
//!     B1/B2   → adapt p, replace(), re-admit into front of T2
//!     miss    → None
//!
//!   put(item):
//!     key in B1/B2 → ghost hit as above, stored with the new item
//!     otherwise    → drop key from T1/T2, make room, insert at front of T1
//!
//!   replace():
//!     if |T1| >= max(1, p): T1 back → B1
//!     else:                 T2 back → B2
//! ```
//!
//! Making room on `put`, with `L1 = |T1| + |B1|` and `total` across all lists:
//!
//! | Condition                  | Action                                     |
//! |----------------------------|--------------------------------------------|
//! | `L1 >= c`, `\|T1\| < c`    | discard B1 back, `replace()`               |
//! | `L1 >= c`, `\|T1\| == c`   | trim ghosts, demote T1 back into B1        |
//! | `L1 < c`, `total >= c`     | discard B2 back if `total == 2c`, `replace()` |
//!
//! Live entries never exceed `c`, tracked entries (live and ghost) never
//! exceed `2c`. Ghost entries keep their item so a ghost hit on `get` can hand
//! it back. A capacity of `0` stores nothing.
//!
//! ## Operations
//!
//! | Operation | Time | Notes                                    |
//! |-----------|------|------------------------------------------|
//! | `get`     | O(1) | May promote T1→T2 or adapt via ghost hit |
//! | `put`     | O(1) | May demote one live entry to a ghost     |
//! | `remove`  | O(1) | Drops the key from all four lists        |
//! | `clear`   | O(n) | Also resets `p` to 0                     |
//!
//! ## Example Usage
//!
//! ```
//! use cachelayer::item::Item;
//! use cachelayer::policy::arc::ArcContainer;
//! use cachelayer::traits::{Container, ReadOnlyContainer};
//!
//! let mut arc = ArcContainer::new(2);
//! arc.put(Item::new("a", 1).unwrap()).unwrap();
//! arc.put(Item::new("b", 2).unwrap()).unwrap();
//! arc.put(Item::new("c", 3).unwrap()).unwrap();
//!
//! // "a" was demoted to the B1 ghost list
//! assert!(!arc.contains("a"));
//! assert_eq!(arc.b1_len(), 1);
//!
//! // A ghost hit re-admits it into T2 and grows p
//! assert_eq!(arc.get("a").unwrap().map(|item| *item.value()), Some(1));
//! assert_eq!(arc.t2_len(), 1);
//! assert_eq!(arc.p_value(), 1);
//! ```

use crate::ds::KeyedList;
use crate::error::Result;
use crate::item::Item;
use crate::traits::{BoxedContainer, Container, ReadOnlyContainer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ghost {
    B1,
    B2,
}

/// Adaptive replacement over four keyed lists.
#[derive(Debug)]
pub struct ArcContainer<V> {
    capacity: usize,
    p: usize,
    t1: KeyedList<String, Item<V>>,
    t2: KeyedList<String, Item<V>>,
    b1: KeyedList<String, Item<V>>,
    b2: KeyedList<String, Item<V>>,
}

impl<V> ArcContainer<V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            p: 0,
            t1: KeyedList::with_capacity(capacity),
            t2: KeyedList::with_capacity(capacity),
            b1: KeyedList::new(),
            b2: KeyedList::new(),
        }
    }

    /// Current target size for T1.
    pub fn p_value(&self) -> usize {
        self.p
    }

    /// Number of live entries seen once recently.
    pub fn t1_len(&self) -> usize {
        self.t1.len()
    }

    /// Number of live entries seen at least twice recently.
    pub fn t2_len(&self) -> usize {
        self.t2.len()
    }

    /// Number of ghosts demoted from T1.
    pub fn b1_len(&self) -> usize {
        self.b1.len()
    }

    /// Number of ghosts demoted from T2.
    pub fn b2_len(&self) -> usize {
        self.b2.len()
    }

    /// Returns `true` if `key` is remembered in either ghost list.
    pub fn is_ghost(&self, key: &str) -> bool {
        self.b1.contains(key) || self.b2.contains(key)
    }

    fn tracked_len(&self) -> usize {
        self.t1.len() + self.t2.len() + self.b1.len() + self.b2.len()
    }

    fn ghost_of(&self, key: &str) -> Option<Ghost> {
        if self.b1.contains(key) {
            Some(Ghost::B1)
        } else if self.b2.contains(key) {
            Some(Ghost::B2)
        } else {
            None
        }
    }

    fn adapt(&mut self, ghost: Ghost) {
        let before = self.p;
        match ghost {
            Ghost::B1 => {
                let delta = (self.b2.len() / self.b1.len().max(1)).max(1);
                self.p = (self.p + delta).min(self.capacity);
            }
            Ghost::B2 => {
                let delta = (self.b1.len() / self.b2.len().max(1)).max(1);
                self.p = self.p.saturating_sub(delta);
            }
        }
        tracing::trace!(policy = "arc", ?ghost, from = before, to = self.p, "adapted target");
    }

    fn replace(&mut self) {
        if self.t1.len() >= self.p.max(1) {
            if let Some((key, item)) = self.t1.pop_back() {
                tracing::trace!(policy = "arc", key = %key, "demoted T1 -> B1");
                self.b1.push_front(key, item);
            }
        } else if let Some((key, item)) = self.t2.pop_back() {
            tracing::trace!(policy = "arc", key = %key, "demoted T2 -> B2");
            self.b2.push_front(key, item);
        }
    }

    fn discard_ghost(&mut self, ghost: Ghost) {
        let list = match ghost {
            Ghost::B1 => &mut self.b1,
            Ghost::B2 => &mut self.b2,
        };
        if let Some((key, _)) = list.pop_back() {
            tracing::trace!(policy = "arc", ?ghost, key = %key, "discarded ghost");
        }
    }

    /// Re-admits a ghost into T2. `fresh` replaces the remembered item when
    /// the hit came from a `put`.
    fn admit_ghost(
        &mut self,
        key: &str,
        ghost: Ghost,
        fresh: Option<Item<V>>,
    ) -> Option<&Item<V>> {
        self.adapt(ghost);
        self.replace();
        let remembered = match ghost {
            Ghost::B1 => self.b1.remove(key),
            Ghost::B2 => self.b2.remove(key),
        }?;
        let item = fresh.unwrap_or(remembered);
        self.t2.push_front(key.to_owned(), item);
        self.t2.get(key)
    }

    /// Frees room for a key that is in none of the four lists.
    fn make_room(&mut self) {
        let l1 = self.t1.len() + self.b1.len();
        if l1 >= self.capacity {
            if self.t1.len() < self.capacity {
                self.discard_ghost(Ghost::B1);
                self.replace();
            } else {
                if !self.b1.is_empty() {
                    self.discard_ghost(Ghost::B1);
                } else if self.tracked_len() >= 2 * self.capacity {
                    self.discard_ghost(Ghost::B2);
                }
                if let Some((key, item)) = self.t1.pop_back() {
                    tracing::trace!(policy = "arc", key = %key, "demoted T1 -> B1");
                    self.b1.push_front(key, item);
                }
            }
        } else {
            let total = self.tracked_len();
            if total >= self.capacity {
                if total >= 2 * self.capacity {
                    self.discard_ghost(Ghost::B2);
                }
                self.replace();
            }
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.t1.debug_validate_invariants();
        self.t2.debug_validate_invariants();
        self.b1.debug_validate_invariants();
        self.b2.debug_validate_invariants();

        let c = self.capacity;
        assert!(self.p <= c, "p ({}) exceeds capacity ({c})", self.p);
        assert!(
            self.t1.len() + self.t2.len() <= c,
            "live entries {} + {} exceed capacity {c}",
            self.t1.len(),
            self.t2.len()
        );
        assert!(
            self.t1.len() + self.b1.len() <= c + 1,
            "|T1| + |B1| = {} exceeds {}",
            self.t1.len() + self.b1.len(),
            c + 1
        );
        assert!(
            self.tracked_len() <= 2 * c,
            "tracked entries {} exceed 2 * capacity {}",
            self.tracked_len(),
            2 * c
        );

        let lists = [&self.t1, &self.t2, &self.b1, &self.b2];
        for (i, list) in lists.iter().enumerate() {
            for (key, item) in list.iter() {
                assert_eq!(key, item.key(), "index key differs from item key");
                for other in &lists[i + 1..] {
                    assert!(!other.contains(key.as_str()), "key {key:?} tracked twice");
                }
            }
        }
    }
}

impl<V> ArcContainer<V>
where
    V: Clone + Send + 'static,
{
    /// Registry factory.
    pub fn boxed(capacity: usize) -> BoxedContainer<V> {
        Box::new(Self::new(capacity))
    }
}

impl<V: Clone> Container<V> for ArcContainer<V> {
    fn clear(&mut self) -> Result<()> {
        self.p = 0;
        self.t1.clear();
        self.t2.clear();
        self.b1.clear();
        self.b2.clear();
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.t1.remove(key);
        self.t2.remove(key);
        self.b1.remove(key);
        self.b2.remove(key);
        Ok(())
    }

    fn put(&mut self, item: Item<V>) -> Result<()> {
        if self.capacity == 0 {
            return Ok(());
        }

        let key = item.key().to_owned();
        if let Some(ghost) = self.ghost_of(&key) {
            self.admit_ghost(&key, ghost, Some(item));
            return Ok(());
        }

        self.t1.remove(key.as_str());
        self.t2.remove(key.as_str());
        self.make_room();
        self.t1.push_front(key, item);
        Ok(())
    }

    fn get(&mut self, key: &str) -> Result<Option<Item<V>>> {
        if let Some(item) = self.t1.remove(key) {
            self.t2.push_front(key.to_owned(), item);
            return Ok(self.t2.get(key).cloned());
        }
        if self.t2.move_to_front(key) {
            return Ok(self.t2.get(key).cloned());
        }
        match self.ghost_of(key) {
            Some(ghost) => Ok(self.admit_ghost(key, ghost, None).cloned()),
            None => Ok(None),
        }
    }

    /// The preceding `get` already promoted the entry; only the stored item
    /// is refreshed. A key that is no longer live is left alone.
    fn put_touched(&mut self, item: Item<V>) -> Result<()> {
        let key = item.key();
        if let Some(slot) = self.t2.get_mut(key) {
            *slot = item;
            return Ok(());
        }
        if let Some(slot) = self.t1.get_mut(key) {
            *slot = item;
        }
        Ok(())
    }
}

impl<V> ReadOnlyContainer for ArcContainer<V> {
    fn contains(&self, key: &str) -> bool {
        self.t1.contains(key) || self.t2.contains(key)
    }

    fn len(&self) -> usize {
        self.t1.len() + self.t2.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
