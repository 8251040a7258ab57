//! Tiered composition of containers.
//!
//! ```text
//!   get(k):   L0 ──miss──► L1 ──miss──► L2 ──miss──► None
//!              │hit         │hit         │hit
//!              ▼            ▼            ▼
//!           Some(item)   Some(item)   Some(item)     (later levels not queried)
//!
//!   put/remove/clear:   L0 ──ok──► L1 ──ok──► L2 ──ok──► Ok(())
//!                        │err       │err       │err
//!                        ▼          ▼          ▼
//!                       Err        Err        Err      (no rollback)
//! ```
//!
//! A hit on a later level does not copy the item into earlier levels. Callers
//! that want promotion can use [`MultilevelContainer::get_with_level`] and
//! write the item back themselves.
//!
//! A failure part way through the chain leaves earlier levels modified. Treat
//! it as inconsistent state across tiers: retry the whole operation or give
//! up on the cache.

use crate::error::{CacheError, Result};
use crate::item::Item;
use crate::traits::{BoxedContainer, Container};

/// Ordered, non-empty chain of containers queried and written in order.
pub struct MultilevelContainer<V> {
    levels: Vec<BoxedContainer<V>>,
}

impl<V> MultilevelContainer<V> {
    /// Builds the chain; fails if `levels` is empty.
    pub fn new(levels: Vec<BoxedContainer<V>>) -> Result<Self> {
        if levels.is_empty() {
            return Err(CacheError::validation(
                "multilevel container needs at least one level",
            ));
        }
        Ok(Self { levels })
    }

    /// Number of levels.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn levels(&self) -> &[BoxedContainer<V>] {
        &self.levels
    }

    pub fn level_mut(&mut self, index: usize) -> Option<&mut BoxedContainer<V>> {
        self.levels.get_mut(index)
    }

    /// Like `get`, but also reports which level answered.
    pub fn get_with_level(&mut self, key: &str) -> Result<Option<(usize, Item<V>)>> {
        for (index, level) in self.levels.iter_mut().enumerate() {
            let found = level
                .get(key)
                .inspect_err(|err| log_failure("get", index, err))?;
            if let Some(item) = found {
                return Ok(Some((index, item)));
            }
        }
        Ok(None)
    }

    fn each_level(
        &mut self,
        operation: &'static str,
        mut f: impl FnMut(&mut BoxedContainer<V>) -> Result<()>,
    ) -> Result<()> {
        for (index, level) in self.levels.iter_mut().enumerate() {
            f(level).inspect_err(|err| log_failure(operation, index, err))?;
        }
        Ok(())
    }
}

fn log_failure(operation: &'static str, level: usize, err: &CacheError) {
    tracing::warn!(operation, level, error = %err, "multilevel level failed");
}

impl<V: Clone> Container<V> for MultilevelContainer<V> {
    fn clear(&mut self) -> Result<()> {
        self.each_level("clear", |level| level.clear())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.each_level("remove", |level| level.remove(key))
    }

    fn put(&mut self, item: Item<V>) -> Result<()> {
        self.each_level("put", |level| level.put(item.clone()))
    }

    fn get(&mut self, key: &str) -> Result<Option<Item<V>>> {
        Ok(self.get_with_level(key)?.map(|(_, item)| item))
    }

    fn put_touched(&mut self, item: Item<V>) -> Result<()> {
        self.each_level("put", |level| level.put_touched(item.clone()))
    }
}

impl<V> std::fmt::Debug for MultilevelContainer<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultilevelContainer")
            .field("depth", &self.levels.len())
            .finish()
    }
}
