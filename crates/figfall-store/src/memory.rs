//! In-memory mapping store backed by an ordered map.

use std::collections::BTreeMap;
use std::ops::Bound;

use figfall_error::Result;
use figfall_types::{CodeReference, ItemCode, Quarter};
use parking_lot::Mutex;

use crate::MappingStore;

#[derive(Debug, Clone, Copy)]
struct Entry {
    quarter: Quarter,
    preowned: bool,
}

/// Ephemeral store; the ordered map gives the range queries directly.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<u32, Entry>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of confirmed mappings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the store holds no mappings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

fn to_reference(code: u32, entry: Entry) -> CodeReference {
    CodeReference::new(ItemCode(code), entry.preowned, entry.quarter)
}

impl MappingStore for MemoryStore {
    fn get(&self, code: ItemCode) -> Result<Option<CodeReference>> {
        Ok(self
            .entries
            .lock()
            .get(&code.get())
            .map(|&entry| to_reference(code.get(), entry)))
    }

    fn nearest_below(&self, code: ItemCode) -> Result<Option<CodeReference>> {
        Ok(self
            .entries
            .lock()
            .range((Bound::Unbounded, Bound::Included(code.get())))
            .next_back()
            .map(|(&c, &entry)| to_reference(c, entry)))
    }

    fn nearest_above(&self, code: ItemCode) -> Result<Option<CodeReference>> {
        Ok(self
            .entries
            .lock()
            .range((Bound::Included(code.get()), Bound::Unbounded))
            .next()
            .map(|(&c, &entry)| to_reference(c, entry)))
    }

    fn insert(&self, reference: &CodeReference) -> Result<()> {
        self.entries
            .lock()
            .entry(reference.code.get())
            .or_insert(Entry { quarter: reference.quarter, preowned: reference.preowned });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(code: u32, quarter: &str) -> CodeReference {
        CodeReference::new(ItemCode(code), false, quarter.parse().unwrap())
    }

    #[test]
    fn range_queries_bracket_a_missing_code() {
        let store = MemoryStore::new();
        store.insert(&reference(100_000, "171")).unwrap();
        store.insert(&reference(100_100, "172")).unwrap();

        let below = store.nearest_below(ItemCode(100_050)).unwrap().unwrap();
        let above = store.nearest_above(ItemCode(100_050)).unwrap().unwrap();
        assert_eq!(below.code, ItemCode(100_000));
        assert_eq!(above.code, ItemCode(100_100));
    }

    #[test]
    fn range_queries_are_inclusive() {
        let store = MemoryStore::new();
        store.insert(&reference(42, "181")).unwrap();
        assert_eq!(store.nearest_below(ItemCode(42)).unwrap().unwrap().code, ItemCode(42));
        assert_eq!(store.nearest_above(ItemCode(42)).unwrap().unwrap().code, ItemCode(42));
    }

    #[test]
    fn insert_never_overwrites() {
        let store = MemoryStore::new();
        store.insert(&reference(7, "171")).unwrap();
        store.insert(&reference(7, "204")).unwrap();
        let kept = store.get(ItemCode(7)).unwrap().unwrap();
        assert_eq!(kept.quarter.to_string(), "171");
    }

    #[test]
    fn missing_neighbors_are_none() {
        let store = MemoryStore::new();
        store.insert(&reference(50, "191")).unwrap();
        assert!(store.nearest_below(ItemCode(49)).unwrap().is_none());
        assert!(store.nearest_above(ItemCode(51)).unwrap().is_none());
    }
}
