//! In-memory document store.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::StoreError;
use crate::store::DocumentStore;

/// Insertion-ordered in-memory store.
///
/// Documents live in an [`IndexMap`], so `keys` reports them in the order
/// they were first stored.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: IndexMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.docs.get(key).cloned())
    }

    fn put(&mut self, key: &str, doc: Value) -> Result<(), StoreError> {
        self.docs.insert(key.to_string(), doc);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<bool, StoreError> {
        Ok(self.docs.shift_remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.docs.keys().cloned().collect())
    }

    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.docs.contains_key(key))
    }
}
