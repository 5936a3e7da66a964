//! The store seam.

use patchdoc::{apply_safe, Op};
use serde_json::Value;

use crate::coerce::{parse_document, FieldCoercion};
use crate::error::StoreError;

/// Keyed storage for JSON documents.
///
/// Implementations are single-writer and make no atomicity or concurrency
/// promises; they exist for tooling, tests, and small local datasets, not
/// for production workloads.
pub trait DocumentStore {
    /// Fetch the document stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Store `doc` under `key`, replacing any existing document.
    fn put(&mut self, key: &str, doc: Value) -> Result<(), StoreError>;

    /// Drop the document under `key`. Returns whether one existed.
    fn delete(&mut self, key: &str) -> Result<bool, StoreError>;

    /// Keys of every stored document.
    fn keys(&self) -> Result<Vec<String>, StoreError>;

    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }

    /// Patch the document under `key` and store the result.
    ///
    /// The patch goes through [`apply_safe`], so a failing operation leaves
    /// the stored document as it was. Returns the new document.
    fn update(&mut self, key: &str, ops: &[Op]) -> Result<Value, StoreError> {
        let current = self
            .get(key)?
            .ok_or_else(|| StoreError::UnknownKey(key.to_string()))?;
        let next = apply_safe(&current, ops)?;
        self.put(key, next.clone())?;
        Ok(next)
    }

    /// Ingest raw JSON text through the coercing parser, then store it.
    ///
    /// Returns the document as stored, with every declared field coerced.
    fn put_text(
        &mut self,
        key: &str,
        text: &str,
        fields: &[FieldCoercion],
    ) -> Result<Value, StoreError> {
        let doc = parse_document(text, fields)?;
        self.put(key, doc.clone())?;
        Ok(doc)
    }
}
