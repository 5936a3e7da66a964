//! Simple key-value document stores driven by patch operations.
//!
//! Two [`DocumentStore`] implementations are provided: [`MemoryStore`]
//! keeps documents in an in-memory map, [`FileStore`] keeps one JSON file
//! per document under a directory. Both are single-writer stores with no
//! locking, transactions, or durability guarantees; they exist for local
//! tooling, demos, and tests, not for production workloads.
//!
//! Stored documents are edited through [`DocumentStore::update`], which
//! applies a patch to a copy of the current document and persists the
//! result only when every operation succeeds. [`parse_document`] layers
//! per-field type coercion on top, for document sources that deliver
//! numbers and booleans as strings.

pub mod coerce;
pub mod error;
pub mod file;
pub mod memory;
pub mod store;

pub use coerce::{coerce_value, matches_type, parse_document, FieldCoercion, FieldType};
pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::DocumentStore;
