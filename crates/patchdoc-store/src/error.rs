//! Store error type.

use patchdoc::PatchError;
use thiserror::Error;

use crate::coerce::FieldType;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An engine failure surfaced through `update` or the coercing parser;
    /// the display code is the engine's own (`PATH_NOT_FOUND`, ...).
    #[error("{0}")]
    Patch(#[from] PatchError),

    /// `update` was asked to patch a document that is not in the store.
    #[error("UNKNOWN_KEY: {0}")]
    UnknownKey(String),

    /// The key cannot name a document (empty, path separators, `.`/`..`).
    #[error("INVALID_KEY: {0}")]
    InvalidKey(String),

    /// A declared field could not be converted to its expected type.
    #[error("COERCE: cannot coerce {pointer} to {expected}")]
    Coerce { pointer: String, expected: FieldType },
}
