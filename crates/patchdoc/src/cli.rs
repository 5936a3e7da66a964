//! Command-line tool logic.
//!
//! Provides the core logic used by the binary entry points:
//! - `patchdoc-apply`: apply a JSON Patch to a document
//! - `patchdoc-resolve`: look up a pointer in a document
//!
//! Both read the document from stdin and print the result as pretty JSON,
//! so they compose in shell pipelines.

use serde_json::Value;
use thiserror::Error;

use patchdoc_pointer::{parse_pointer, resolve, PointerError};

use crate::apply::apply;
use crate::codec::json::patch_from_json;
use crate::types::PatchError;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Patch(#[from] PatchError),
    #[error("{0}")]
    Pointer(#[from] PointerError),
}

// ── patchdoc-apply ────────────────────────────────────────────────────────

/// Apply a JSON Patch to a document.
///
/// `doc_json`: the document as a JSON string.
/// `patch_json`: the patch operations as a JSON array string.
///
/// Returns the patched document as a pretty-printed JSON string.
pub fn apply_json_patch(doc_json: &str, patch_json: &str) -> Result<String, CliError> {
    let doc: Value = serde_json::from_str(doc_json)?;
    let ops_raw: Value = serde_json::from_str(patch_json)?;
    let ops = patch_from_json(&ops_raw)?;
    let result = apply(doc, &ops)?;
    Ok(serde_json::to_string_pretty(&result)?)
}

// ── patchdoc-resolve ──────────────────────────────────────────────────────

/// Look up a pointer in a document.
///
/// `doc_json`: the document as a JSON string.
/// `pointer`: the pointer string (e.g. `/foo/bar`; `/` is the whole document).
///
/// Returns the found value as a pretty-printed JSON string.
pub fn lookup_pointer(doc_json: &str, pointer: &str) -> Result<String, CliError> {
    let doc: Value = serde_json::from_str(doc_json)?;
    let path = parse_pointer(pointer)?;
    let value = resolve(&doc, &path)?;
    Ok(serde_json::to_string_pretty(value)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────
