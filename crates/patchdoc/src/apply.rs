//! Patch application logic.
//!
//! Two entry points wrap the same per-operation applicators:
//!
//! - [`apply`] consumes the document and edits it in place. On an error the
//!   partially patched value is dropped with the `Result`, so callers never
//!   observe a half-applied document.
//! - [`apply_safe`] borrows the document, deep-clones it up front, and leaves
//!   the original untouched no matter how the patch ends.
//!
//! Operations apply in order; the first failure stops the run.

use serde_json::Value;

use patchdoc_pointer::{get_mut, is_child, is_root, is_valid_index, resolve, resolve_mut};

use crate::types::{Op, PatchError};
use crate::value::{deep_clone, deep_equal};

// ── Individual operation applicators ──────────────────────────────────────

fn apply_add(doc: &mut Value, path: &[String], value: Value) -> Result<(), PatchError> {
    // String-append extension: an add whose value is a string and whose
    // target already holds a string concatenates onto the target instead of
    // inserting. Only `add` does this; `replace` always overwrites.
    if let Value::String(addition) = &value {
        if let Some(Value::String(existing)) = get_mut(doc, path) {
            existing.push_str(addition);
            return Ok(());
        }
    }

    if is_root(path) {
        *doc = value;
        return Ok(());
    }
    let (parent_path, last) = path.split_at(path.len() - 1);
    let step = &last[0];
    let parent = resolve_mut(doc, parent_path)?;
    match parent {
        Value::Object(map) => {
            map.insert(step.clone(), value);
            Ok(())
        }
        Value::Array(arr) => {
            if step == "-" {
                arr.push(value);
                return Ok(());
            }
            if !is_valid_index(step) {
                return Err(PatchError::MalformedPointer);
            }
            let idx: usize = step.parse().map_err(|_| PatchError::MalformedPointer)?;
            // Index equal to the length appends.
            if idx > arr.len() {
                return Err(PatchError::PathNotFound);
            }
            arr.insert(idx, value);
            Ok(())
        }
        _ => Err(PatchError::PathNotFound),
    }
}

fn apply_remove(doc: &mut Value, path: &[String]) -> Result<Value, PatchError> {
    if is_root(path) {
        // The root is not inside any container, so there is nothing to
        // detach it from.
        return Err(PatchError::PathNotFound);
    }
    let (parent_path, last) = path.split_at(path.len() - 1);
    let step = &last[0];
    let parent = resolve_mut(doc, parent_path)?;
    match parent {
        Value::Object(map) => map.remove(step).ok_or(PatchError::PathNotFound),
        Value::Array(arr) => {
            // "-" is an add-only slot; it never names an existing element.
            if step == "-" {
                return Err(PatchError::PathNotFound);
            }
            if !is_valid_index(step) {
                return Err(PatchError::MalformedPointer);
            }
            let idx: usize = step.parse().map_err(|_| PatchError::MalformedPointer)?;
            if idx >= arr.len() {
                return Err(PatchError::PathNotFound);
            }
            Ok(arr.remove(idx))
        }
        _ => Err(PatchError::PathNotFound),
    }
}

fn apply_replace(doc: &mut Value, path: &[String], value: Value) -> Result<(), PatchError> {
    if is_root(path) {
        *doc = value;
        return Ok(());
    }
    let (parent_path, last) = path.split_at(path.len() - 1);
    let step = &last[0];
    let parent = resolve_mut(doc, parent_path)?;
    match parent {
        Value::Object(map) => match map.get_mut(step) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(PatchError::PathNotFound),
        },
        Value::Array(arr) => {
            if step == "-" {
                return Err(PatchError::PathNotFound);
            }
            if !is_valid_index(step) {
                return Err(PatchError::MalformedPointer);
            }
            let idx: usize = step.parse().map_err(|_| PatchError::MalformedPointer)?;
            match arr.get_mut(idx) {
                Some(slot) => {
                    *slot = value;
                    Ok(())
                }
                None => Err(PatchError::PathNotFound),
            }
        }
        _ => Err(PatchError::PathNotFound),
    }
}

fn apply_copy(doc: &mut Value, path: &[String], from: &[String]) -> Result<(), PatchError> {
    let source = deep_clone(resolve(doc, from)?);
    apply_add(doc, path, source)
}

fn apply_move(doc: &mut Value, path: &[String], from: &[String]) -> Result<(), PatchError> {
    // The source must exist even when the move is a no-op.
    resolve(doc, from)?;
    // Moving a value onto itself changes nothing.
    if from == path {
        return Ok(());
    }
    // A value cannot move into its own subtree: detaching the source would
    // take the target's parent with it.
    if is_child(from, path) {
        return Err(PatchError::PathNotFound);
    }
    let detached = apply_remove(doc, from)?;
    apply_add(doc, path, detached)
}

fn apply_test(doc: &Value, path: &[String], expected: &Value) -> Result<(), PatchError> {
    let actual = resolve(doc, path)?;
    if !deep_equal(actual, expected) {
        return Err(PatchError::AssertionFailed);
    }
    Ok(())
}

// ── Entry points ──────────────────────────────────────────────────────────

/// Apply a single operation to a document in place.
///
/// `get` is a read-only marker for patch producers and is rejected here.
pub fn apply_op(doc: &mut Value, op: &Op) -> Result<(), PatchError> {
    match op {
        Op::Add { path, value } => apply_add(doc, path, value.clone()),
        Op::Remove { path } => {
            apply_remove(doc, path)?;
            Ok(())
        }
        Op::Replace { path, value } => apply_replace(doc, path, value.clone()),
        Op::Copy { path, from } => apply_copy(doc, path, from),
        Op::Move { path, from } => apply_move(doc, path, from),
        Op::Test { path, value } => apply_test(doc, path, value),
        Op::Get { .. } => Err(PatchError::InvalidOp(
            "\"get\" is a read-only marker and cannot be applied".into(),
        )),
    }
}

/// Apply a patch to a document, consuming it.
///
/// Operations run in order; the first failure aborts the run and the
/// partially patched document is dropped. The empty patch returns the
/// document unchanged.
///
/// # Example
///
/// ```
/// use patchdoc::{apply, Op};
/// use serde_json::json;
///
/// let doc = json!({"name": "doc"});
/// let ops = vec![Op::Add { path: vec!["size".to_string()], value: json!(4) }];
/// let out = apply(doc, &ops).unwrap();
/// assert_eq!(out, json!({"name": "doc", "size": 4}));
/// ```
pub fn apply(mut doc: Value, ops: &[Op]) -> Result<Value, PatchError> {
    for op in ops {
        apply_op(&mut doc, op)?;
    }
    Ok(doc)
}

/// Apply a patch to a borrowed document, leaving the original untouched.
///
/// The document is deep-cloned before the first operation runs, so the
/// caller's value is identical afterwards whether the patch succeeded or
/// failed.
///
/// # Example
///
/// ```
/// use patchdoc::{apply_safe, Op, PatchError};
/// use serde_json::json;
///
/// let doc = json!({"name": "doc"});
/// let ops = vec![Op::Remove { path: vec!["missing".to_string()] }];
/// assert_eq!(apply_safe(&doc, &ops), Err(PatchError::PathNotFound));
/// assert_eq!(doc, json!({"name": "doc"}));
/// ```
pub fn apply_safe(doc: &Value, ops: &[Op]) -> Result<Value, PatchError> {
    apply(deep_clone(doc), ops)
}

// ── Tests ─────────────────────────────────────────────────────────────────
