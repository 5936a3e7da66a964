//! JSON codec for patch operations.
//!
//! Converts operations to/from `serde_json::Value` in the RFC 6902 wire
//! shape: objects with an `"op"` tag, a `"path"` pointer string, and the
//! per-operation fields (`"value"`, `"from"`). The read-only `get` marker
//! uses the same shape with only `"op"` and `"path"`.

use serde_json::{json, Value};

use patchdoc_pointer::{format_pointer, parse_pointer, Path};

use crate::types::{Op, PatchError};

// ── Path helpers ──────────────────────────────────────────────────────────

fn encode_path(path: &[String]) -> Value {
    Value::String(format_pointer(path))
}

fn decode_path(v: &Value) -> Result<Path, PatchError> {
    let s = v
        .as_str()
        .ok_or_else(|| PatchError::InvalidOp("path must be a string".into()))?;
    Ok(parse_pointer(s)?)
}

// ── Serialization ─────────────────────────────────────────────────────────

/// Serialize an [`Op`] to a `serde_json::Value` in the JSON Patch format.
pub fn op_to_json(op: &Op) -> Value {
    match op {
        Op::Add { path, value } => json!({
            "op": "add",
            "path": encode_path(path),
            "value": value
        }),
        Op::Remove { path } => json!({
            "op": "remove",
            "path": encode_path(path)
        }),
        Op::Replace { path, value } => json!({
            "op": "replace",
            "path": encode_path(path),
            "value": value
        }),
        Op::Copy { path, from } => json!({
            "op": "copy",
            "path": encode_path(path),
            "from": encode_path(from)
        }),
        Op::Move { path, from } => json!({
            "op": "move",
            "path": encode_path(path),
            "from": encode_path(from)
        }),
        Op::Test { path, value } => json!({
            "op": "test",
            "path": encode_path(path),
            "value": value
        }),
        Op::Get { path } => json!({
            "op": "get",
            "path": encode_path(path)
        }),
    }
}

// ── Deserialization ───────────────────────────────────────────────────────

/// Deserialize a `serde_json::Value` into an [`Op`].
pub fn op_from_json(v: &Value) -> Result<Op, PatchError> {
    let obj = v
        .as_object()
        .ok_or_else(|| PatchError::InvalidOp("operation must be an object".into()))?;
    let op_str = obj
        .get("op")
        .and_then(|v| v.as_str())
        .ok_or_else(|| PatchError::InvalidOp("missing 'op' field".into()))?;
    let path = decode_path(
        obj.get("path")
            .ok_or_else(|| PatchError::InvalidOp("missing 'path' field".into()))?,
    )?;

    match op_str {
        "add" => {
            let value = obj
                .get("value")
                .ok_or_else(|| PatchError::InvalidOp("add requires 'value'".into()))?
                .clone();
            Ok(Op::Add { path, value })
        }
        "remove" => Ok(Op::Remove { path }),
        "replace" => {
            let value = obj
                .get("value")
                .ok_or_else(|| PatchError::InvalidOp("replace requires 'value'".into()))?
                .clone();
            Ok(Op::Replace { path, value })
        }
        "copy" => {
            let from = decode_path(
                obj.get("from")
                    .ok_or_else(|| PatchError::InvalidOp("copy requires 'from'".into()))?,
            )?;
            Ok(Op::Copy { path, from })
        }
        "move" => {
            let from = decode_path(
                obj.get("from")
                    .ok_or_else(|| PatchError::InvalidOp("move requires 'from'".into()))?,
            )?;
            Ok(Op::Move { path, from })
        }
        "test" => {
            let value = obj
                .get("value")
                .ok_or_else(|| PatchError::InvalidOp("test requires 'value'".into()))?
                .clone();
            Ok(Op::Test { path, value })
        }
        "get" => Ok(Op::Get { path }),
        other => Err(PatchError::InvalidOp(format!("unknown op: {other}"))),
    }
}

/// Serialize a list of operations to a JSON array.
pub fn patch_to_json(ops: &[Op]) -> Value {
    Value::Array(ops.iter().map(op_to_json).collect())
}

/// Deserialize a JSON array into a list of operations.
pub fn patch_from_json(v: &Value) -> Result<Vec<Op>, PatchError> {
    let arr = v
        .as_array()
        .ok_or_else(|| PatchError::InvalidOp("patch must be an array".into()))?;
    arr.iter().map(op_from_json).collect()
}
