//! Patch operation validator.
//!
//! Validates raw patch operations (as `serde_json::Value` maps) before
//! decoding, so callers can reject untrusted input early with messages that
//! name the failing operation index. The applicator performs its own checks;
//! this layer exists to report shape problems without touching a document.

use serde_json::Value;

use patchdoc_pointer::{is_child, parse_pointer, Path};

// ── Error ──────────────────────────────────────────────────────────────────

/// Error returned by validation functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ValidationError {}

fn err(msg: &str) -> ValidationError {
    ValidationError(msg.to_string())
}

// ── Public API ─────────────────────────────────────────────────────────────

/// Validate a list of operations.
///
/// Errors include the index of the failing operation:
/// `"Error in operation [index = N] (reason)."`.
pub fn validate_operations(ops: &Value) -> Result<(), ValidationError> {
    let arr = ops.as_array().ok_or_else(|| err("Not an array."))?;
    if arr.is_empty() {
        return Err(err("Empty operation patch."));
    }
    for (i, op) in arr.iter().enumerate() {
        validate_operation(op).map_err(|e| {
            ValidationError(format!("Error in operation [index = {}] ({}).", i, e.0))
        })?;
    }
    Ok(())
}

/// Validate a single operation object.
pub fn validate_operation(op: &Value) -> Result<(), ValidationError> {
    let map = op.as_object().ok_or_else(|| err("OP_INVALID"))?;

    // path must be a string holding a well-formed pointer
    let path = map.get("path").ok_or_else(|| err("OP_PATH_INVALID"))?;
    let path_str = path.as_str().ok_or_else(|| err("OP_PATH_INVALID"))?;
    let path = validate_pointer_str(path_str)?;

    let op_name = map.get("op").and_then(|v| v.as_str()).unwrap_or("");
    match op_name {
        "add" | "replace" | "test" => validate_has_value(map),
        "remove" | "get" => Ok(()),
        "copy" => {
            validate_from(map)?;
            Ok(())
        }
        "move" => {
            let from = validate_from(map)?;
            if is_child(&from, &path) {
                return Err(err("Cannot move into own children."));
            }
            Ok(())
        }
        _ => Err(err("OP_UNKNOWN")),
    }
}

// ── Field helpers ──────────────────────────────────────────────────────────

fn validate_has_value(map: &serde_json::Map<String, Value>) -> Result<(), ValidationError> {
    if !map.contains_key("value") {
        return Err(err("OP_VALUE_MISSING"));
    }
    Ok(())
}

fn validate_from(map: &serde_json::Map<String, Value>) -> Result<Path, ValidationError> {
    let from = map.get("from").ok_or_else(|| err("OP_FROM_INVALID"))?;
    let from_str = from.as_str().ok_or_else(|| err("OP_FROM_INVALID"))?;
    validate_pointer_str(from_str)
}

fn validate_pointer_str(s: &str) -> Result<Path, ValidationError> {
    parse_pointer(s).map_err(|_| err("POINTER_INVALID"))
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ── validate_operations ──────────────────────────────────────────────

    #[test]
    fn ops_throws_not_array() {
        let result = validate_operations(&json!(123));
        assert_eq!(result, Err(ValidationError("Not an array.".into())));
    }

    #[test]
    fn ops_throws_empty_array() {
        let result = validate_operations(&json!([]));
        assert_eq!(
            result,
            Err(ValidationError("Empty operation patch.".into()))
        );
    }

    #[test]
    fn ops_throws_invalid_operation_type() {
        let result = validate_operations(&json!([123]));
        assert_eq!(
            result,
            Err(ValidationError(
                "Error in operation [index = 0] (OP_INVALID).".into()
            ))
        );
    }

    #[test]
    fn ops_throws_no_path() {
        let result = validate_operations(&json!([{}]));
        assert_eq!(
            result,
            Err(ValidationError(
                "Error in operation [index = 0] (OP_PATH_INVALID).".into()
            ))
        );
    }

    #[test]
    fn ops_throws_relative_path() {
        let result = validate_operations(&json!([{"op": "remove", "path": "a/b"}]));
        assert_eq!(
            result,
            Err(ValidationError(
                "Error in operation [index = 0] (POINTER_INVALID).".into()
            ))
        );
    }

    #[test]
    fn ops_throws_no_op_code() {
        let result = validate_operations(&json!([{"path": "/"}]));
        assert_eq!(
            result,
            Err(ValidationError(
                "Error in operation [index = 0] (OP_UNKNOWN).".into()
            ))
        );
    }

    #[test]
    fn ops_throws_invalid_op_code() {
        let result = validate_operations(&json!([{"path": "/", "op": "123"}]));
        assert_eq!(
            result,
            Err(ValidationError(
                "Error in operation [index = 0] (OP_UNKNOWN).".into()
            ))
        );
    }

    #[test]
    fn ops_reports_index_of_later_failure() {
        let result = validate_operations(&json!([
            {"op": "remove", "path": "/ok"},
            {"op": "add", "path": "/also-ok", "value": 1},
            {"op": "add", "path": "/broken"},
        ]));
        assert_eq!(
            result,
            Err(ValidationError(
                "Error in operation [index = 2] (OP_VALUE_MISSING).".into()
            ))
        );
    }

    #[test]
    fn ops_succeeds_full_set() {
        let result = validate_operations(&json!([
            {"op": "add", "path": "/a", "value": null},
            {"op": "remove", "path": "/a"},
            {"op": "replace", "path": "/b", "value": [1]},
            {"op": "copy", "path": "/c", "from": "/b"},
            {"op": "move", "path": "/d", "from": "/c"},
            {"op": "test", "path": "/d", "value": [1]},
            {"op": "get", "path": "/"},
        ]));
        assert_eq!(result, Ok(()));
    }

    // ── validate_operation ───────────────────────────────────────────────

    #[test]
    fn op_add_requires_value() {
        assert_eq!(
            validate_operation(&json!({"op": "add", "path": "/a"})),
            Err(ValidationError("OP_VALUE_MISSING".into()))
        );
        // A null value is still a value
        assert_eq!(
            validate_operation(&json!({"op": "add", "path": "/a", "value": null})),
            Ok(())
        );
    }

    #[test]
    fn op_copy_requires_from() {
        assert_eq!(
            validate_operation(&json!({"op": "copy", "path": "/a"})),
            Err(ValidationError("OP_FROM_INVALID".into()))
        );
        assert_eq!(
            validate_operation(&json!({"op": "copy", "path": "/a", "from": 5})),
            Err(ValidationError("OP_FROM_INVALID".into()))
        );
        assert_eq!(
            validate_operation(&json!({"op": "copy", "path": "/a", "from": "b"})),
            Err(ValidationError("POINTER_INVALID".into()))
        );
    }

    #[test]
    fn op_move_rejects_own_subtree() {
        assert_eq!(
            validate_operation(&json!({"op": "move", "path": "/a/b", "from": "/a"})),
            Err(ValidationError("Cannot move into own children.".into()))
        );
        assert_eq!(
            validate_operation(&json!({"op": "move", "path": "/ab", "from": "/a"})),
            Ok(())
        );
    }

    #[test]
    fn op_move_respects_escapes_in_subtree_check() {
        // "/a~1b" is the key "a/b"; "/a/b/c" is not inside it.
        assert_eq!(
            validate_operation(&json!({"op": "move", "path": "/a/b/c", "from": "/a~1b"})),
            Ok(())
        );
        assert_eq!(
            validate_operation(&json!({"op": "move", "path": "/a~1b/c", "from": "/a~1b"})),
            Err(ValidationError("Cannot move into own children.".into()))
        );
    }
}
