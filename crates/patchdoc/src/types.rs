//! Core types for the patch engine.

use serde_json::Value;
use thiserror::Error;

pub use patchdoc_pointer::Path;

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// A pointer did not resolve to a location the operation requires.
    #[error("PATH_NOT_FOUND")]
    PathNotFound,
    /// A `test` operation found a value other than the expected one.
    #[error("ASSERTION_FAILED")]
    AssertionFailed,
    /// A pointer string or path step violates the pointer grammar.
    #[error("MALFORMED_POINTER")]
    MalformedPointer,
    /// The operation itself is unusable (unknown name, missing field,
    /// or a read-only marker handed to the applicator).
    #[error("INVALID_OP: {0}")]
    InvalidOp(String),
}

impl From<patchdoc_pointer::PointerError> for PatchError {
    fn from(err: patchdoc_pointer::PointerError) -> Self {
        match err {
            patchdoc_pointer::PointerError::NotFound => PatchError::PathNotFound,
            patchdoc_pointer::PointerError::Malformed => PatchError::MalformedPointer,
        }
    }
}

// ── Op enum ───────────────────────────────────────────────────────────────

/// A patch operation.
///
/// The six RFC 6902 operations, plus `Get`: a read-only marker that may
/// travel inside a patch document but is rejected by the applicator. Patch
/// producers use it to record "read this path" intents next to the edits
/// they ship.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Add { path: Path, value: Value },
    Remove { path: Path },
    Replace { path: Path, value: Value },
    Copy { path: Path, from: Path },
    Move { path: Path, from: Path },
    Test { path: Path, value: Value },
    Get { path: Path },
}

impl Op {
    /// Returns the operation name as it appears in the wire format.
    pub fn op_name(&self) -> &'static str {
        match self {
            Op::Add { .. } => "add",
            Op::Remove { .. } => "remove",
            Op::Replace { .. } => "replace",
            Op::Copy { .. } => "copy",
            Op::Move { .. } => "move",
            Op::Test { .. } => "test",
            Op::Get { .. } => "get",
        }
    }

    /// Returns the target path of the operation.
    pub fn path(&self) -> &Path {
        match self {
            Op::Add { path, .. } => path,
            Op::Remove { path } => path,
            Op::Replace { path, .. } => path,
            Op::Copy { path, .. } => path,
            Op::Move { path, .. } => path,
            Op::Test { path, .. } => path,
            Op::Get { path } => path,
        }
    }

    /// Returns true if applying this operation can change the document.
    /// `test` asserts and `get` only marks a read.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Op::Test { .. } | Op::Get { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn op_names() {
        let path = vec!["a".to_string()];
        assert_eq!(Op::Add { path: path.clone(), value: json!(1) }.op_name(), "add");
        assert_eq!(Op::Remove { path: path.clone() }.op_name(), "remove");
        assert_eq!(Op::Get { path }.op_name(), "get");
    }

    #[test]
    fn mutating_split() {
        let path = vec!["a".to_string()];
        assert!(Op::Add { path: path.clone(), value: json!(1) }.is_mutating());
        assert!(Op::Remove { path: path.clone() }.is_mutating());
        assert!(!Op::Test { path: path.clone(), value: json!(1) }.is_mutating());
        assert!(!Op::Get { path }.is_mutating());
    }

    #[test]
    fn pointer_error_mapping() {
        use patchdoc_pointer::PointerError;
        assert_eq!(PatchError::from(PointerError::NotFound), PatchError::PathNotFound);
        assert_eq!(PatchError::from(PointerError::Malformed), PatchError::MalformedPointer);
    }

    #[test]
    fn error_display_codes() {
        assert_eq!(PatchError::PathNotFound.to_string(), "PATH_NOT_FOUND");
        assert_eq!(PatchError::AssertionFailed.to_string(), "ASSERTION_FAILED");
        assert_eq!(PatchError::MalformedPointer.to_string(), "MALFORMED_POINTER");
        assert_eq!(
            PatchError::InvalidOp("nope".into()).to_string(),
            "INVALID_OP: nope"
        );
    }
}
