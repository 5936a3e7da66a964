//! Fluent construction of patch operation lists.

use serde_json::Value;

use patchdoc_pointer::parse_pointer_relaxed;

use crate::types::Op;

/// Builds a list of [`Op`]s through chained calls.
///
/// Every path argument is normalized with [`parse_pointer_relaxed`], so
/// callers may write `"a/b"` and `"/a/b"` interchangeably; the built
/// operations always carry normalized paths.
///
/// # Example
///
/// ```
/// use patchdoc::{apply, PatchBuilder};
/// use serde_json::json;
///
/// let ops = PatchBuilder::new()
///     .test("version", json!(3))
///     .replace("version", json!(4))
///     .add("tags/-", json!("release"))
///     .build();
///
/// let doc = json!({"version": 3, "tags": []});
/// let out = apply(doc, &ops).unwrap();
/// assert_eq!(out, json!({"version": 4, "tags": ["release"]}));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PatchBuilder {
    ops: Vec<Op>,
}

impl PatchBuilder {
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Queue an `add` of `value` at `path`.
    pub fn add(mut self, path: &str, value: Value) -> Self {
        self.ops.push(Op::Add {
            path: parse_pointer_relaxed(path),
            value,
        });
        self
    }

    /// Queue a `remove` of the value at `path`.
    pub fn remove(mut self, path: &str) -> Self {
        self.ops.push(Op::Remove {
            path: parse_pointer_relaxed(path),
        });
        self
    }

    /// Queue a `replace` of the value at `path` with `value`.
    pub fn replace(mut self, path: &str, value: Value) -> Self {
        self.ops.push(Op::Replace {
            path: parse_pointer_relaxed(path),
            value,
        });
        self
    }

    /// Queue a `copy` of the value at `from` to `path`.
    pub fn copy(mut self, from: &str, path: &str) -> Self {
        self.ops.push(Op::Copy {
            path: parse_pointer_relaxed(path),
            from: parse_pointer_relaxed(from),
        });
        self
    }

    /// Queue a `move` of the value at `from` to `path`.
    pub fn move_from(mut self, from: &str, path: &str) -> Self {
        self.ops.push(Op::Move {
            path: parse_pointer_relaxed(path),
            from: parse_pointer_relaxed(from),
        });
        self
    }

    /// Queue a `test` asserting that `path` holds exactly `value`.
    pub fn test(mut self, path: &str, value: Value) -> Self {
        self.ops.push(Op::Test {
            path: parse_pointer_relaxed(path),
            value,
        });
        self
    }

    /// Queue a read-only `get` marker for `path`.
    pub fn get(mut self, path: &str) -> Self {
        self.ops.push(Op::Get {
            path: parse_pointer_relaxed(path),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Finish building and hand back the operation list.
    pub fn build(self) -> Vec<Op> {
        self.ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_ops_in_call_order() {
        let ops = PatchBuilder::new()
            .add("a", json!(1))
            .remove("b")
            .replace("c", json!(2))
            .build();

        assert_eq!(ops.len(), 3);
        assert_eq!(ops[0].op_name(), "add");
        assert_eq!(ops[1].op_name(), "remove");
        assert_eq!(ops[2].op_name(), "replace");
    }

    #[test]
    fn normalizes_relative_paths() {
        let ops = PatchBuilder::new()
            .add("a/b", json!(1))
            .add("/a/b", json!(2))
            .build();

        assert_eq!(ops[0].path(), &vec!["a".to_string(), "b".to_string()]);
        assert_eq!(ops[0].path(), ops[1].path());
    }

    #[test]
    fn copy_and_move_carry_both_paths() {
        let ops = PatchBuilder::new()
            .copy("src", "dst")
            .move_from("old", "new")
            .build();

        assert_eq!(
            ops[0],
            Op::Copy {
                path: vec!["dst".to_string()],
                from: vec!["src".to_string()],
            }
        );
        assert_eq!(
            ops[1],
            Op::Move {
                path: vec!["new".to_string()],
                from: vec!["old".to_string()],
            }
        );
    }

    #[test]
    fn get_marker_is_buildable_but_not_applicable() {
        let ops = PatchBuilder::new().get("a").build();
        assert_eq!(ops[0], Op::Get { path: vec!["a".to_string()] });

        let mut doc = json!({"a": 1});
        assert!(crate::apply::apply_op(&mut doc, &ops[0]).is_err());
    }

    #[test]
    fn empty_builder() {
        let builder = PatchBuilder::new();
        assert!(builder.is_empty());
        assert_eq!(builder.len(), 0);
        assert!(builder.build().is_empty());
    }
}
