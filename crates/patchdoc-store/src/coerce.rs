//! Parsing documents with per-field type coercion.
//!
//! Documents that arrive as text (form posts, CSV exports, hand-edited
//! files) often carry numbers and booleans as strings. [`parse_document`]
//! decodes the text, checks each declared field against its expected type
//! and, where the value is convertible, rewrites it through a `replace`
//! patch so the stored document ends up with properly typed fields.

use std::fmt;

use serde_json::Value;
use tracing::debug;

use patchdoc::{apply_safe, PatchBuilder, PatchError};
use patchdoc_pointer::{parse_pointer, resolve};

use crate::error::StoreError;

// ── Field declarations ──────────────────────────────────────────────────────

/// Target type a declared field is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    Boolean,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field declaration: the pointer to the field and the type it must have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCoercion {
    pub pointer: String,
    pub expected: FieldType,
}

impl FieldCoercion {
    pub fn new(pointer: impl Into<String>, expected: FieldType) -> Self {
        Self {
            pointer: pointer.into(),
            expected,
        }
    }
}

// ── Conversion ──────────────────────────────────────────────────────────────

/// Whether `value` already has the expected type.
pub fn matches_type(value: &Value, expected: FieldType) -> bool {
    match expected {
        FieldType::String => value.is_string(),
        FieldType::Number => value.is_number(),
        FieldType::Boolean => value.is_boolean(),
    }
}

/// Convert `value` to `expected`, or `None` when no sensible conversion
/// exists.
///
/// Strings render numbers and booleans with their JSON spelling. Numeric
/// strings parse as integers before falling back to floats, so `"42"`
/// stays an integer. Only the exact strings `"true"` and `"false"` convert
/// to booleans; nulls, arrays, and objects never convert to anything.
pub fn coerce_value(value: &Value, expected: FieldType) -> Option<Value> {
    match (expected, value) {
        (FieldType::String, Value::String(s)) => Some(Value::String(s.clone())),
        (FieldType::String, Value::Number(n)) => Some(Value::String(n.to_string())),
        (FieldType::String, Value::Bool(b)) => Some(Value::String(b.to_string())),
        (FieldType::Number, Value::Number(n)) => Some(Value::Number(n.clone())),
        (FieldType::Number, Value::String(s)) => {
            if let Ok(i) = s.parse::<i64>() {
                return Some(Value::from(i));
            }
            let f = s.parse::<f64>().ok()?;
            serde_json::Number::from_f64(f).map(Value::Number)
        }
        (FieldType::Boolean, Value::Bool(b)) => Some(Value::Bool(*b)),
        (FieldType::Boolean, Value::String(s)) => match s.as_str() {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
        _ => None,
    }
}

// ── Parsing ─────────────────────────────────────────────────────────────────

/// Decode `text` as JSON and coerce every declared field to its expected
/// type.
///
/// Each field must be present (`PATH_NOT_FOUND` otherwise). Fields that
/// already have the expected type are left alone; convertible fields are
/// rewritten through `replace` operations applied in one pass; a field
/// that cannot be converted fails the whole parse with
/// [`StoreError::Coerce`].
///
/// # Example
///
/// ```
/// use patchdoc_store::{parse_document, FieldCoercion, FieldType};
/// use serde_json::json;
///
/// let fields = [
///     FieldCoercion::new("/age", FieldType::Number),
///     FieldCoercion::new("/active", FieldType::Boolean),
/// ];
/// let doc = parse_document(r#"{"age": "42", "active": "true"}"#, &fields).unwrap();
/// assert_eq!(doc, json!({"age": 42, "active": true}));
/// ```
pub fn parse_document(text: &str, fields: &[FieldCoercion]) -> Result<Value, StoreError> {
    let doc: Value = serde_json::from_str(text)?;
    let mut builder = PatchBuilder::new();

    for field in fields {
        let path = parse_pointer(&field.pointer).map_err(PatchError::from)?;
        let current = resolve(&doc, &path).map_err(PatchError::from)?;
        if matches_type(current, field.expected) {
            continue;
        }
        let coerced = coerce_value(current, field.expected).ok_or_else(|| StoreError::Coerce {
            pointer: field.pointer.clone(),
            expected: field.expected,
        })?;
        debug!(pointer = %field.pointer, expected = %field.expected, "coercing field");
        builder = builder.replace(&field.pointer, coerced);
    }

    if builder.is_empty() {
        return Ok(doc);
    }
    Ok(apply_safe(&doc, &builder.build())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_conversions() {
        assert_eq!(
            coerce_value(&json!("x"), FieldType::String),
            Some(json!("x"))
        );
        assert_eq!(
            coerce_value(&json!(42), FieldType::String),
            Some(json!("42"))
        );
        assert_eq!(
            coerce_value(&json!(1.5), FieldType::String),
            Some(json!("1.5"))
        );
        assert_eq!(
            coerce_value(&json!(true), FieldType::String),
            Some(json!("true"))
        );
        assert_eq!(coerce_value(&json!(null), FieldType::String), None);
        assert_eq!(coerce_value(&json!([1]), FieldType::String), None);
    }

    #[test]
    fn number_conversions() {
        assert_eq!(coerce_value(&json!(7), FieldType::Number), Some(json!(7)));
        assert_eq!(
            coerce_value(&json!("42"), FieldType::Number),
            Some(json!(42))
        );
        assert_eq!(
            coerce_value(&json!("-3"), FieldType::Number),
            Some(json!(-3))
        );
        assert_eq!(
            coerce_value(&json!("2.5"), FieldType::Number),
            Some(json!(2.5))
        );
        assert_eq!(coerce_value(&json!("seven"), FieldType::Number), None);
        assert_eq!(coerce_value(&json!("NaN"), FieldType::Number), None);
        assert_eq!(coerce_value(&json!(true), FieldType::Number), None);
    }

    #[test]
    fn integer_strings_stay_integers() {
        let coerced = coerce_value(&json!("42"), FieldType::Number).unwrap();
        assert!(coerced.is_i64());
    }

    #[test]
    fn boolean_conversions() {
        assert_eq!(
            coerce_value(&json!(false), FieldType::Boolean),
            Some(json!(false))
        );
        assert_eq!(
            coerce_value(&json!("true"), FieldType::Boolean),
            Some(json!(true))
        );
        assert_eq!(
            coerce_value(&json!("false"), FieldType::Boolean),
            Some(json!(false))
        );
        assert_eq!(coerce_value(&json!("True"), FieldType::Boolean), None);
        assert_eq!(coerce_value(&json!(1), FieldType::Boolean), None);
    }

    #[test]
    fn parse_coerces_declared_fields() {
        let fields = [
            FieldCoercion::new("/age", FieldType::Number),
            FieldCoercion::new("/active", FieldType::Boolean),
            FieldCoercion::new("/name", FieldType::String),
        ];
        let doc = parse_document(
            r#"{"name": "Ada", "age": "36", "active": "false"}"#,
            &fields,
        )
        .unwrap();
        assert_eq!(doc, json!({"name": "Ada", "age": 36, "active": false}));
    }

    #[test]
    fn parse_leaves_undeclared_fields_alone() {
        let fields = [FieldCoercion::new("/a", FieldType::Number)];
        let doc = parse_document(r#"{"a": "1", "b": "2"}"#, &fields).unwrap();
        assert_eq!(doc, json!({"a": 1, "b": "2"}));
    }

    #[test]
    fn parse_with_no_declared_fields_is_plain_decode() {
        let doc = parse_document(r#"{"a": "1"}"#, &[]).unwrap();
        assert_eq!(doc, json!({"a": "1"}));
    }

    #[test]
    fn parse_reaches_nested_fields() {
        let fields = [FieldCoercion::new("/user/age", FieldType::Number)];
        let doc = parse_document(r#"{"user": {"age": "70"}}"#, &fields).unwrap();
        assert_eq!(doc, json!({"user": {"age": 70}}));
    }

    #[test]
    fn parse_fails_on_missing_field() {
        let fields = [FieldCoercion::new("/age", FieldType::Number)];
        let err = parse_document(r#"{"name": "Ada"}"#, &fields).unwrap_err();
        assert_eq!(err.to_string(), "PATH_NOT_FOUND");
    }

    #[test]
    fn parse_fails_on_inconvertible_field() {
        let fields = [FieldCoercion::new("/age", FieldType::Number)];
        let err = parse_document(r#"{"age": "unknown"}"#, &fields).unwrap_err();
        assert_eq!(
            err.to_string(),
            "COERCE: cannot coerce /age to number"
        );
    }

    #[test]
    fn parse_fails_on_relative_pointer() {
        let fields = [FieldCoercion::new("age", FieldType::Number)];
        let err = parse_document(r#"{"age": "1"}"#, &fields).unwrap_err();
        assert_eq!(err.to_string(), "MALFORMED_POINTER");
    }

    #[test]
    fn parse_fails_on_invalid_json() {
        let fields = [FieldCoercion::new("/a", FieldType::Number)];
        assert!(parse_document("{not json", &fields).is_err());
    }
}
