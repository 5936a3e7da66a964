//! Structural helpers over `serde_json::Value`.
//!
//! Both functions recurse over the closed set of JSON shapes. A
//! `serde_json::Value` is an owned tree, so there are no cycles to guard
//! against and the recursion always terminates.

use serde_json::{Map, Value};

/// Creates a deep clone of any JSON value.
///
/// New instances are created for all nested objects and arrays. The safe
/// apply entry point runs this over the whole input document before the
/// first operation touches it.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use patchdoc::value::deep_clone;
///
/// let original = json!({"foo": [1, 2, 3]});
/// let cloned = deep_clone(&original);
///
/// assert_eq!(original, cloned);
/// ```
pub fn deep_clone(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Bool(b) => Value::Bool(*b),
        Value::Number(n) => Value::Number(n.clone()),
        Value::String(s) => Value::String(s.clone()),
        Value::Array(arr) => Value::Array(arr.iter().map(deep_clone).collect()),
        Value::Object(obj) => {
            let mut new_obj = Map::new();
            for (key, val) in obj {
                new_obj.insert(key.clone(), deep_clone(val));
            }
            Value::Object(new_obj)
        }
    }
}

/// Performs a deep equality check between two JSON values.
///
/// Primitives compare directly, arrays element by element, objects key by
/// key. Object member order does not matter. The `test` operation uses this
/// for its assertion.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use patchdoc::value::deep_equal;
///
/// let a = json!({"foo": [1, 2, 3]});
/// let b = json!({"foo": [1, 2, 3]});
/// let c = json!({"foo": [1, 2, 4]});
///
/// assert!(deep_equal(&a, &b));
/// assert!(!deep_equal(&a, &c));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,

        // Arrays
        (Value::Array(arr_a), Value::Array(arr_b)) => {
            if arr_a.len() != arr_b.len() {
                return false;
            }
            for i in 0..arr_a.len() {
                if !deep_equal(&arr_a[i], &arr_b[i]) {
                    return false;
                }
            }
            true
        }

        // Objects
        (Value::Object(obj_a), Value::Object(obj_b)) => {
            if obj_a.len() != obj_b.len() {
                return false;
            }
            for (key, val_a) in obj_a {
                match obj_b.get(key) {
                    Some(val_b) => {
                        if !deep_equal(val_a, val_b) {
                            return false;
                        }
                    }
                    None => return false,
                }
            }
            true
        }

        // Different types are never equal
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deep_clone_primitives() {
        for value in [json!(null), json!(true), json!(42), json!("hi")] {
            assert_eq!(deep_clone(&value), value);
        }
    }

    #[test]
    fn test_deep_clone_nested() {
        let value = json!({"a": [1, {"b": "c"}], "d": {"e": null}});
        let cloned = deep_clone(&value);
        assert_eq!(cloned, value);
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let original = json!({"list": [1, 2]});
        let mut cloned = deep_clone(&original);
        cloned["list"][0] = json!(99);
        assert_eq!(original, json!({"list": [1, 2]}));
    }

    #[test]
    fn test_deep_equal_primitives() {
        assert!(deep_equal(&json!(null), &json!(null)));
        assert!(deep_equal(&json!(3), &json!(3)));
        assert!(!deep_equal(&json!(3), &json!(3.5)));
        assert!(!deep_equal(&json!(1), &json!("1")));
        assert!(!deep_equal(&json!(null), &json!(false)));
    }

    #[test]
    fn test_deep_equal_object_order_irrelevant() {
        let a = json!({"x": 1, "y": 2});
        let b = json!({"y": 2, "x": 1});
        assert!(deep_equal(&a, &b));
    }

    #[test]
    fn test_deep_equal_length_mismatch() {
        assert!(!deep_equal(&json!([1, 2]), &json!([1, 2, 3])));
        assert!(!deep_equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
    }
}
