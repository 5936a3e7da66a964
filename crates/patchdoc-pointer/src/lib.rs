//! JSON Pointer utilities.
//!
//! This crate implements the pointer dialect used throughout patchdoc. It is
//! [RFC 6901](https://tools.ietf.org/html/rfc6901) with one deviation: the
//! root of a document is addressed by `/`, not by the empty string. A pointer
//! that does not begin with `/` is malformed. One corner follows from the
//! deviation: a key literally named `""` at the top level of a document has
//! no pointer of its own, because `/` already names the root.
//!
//! # Example
//!
//! ```
//! use patchdoc_pointer::{parse_pointer, format_pointer, resolve};
//!
//! // Parse a pointer string into path steps
//! let path = parse_pointer("/foo/bar").unwrap();
//! assert_eq!(path, vec!["foo".to_string(), "bar".to_string()]);
//!
//! // Format path steps back to a pointer string
//! let pointer = format_pointer(&path);
//! assert_eq!(pointer, "/foo/bar");
//!
//! // Resolve a value in a JSON document
//! let doc = serde_json::json!({"foo": {"bar": 42}});
//! let val = resolve(&doc, &path).unwrap();
//! assert_eq!(val, &serde_json::json!(42));
//! ```

use serde_json::Value;
use thiserror::Error;

/// A single step of a parsed pointer.
pub type PathStep = String;

/// A parsed pointer: the sequence of steps from the document root.
/// The empty path is the root itself.
pub type Path = Vec<PathStep>;

// ── Escaping ──────────────────────────────────────────────────────────────

/// Unescapes a pointer path step.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
///
/// # Example
///
/// ```
/// use patchdoc_pointer::unescape_step;
///
/// assert_eq!(unescape_step("a~0b"), "a~b");
/// assert_eq!(unescape_step("c~1d"), "c/d");
/// assert_eq!(unescape_step("no-escapes"), "no-escapes");
/// ```
pub fn unescape_step(step: &str) -> String {
    if !step.contains('~') {
        return step.to_string();
    }
    // Order matters: ~1 must be replaced before ~0
    step.replace("~1", "/").replace("~0", "~")
}

/// Escapes a pointer path step.
///
/// Per RFC 6901, `/` is replaced with `~1` and `~` is replaced with `~0`.
///
/// # Example
///
/// ```
/// use patchdoc_pointer::escape_step;
///
/// assert_eq!(escape_step("a~b"), "a~0b");
/// assert_eq!(escape_step("c/d"), "c~1d");
/// assert_eq!(escape_step("no-escapes"), "no-escapes");
/// ```
pub fn escape_step(step: &str) -> String {
    if !step.contains('/') && !step.contains('~') {
        return step.to_string();
    }
    // Order matters: ~ must be escaped before /
    step.replace('~', "~0").replace('/', "~1")
}

// ── Parsing and formatting ────────────────────────────────────────────────

/// Parse a pointer string into path steps.
///
/// - The pointer must begin with `/`; anything else (including the empty
///   string) is [`PointerError::Malformed`].
/// - `/` alone is the root and parses to the empty path.
/// - Every other pointer splits on `/` after the leading slash; each step is
///   unescaped. A trailing `/` yields a trailing `""` step, which addresses
///   a key literally named `""`.
///
/// # Example
///
/// ```
/// use patchdoc_pointer::parse_pointer;
///
/// assert_eq!(parse_pointer("/").unwrap(), Vec::<String>::new());
/// assert_eq!(parse_pointer("/foo/bar").unwrap(), vec!["foo", "bar"]);
/// assert_eq!(parse_pointer("/a~0b/c~1d").unwrap(), vec!["a~b", "c/d"]);
/// assert!(parse_pointer("foo/bar").is_err());
/// assert!(parse_pointer("").is_err());
/// ```
pub fn parse_pointer(pointer: &str) -> Result<Path, PointerError> {
    if !pointer.starts_with('/') {
        return Err(PointerError::Malformed);
    }
    if pointer == "/" {
        return Ok(Vec::new());
    }
    Ok(pointer[1..].split('/').map(unescape_step).collect())
}

/// Parse a pointer string that may not have a leading `/`.
///
/// A missing leading slash is prepended before parsing, so this never fails.
/// The operation builder runs every caller-supplied path through this to hand
/// the engine already-normalized pointers.
///
/// # Example
///
/// ```
/// use patchdoc_pointer::parse_pointer_relaxed;
///
/// assert_eq!(parse_pointer_relaxed("foo/bar"), vec!["foo", "bar"]);
/// assert_eq!(parse_pointer_relaxed("/foo/bar"), vec!["foo", "bar"]);
/// assert_eq!(parse_pointer_relaxed(""), Vec::<String>::new());
/// ```
pub fn parse_pointer_relaxed(pointer: &str) -> Path {
    if let Ok(path) = parse_pointer(pointer) {
        return path;
    }
    let mut absolute = String::with_capacity(pointer.len() + 1);
    absolute.push('/');
    absolute.push_str(pointer);
    // Cannot fail once the leading slash is present.
    parse_pointer(&absolute).unwrap_or_default()
}

/// Format path steps into a pointer string.
///
/// Each step is escaped and joined with `/`; the empty path collapses to the
/// root pointer `/`. This is the inverse of [`parse_pointer`] for every path
/// except `[""]`, whose output `/` re-parses as the root.
///
/// # Example
///
/// ```
/// use patchdoc_pointer::format_pointer;
///
/// assert_eq!(format_pointer(&[]), "/");
/// assert_eq!(format_pointer(&["foo".to_string()]), "/foo");
/// assert_eq!(
///     format_pointer(&["a~b".to_string(), "c/d".to_string()]),
///     "/a~0b/c~1d"
/// );
/// ```
pub fn format_pointer(path: &[String]) -> String {
    if path.is_empty() {
        return "/".to_string();
    }
    let mut out = String::new();
    for step in path {
        out.push('/');
        out.push_str(&escape_step(step));
    }
    out
}

// ── Path relationships ────────────────────────────────────────────────────

/// Check if a path points to the root value.
///
/// # Example
///
/// ```
/// use patchdoc_pointer::is_root;
///
/// assert!(is_root(&[]));
/// assert!(!is_root(&["foo".to_string()]));
/// ```
pub fn is_root(path: &[String]) -> bool {
    path.is_empty()
}

/// Check if `parent` path contains the `child` path.
///
/// A path is never its own child.
///
/// # Example
///
/// ```
/// use patchdoc_pointer::is_child;
///
/// let parent = vec!["foo".to_string()];
/// let child = vec!["foo".to_string(), "bar".to_string()];
/// assert!(is_child(&parent, &child));
/// assert!(!is_child(&child, &parent));
/// ```
pub fn is_child(parent: &[String], child: &[String]) -> bool {
    if parent.len() >= child.len() {
        return false;
    }
    for i in 0..parent.len() {
        if parent[i] != child[i] {
            return false;
        }
    }
    true
}

/// Get the parent path of a given path, or `None` for the root.
///
/// # Example
///
/// ```
/// use patchdoc_pointer::parent;
///
/// assert_eq!(parent(&["foo".to_string(), "bar".to_string()]).unwrap(), vec!["foo"]);
/// assert!(parent(&[]).is_none());
/// ```
pub fn parent(path: &[String]) -> Option<Path> {
    if path.is_empty() {
        return None;
    }
    Some(path[..path.len() - 1].to_vec())
}

/// Check if a string represents a valid non-negative integer array index.
///
/// # Example
///
/// ```
/// use patchdoc_pointer::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("1.5"));
/// assert!(!is_valid_index("abc"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    // First char can't be a leading zero unless the index is just "0"
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

// ── Document descent ──────────────────────────────────────────────────────

/// Resolve a path against a JSON document.
///
/// Descends step by step from the root; the empty path resolves to the
/// document itself.
///
/// # Errors
///
/// - [`PointerError::NotFound`]: a missing object key, an out-of-range
///   index, the end-of-array step `-` (it never names an existing element),
///   or a step applied to a scalar.
/// - [`PointerError::Malformed`]: a step applied to an array that is not a
///   valid index.
///
/// # Example
///
/// ```
/// use patchdoc_pointer::{parse_pointer, resolve};
/// use serde_json::json;
///
/// let doc = json!({"users": [{"name": "ada"}]});
/// let path = parse_pointer("/users/0/name").unwrap();
/// assert_eq!(resolve(&doc, &path).unwrap(), &json!("ada"));
/// ```
pub fn resolve<'a>(doc: &'a Value, path: &[String]) -> Result<&'a Value, PointerError> {
    let mut current = doc;
    for step in path {
        current = match current {
            Value::Object(map) => map.get(step).ok_or(PointerError::NotFound)?,
            Value::Array(arr) => {
                if step == "-" {
                    return Err(PointerError::NotFound);
                }
                if !is_valid_index(step) {
                    return Err(PointerError::Malformed);
                }
                let idx: usize = step.parse().map_err(|_| PointerError::Malformed)?;
                arr.get(idx).ok_or(PointerError::NotFound)?
            }
            _ => return Err(PointerError::NotFound),
        };
    }
    Ok(current)
}

/// Resolve a path against a mutable JSON document.
///
/// Same descent and error mapping as [`resolve`], over `&mut Value`. The
/// patch engine uses this to reach the parent container of an operation
/// target.
pub fn resolve_mut<'a>(doc: &'a mut Value, path: &[String]) -> Result<&'a mut Value, PointerError> {
    let mut current = doc;
    for step in path {
        current = match current {
            Value::Object(map) => map.get_mut(step).ok_or(PointerError::NotFound)?,
            Value::Array(arr) => {
                if step == "-" {
                    return Err(PointerError::NotFound);
                }
                if !is_valid_index(step) {
                    return Err(PointerError::Malformed);
                }
                let idx: usize = step.parse().map_err(|_| PointerError::Malformed)?;
                arr.get_mut(idx).ok_or(PointerError::NotFound)?
            }
            _ => return Err(PointerError::NotFound),
        };
    }
    Ok(current)
}

/// Get a value from a JSON document by path.
///
/// Same index grammar as [`resolve`], but any failure collapses to `None`.
///
/// # Example
///
/// ```
/// use patchdoc_pointer::get;
/// use serde_json::json;
///
/// let doc = json!({"foo": {"bar": 42}});
/// let val = get(&doc, &["foo".to_string(), "bar".to_string()]);
/// assert_eq!(val, Some(&json!(42)));
///
/// let missing = get(&doc, &["missing".to_string()]);
/// assert_eq!(missing, None);
/// ```
pub fn get<'a>(doc: &'a Value, path: &[String]) -> Option<&'a Value> {
    let mut current = doc;
    for step in path {
        current = match current {
            Value::Object(map) => map.get(step)?,
            Value::Array(arr) => {
                // "-" fails the index check, so it never resolves here.
                if !is_valid_index(step) {
                    return None;
                }
                arr.get(step.parse::<usize>().ok()?)?
            }
            _ => return None,
        };
    }
    Some(current)
}

/// Get a mutable reference to a value in a JSON document by path.
///
/// Returns `None` if the path does not lead to a value.
pub fn get_mut<'a>(doc: &'a mut Value, path: &[String]) -> Option<&'a mut Value> {
    let mut current = doc;
    for step in path {
        current = match current {
            Value::Object(map) => map.get_mut(step)?,
            Value::Array(arr) => {
                if !is_valid_index(step) {
                    return None;
                }
                arr.get_mut(step.parse::<usize>().ok()?)?
            }
            _ => return None,
        };
    }
    Some(current)
}

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointerError {
    /// The pointer string or a path step violates the pointer grammar.
    #[error("MALFORMED_POINTER")]
    Malformed,
    /// The pointer is well-formed but does not lead to a value.
    #[error("PATH_NOT_FOUND")]
    NotFound,
}
