//! JSON Patch application for JSON documents.
//!
//! Implements the six RFC 6902 operations plus two local extensions: an
//! `add` whose string value lands on an existing string concatenates instead
//! of overwriting, and a read-only `get` marker that patch producers may
//! carry but the applicator rejects.
//!
//! Two entry points cover both failure postures: [`apply`] consumes its
//! document and drops the partial result on error; [`apply_safe`] borrows
//! the document and guarantees the caller's value is untouched no matter
//! how the patch ends.
//!
//! The pointer dialect lives in the `patchdoc-pointer` crate; document
//! stores and the coercing document parser live in `patchdoc-store`.

pub mod apply;
pub mod builder;
pub mod cli;
pub mod codec;
pub mod types;
pub mod validate;
pub mod value;

pub use apply::{apply, apply_op, apply_safe};
pub use builder::PatchBuilder;
pub use codec::json::{op_from_json, op_to_json, patch_from_json, patch_to_json};
pub use types::{Op, PatchError, Path};
pub use validate::{validate_operation, validate_operations, ValidationError};
