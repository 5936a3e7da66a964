//! File-backed document store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::StoreError;
use crate::store::DocumentStore;

/// One pretty-printed `<key>.json` file per document under a root directory.
///
/// Writes go straight to the final path with no locking, no fsync, and no
/// temp-file rename, and reads race freely with writers. This store is for
/// local tooling and tests; do not put production data behind it.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        debug!(root = %root.display(), "opened file store");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn doc_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

/// Keys become file names, so anything that could escape the root directory
/// or collide with directory entries is rejected.
fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() || key == "." || key == ".." || key.contains('/') || key.contains('\\') {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

impl DocumentStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let path = self.doc_path(key)?;
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn put(&mut self, key: &str, doc: Value) -> Result<(), StoreError> {
        let path = self.doc_path(key)?;
        let text = serde_json::to_string_pretty(&doc)?;
        fs::write(&path, text)?;
        debug!(key = %key, path = %path.display(), "stored document");
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<bool, StoreError> {
        let path = self.doc_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(key = %key, "deleted document");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Keys are reported in sorted order.
    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_traversal_keys() {
        for key in ["", ".", "..", "a/b", "a\\b", "../escape"] {
            assert!(
                matches!(validate_key(key), Err(StoreError::InvalidKey(_))),
                "key {key:?} should be invalid"
            );
        }
        assert!(validate_key("users").is_ok());
        assert!(validate_key("users.v2").is_ok());
    }
}
