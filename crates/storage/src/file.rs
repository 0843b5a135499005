use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::StorageError;
use crate::traits::KeyValueStore;

/// A durable store that keeps one `<key>.json` document per key inside a
/// data directory.
///
/// Writes go to `<key>.json.tmp` and are renamed over the target, so a
/// reader never observes a half-written document. There is no locking
/// across processes: two writers on the same directory are last-write-wins.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StorageError::Io {
            path: root.clone(),
            source,
        })?;
        tracing::debug!(root = %root.display(), "opened file store");
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the document holding `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    let invalid = |reason: &str| StorageError::InvalidKey {
        key: key.to_string(),
        reason: reason.to_string(),
    };
    if key.is_empty() {
        return Err(invalid("key is empty"));
    }
    if key.starts_with('.') {
        return Err(invalid("key may not start with '.'"));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(invalid("only ASCII letters, digits, '-', '_' and '.' are allowed"));
    }
    Ok(())
}

impl KeyValueStore for FileStore {
    fn get_raw(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        let path = self.path_for(key)?;
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| StorageError::serialization(key, e))
    }

    fn set_raw(&self, key: &str, value: serde_json::Value) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let encoded =
            serde_json::to_string_pretty(&value).map_err(|e| StorageError::serialization(key, e))?;

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::Backend("file store lock poisoned".to_string()))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, encoded).map_err(|source| StorageError::Io {
            path: tmp.clone(),
            source,
        })?;
        if let Err(source) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(StorageError::Io { path, source });
        }
        tracing::debug!(key, path = %path.display(), "file store write");
        Ok(())
    }
}
