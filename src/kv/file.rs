//! Directory-backed KV store: one file per key.
//!
//! Writes go to a temp file in the same directory and are renamed over the
//! target, so a crash mid-write leaves the previous value intact.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::KvStore;
use crate::{Error, Result};

const EXTENSION: &str = "json";

/// Persistent key-value store keeping each key in `<dir>/<key>.json`.
///
/// Keys are restricted to ASCII alphanumerics, `-`, `_` and `.` so a key
/// can never escape the directory.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    /// Open (and create if missing) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| unavailable(&dir, &e))?;
        Ok(Self { dir })
    }

    /// Directory holding the slot files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(Error::StorageUnavailable(format!(
                "invalid slot key {key:?}"
            )));
        }
        Ok(self.dir.join(format!("{key}.{EXTENSION}")))
    }
}

fn unavailable(path: &Path, err: &std::io::Error) -> Error {
    Error::StorageUnavailable(format!("{}: {err}", path.display()))
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(unavailable(&path, &e)),
        }
    }

    fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let path = self.path_for(key)?;
        let mut tmp =
            tempfile::NamedTempFile::new_in(&self.dir).map_err(|e| unavailable(&self.dir, &e))?;
        tmp.write_all(&value)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| unavailable(tmp.path(), &e))?;
        tmp.persist(&path)
            .map_err(|e| unavailable(&path, &e.error))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(unavailable(&path, &e)),
        }
    }

    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.path_for(key)?.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_kv_roundtrip_across_instances() {
        let dir = tempfile::tempdir().unwrap();

        let store = FileKvStore::open(dir.path()).unwrap();
        store.set("workouts", b"[1,2,3]".to_vec()).unwrap();

        // A fresh handle on the same directory sees the value (restart)
        let reopened = FileKvStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get("workouts").unwrap(), Some(b"[1,2,3]".to_vec()));
        assert!(dir.path().join("workouts.json").is_file());
    }

    #[test]
    fn test_file_kv_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKvStore::open(dir.path()).unwrap();

        assert_eq!(store.get("workouts").unwrap(), None);
        assert!(!store.exists("workouts").unwrap());
        store.delete("workouts").unwrap();
    }

    #[test]
    fn test_file_kv_overwrite_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKvStore::open(dir.path()).unwrap();

        store.set("slot", b"old".to_vec()).unwrap();
        store.set("slot", b"new".to_vec()).unwrap();
        assert_eq!(store.get("slot").unwrap(), Some(b"new".to_vec()));

        store.delete("slot").unwrap();
        assert!(!store.exists("slot").unwrap());
    }

    #[test]
    fn test_file_kv_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKvStore::open(dir.path()).unwrap();

        for key in ["", "../escape", "a/b", ".hidden"] {
            let err = store.set(key, vec![]).unwrap_err();
            assert!(matches!(err, Error::StorageUnavailable(_)), "key {key:?}");
        }
    }

    #[test]
    fn test_file_kv_creates_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        let store = FileKvStore::open(&nested).unwrap();
        store.set("workouts", b"[]".to_vec()).unwrap();

        assert_eq!(store.dir(), nested.as_path());
        assert!(nested.join("workouts.json").is_file());
    }
}
