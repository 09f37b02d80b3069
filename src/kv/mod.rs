//! Key-value slot storage
//!
//! The workout store writes its whole collection to a single named key, so
//! the backend only needs whole-value get/set/delete semantics:
//! - `MemoryKvStore`: in-process map, lost on restart (tests, embedding)
//! - `FileKvStore`: one file per key in a directory, survives restarts
//!
//! # Example
//!
//! ```rust
//! use trailmark::kv::{KvStore, MemoryKvStore};
//!
//! # fn example() -> trailmark::Result<()> {
//! let store = MemoryKvStore::new();
//!
//! store.set("workouts", b"[]".to_vec())?;
//! assert_eq!(store.get("workouts")?, Some(b"[]".to_vec()));
//!
//! store.delete("workouts")?;
//! assert!(!store.exists("workouts")?);
//! # Ok(())
//! # }
//! ```

mod file;
mod memory;

pub use file::FileKvStore;
pub use memory::MemoryKvStore;

use crate::Result;

/// Synchronous key-value store holding opaque byte values.
///
/// Implementations report backend failures as
/// [`Error::StorageUnavailable`](crate::Error::StorageUnavailable).
pub trait KvStore: Send + Sync {
    /// Get a value by key.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Set a value for a key.
    ///
    /// Overwrites any existing value.
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot be written.
    fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Delete a key.
    ///
    /// No-op if the key doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot be written.
    fn delete(&self, key: &str) -> Result<()>;

    /// Check if a key exists.
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot be read.
    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: KvStore + ?Sized> KvStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool> {
        (**self).exists(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_kv_set_get() {
        let store = MemoryKvStore::new();

        store.set("key1", b"value1".to_vec()).unwrap();
        let value = store.get("key1").unwrap();

        assert_eq!(value, Some(b"value1".to_vec()));
    }

    #[test]
    fn test_memory_kv_get_nonexistent() {
        let store = MemoryKvStore::new();

        assert_eq!(store.get("nonexistent").unwrap(), None);
    }

    #[test]
    fn test_memory_kv_overwrite() {
        let store = MemoryKvStore::new();

        store.set("key", b"value1".to_vec()).unwrap();
        store.set("key", b"value2".to_vec()).unwrap();

        assert_eq!(store.get("key").unwrap(), Some(b"value2".to_vec()));
    }

    #[test]
    fn test_memory_kv_delete_nonexistent() {
        let store = MemoryKvStore::new();

        // Should not error
        store.delete("nonexistent").unwrap();
    }

    #[test]
    fn test_memory_kv_exists() {
        let store = MemoryKvStore::new();

        assert!(!store.exists("key").unwrap());

        store.set("key", b"value".to_vec()).unwrap();
        assert!(store.exists("key").unwrap());

        store.delete("key").unwrap();
        assert!(!store.exists("key").unwrap());
    }

    #[test]
    fn test_boxed_store_delegates() {
        let store: Box<dyn KvStore> = Box::new(MemoryKvStore::new());

        store.set("slot", b"[]".to_vec()).unwrap();
        assert!(store.exists("slot").unwrap());
        assert_eq!(store.get("slot").unwrap(), Some(b"[]".to_vec()));
    }

    #[test]
    fn test_memory_kv_concurrent_access() {
        use std::sync::Arc;

        let store = Arc::new(MemoryKvStore::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store
                        .set(&format!("key{i}"), format!("value{i}").into_bytes())
                        .unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        for i in 0..16 {
            let expected = format!("value{i}").into_bytes();
            assert_eq!(store.get(&format!("key{i}")).unwrap(), Some(expected));
        }
    }
}
