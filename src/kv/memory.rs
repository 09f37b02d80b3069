//! Slot storage held in process memory.
//!
//! Nothing survives a restart; `FileKvStore` is the durable backend. Tests,
//! benches and the demo's default mode run the whole workout log on top of
//! this store.

use super::KvStore;
use crate::Result;
use dashmap::DashMap;

/// Workout slots kept in a concurrent map, one serialized collection per key.
///
/// # Example
///
/// ```rust
/// use trailmark::kv::MemoryKvStore;
/// use trailmark::store::WorkoutStore;
/// use trailmark::workout::{Activity, Coordinates, Workout};
///
/// # fn example() -> trailmark::Result<()> {
/// let mut log = WorkoutStore::with_slot(MemoryKvStore::new(), "alice");
/// log.add(Workout::new(
///     "0781234567",
///     Coordinates::new(55.75, 37.61),
///     5.2,
///     24.0,
///     Activity::Running { cadence: 178 },
/// ));
/// log.persist()?;
///
/// assert_eq!(log.kv().slot_keys(), vec!["alice".to_string()]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    slots: DashMap<String, Vec<u8>>,
}

impl MemoryKvStore {
    /// Empty store with no slots.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True until the first slot is written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Keys of every slot, sorted.
    #[must_use]
    pub fn slot_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.slots.iter().map(|e| e.key().clone()).collect();
        keys.sort_unstable();
        keys
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.slots.get(key).map(|blob| blob.value().clone()))
    }

    fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.slots.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.slots.remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.slots.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_keys_track_writes_and_deletes() {
        let kv = MemoryKvStore::new();
        assert!(kv.is_empty());

        kv.set("workouts", b"[]".to_vec()).unwrap();
        kv.set("alice", b"[]".to_vec()).unwrap();
        assert_eq!(kv.len(), 2);
        assert_eq!(kv.slot_keys(), vec!["alice", "workouts"]);

        kv.delete("alice").unwrap();
        assert_eq!(kv.slot_keys(), vec!["workouts"]);
    }
}
