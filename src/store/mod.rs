//! Workout Store - ordered in-memory collection with a key-value slot behind it
//!
//! The whole collection is written to one named slot as a single blob.
//! Reload replaces the in-memory collection with whatever can be rebuilt
//! from that slot and never fails: a missing, unreadable or corrupt slot
//! yields an empty store, and individual bad entries are skipped.

mod codec;

pub use codec::SkippedEntry;

use tracing::{debug, info, warn};

use crate::kv::KvStore;
use crate::workout::{CalendarZone, Locale, Workout};
use crate::Result;

/// Default slot key.
pub const DEFAULT_SLOT: &str = "workouts";

/// What the slot looked like on reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotStatus {
    /// Slot present and parsed (individual entries may still be skipped)
    Loaded,
    /// Slot missing: first run
    Absent,
    /// Slot present but not a JSON array
    Corrupt(String),
    /// Backend could not be read
    Unavailable(String),
}

/// Outcome of [`WorkoutStore::reload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadReport {
    /// Slot state
    pub status: SlotStatus,
    /// Workouts now in the store
    pub loaded: usize,
    /// Entries dropped during reconstruction
    pub skipped: Vec<SkippedEntry>,
}

impl ReloadReport {
    const fn empty(status: SlotStatus) -> Self {
        Self {
            status,
            loaded: 0,
            skipped: Vec::new(),
        }
    }
}

/// Ordered workout collection persisted to a single slot.
///
/// ## Design
///
/// Workouts are kept in insertion order (oldest first), which is also the
/// render order and the order written to the slot. Lookups by id are a
/// linear scan; a hand-entered log stays small enough for that.
///
/// ## Example
///
/// ```rust
/// use trailmark::kv::MemoryKvStore;
/// use trailmark::store::WorkoutStore;
/// use trailmark::workout::{Activity, Coordinates, Workout};
///
/// # fn example() -> trailmark::Result<()> {
/// let mut store = WorkoutStore::new(MemoryKvStore::new());
/// store.add(Workout::new(
///     "1",
///     Coordinates::new(55.75, 37.61),
///     5.0,
///     25.0,
///     Activity::Running { cadence: 170 },
/// ));
/// store.persist()?;
///
/// store.reload();
/// assert_eq!(store.list().len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct WorkoutStore<S: KvStore> {
    kv: S,
    slot: String,
    locale: Locale,
    zone: CalendarZone,
    workouts: Vec<Workout>,
}

impl<S: KvStore> WorkoutStore<S> {
    /// Create an empty store over `kv` using the default slot and locale.
    ///
    /// Nothing is read until [`reload`](Self::reload) is called.
    #[must_use]
    pub fn new(kv: S) -> Self {
        Self::with_slot(kv, DEFAULT_SLOT)
    }

    /// Create an empty store persisting to `slot`.
    #[must_use]
    pub fn with_slot(kv: S, slot: impl Into<String>) -> Self {
        Self {
            kv,
            slot: slot.into(),
            locale: Locale::default(),
            zone: CalendarZone::default(),
            workouts: Vec::new(),
        }
    }

    /// Set the locale used to rebuild descriptions on reload.
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Set the zone whose calendar day reloaded descriptions carry.
    #[must_use]
    pub fn with_calendar_zone(mut self, zone: CalendarZone) -> Self {
        self.zone = zone;
        self
    }

    /// Description locale.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Description calendar zone.
    #[must_use]
    pub const fn calendar_zone(&self) -> CalendarZone {
        self.zone
    }

    /// Slot key.
    #[must_use]
    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Underlying key-value backend.
    #[must_use]
    pub const fn kv(&self) -> &S {
        &self.kv
    }

    /// Number of workouts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    /// Check if the store holds no workouts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Append a workout. Ids are not checked for duplicates.
    pub fn add(&mut self, workout: Workout) {
        debug!(id = workout.id(), kind = %workout.kind(), "workout added");
        self.workouts.push(workout);
    }

    /// All workouts, oldest first.
    #[must_use]
    pub fn list(&self) -> &[Workout] {
        &self.workouts
    }

    /// Find a workout by id.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    /// Serialized form of the current collection.
    ///
    /// # Errors
    ///
    /// Returns error if JSON encoding fails.
    pub fn snapshot(&self) -> Result<Vec<u8>> {
        codec::encode(&self.workouts)
    }

    /// Write the whole collection to the slot.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the backend rejects the write; the
    /// in-memory collection is unaffected.
    pub fn persist(&self) -> Result<()> {
        let blob = self.snapshot()?;
        let bytes = blob.len();
        self.kv.set(&self.slot, blob).map_err(|e| {
            warn!(slot = %self.slot, error = %e, "failed to persist workouts");
            e
        })?;
        debug!(slot = %self.slot, count = self.workouts.len(), bytes, "workouts persisted");
        Ok(())
    }

    /// Replace the in-memory collection with the slot contents.
    ///
    /// Each entry is dispatched on its kind, keeps its stored id and
    /// creation time, and gets a freshly computed description. Entries that
    /// cannot be rebuilt are skipped; a missing or corrupt slot leaves the
    /// store empty.
    pub fn reload(&mut self) -> ReloadReport {
        self.workouts.clear();

        let bytes = match self.kv.get(&self.slot) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(slot = %self.slot, "no persisted workouts");
                return ReloadReport::empty(SlotStatus::Absent);
            }
            Err(e) => {
                warn!(slot = %self.slot, error = %e, "workout slot unreadable, starting empty");
                return ReloadReport::empty(SlotStatus::Unavailable(e.to_string()));
            }
        };

        let decoded = match codec::decode(&bytes, self.locale, self.zone) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!(slot = %self.slot, error = %e, "workout slot corrupt, starting empty");
                return ReloadReport::empty(SlotStatus::Corrupt(e.to_string()));
            }
        };

        for skipped in &decoded.skipped {
            warn!(
                slot = %self.slot,
                index = skipped.index,
                reason = %skipped.reason,
                "skipping persisted workout"
            );
        }

        self.workouts = decoded.workouts;
        info!(
            slot = %self.slot,
            loaded = self.workouts.len(),
            skipped = decoded.skipped.len(),
            "workouts reloaded"
        );

        ReloadReport {
            status: SlotStatus::Loaded,
            loaded: self.workouts.len(),
            skipped: decoded.skipped,
        }
    }

    /// Drop every workout, in memory and in the slot.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the slot cannot be deleted; memory is
    /// cleared regardless.
    pub fn clear(&mut self) -> Result<()> {
        self.workouts.clear();
        self.kv.delete(&self.slot)?;
        info!(slot = %self.slot, "workouts cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKvStore;
    use crate::workout::{Activity, Coordinates};

    fn run(id: &str) -> Workout {
        Workout::new(
            id,
            Coordinates::new(55.75, 37.61),
            5.0,
            25.0,
            Activity::Running { cadence: 170 },
        )
    }

    #[test]
    fn test_store_default() {
        let store = WorkoutStore::new(MemoryKvStore::new());
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.slot(), DEFAULT_SLOT);
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut store = WorkoutStore::new(MemoryKvStore::new());
        store.add(run("b"));
        store.add(run("a"));
        store.add(run("c"));

        let ids: Vec<&str> = store.list().iter().map(Workout::id).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_find_by_id() {
        let mut store = WorkoutStore::new(MemoryKvStore::new());
        store.add(run("1"));
        store.add(run("2"));

        assert_eq!(store.find_by_id("2").map(Workout::id), Some("2"));
        assert!(store.find_by_id("3").is_none());
    }

    #[test]
    fn test_reload_absent_slot() {
        let mut store = WorkoutStore::new(MemoryKvStore::new());
        store.add(run("1"));

        let report = store.reload();

        assert_eq!(report.status, SlotStatus::Absent);
        assert!(store.is_empty());
    }

    #[test]
    fn test_reload_corrupt_slot() {
        let kv = MemoryKvStore::new();
        kv.set(DEFAULT_SLOT, b"not json".to_vec()).unwrap();
        let mut store = WorkoutStore::new(kv);

        let report = store.reload();

        assert!(matches!(report.status, SlotStatus::Corrupt(_)));
        assert_eq!(report.loaded, 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_removes_slot() {
        let mut store = WorkoutStore::with_slot(MemoryKvStore::new(), "log");
        store.add(run("1"));
        store.persist().unwrap();
        assert!(store.kv().exists("log").unwrap());

        store.clear().unwrap();

        assert!(store.is_empty());
        assert!(!store.kv().exists("log").unwrap());
    }
}
