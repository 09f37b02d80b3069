//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use trailmark::kv::KvStore;
use trailmark::render::{AlertSink, ListEntry, ListSink, MapSink};
use trailmark::workout::{Coordinates, ManualClock};
use trailmark::{Error, Result};

/// Everything the sinks were asked to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Marker {
        at: Coordinates,
        label: String,
        text: String,
    },
    PanTo(Coordinates),
    Entry(ListEntry),
    Alert(String),
}

/// One recorder standing in for map, list and alert widgets.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<SinkEvent>>>,
}

impl Recorder {
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Alert(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn entries(&self) -> Vec<ListEntry> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Entry(entry) => Some(entry),
                _ => None,
            })
            .collect()
    }

    pub fn markers(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, SinkEvent::Marker { .. }))
            .count()
    }

    fn push(&self, event: SinkEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl MapSink for Recorder {
    fn place_marker(&mut self, coordinates: Coordinates, label: &str, rich_text: &str) {
        self.push(SinkEvent::Marker {
            at: coordinates,
            label: label.to_string(),
            text: rich_text.to_string(),
        });
    }

    fn pan_to(&mut self, coordinates: Coordinates) {
        self.push(SinkEvent::PanTo(coordinates));
    }
}

impl ListSink for Recorder {
    fn render_entry(&mut self, entry: &ListEntry) {
        self.push(SinkEvent::Entry(entry.clone()));
    }
}

impl AlertSink for Recorder {
    fn alert(&mut self, message: &str) {
        self.push(SinkEvent::Alert(message.to_string()));
    }
}

/// Backend whose every call fails.
#[derive(Debug, Default)]
pub struct BrokenKvStore;

impl KvStore for BrokenKvStore {
    fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Err(Error::StorageUnavailable("quota exceeded".into()))
    }

    fn set(&self, _key: &str, _value: Vec<u8>) -> Result<()> {
        Err(Error::StorageUnavailable("quota exceeded".into()))
    }

    fn delete(&self, _key: &str) -> Result<()> {
        Err(Error::StorageUnavailable("quota exceeded".into()))
    }
}

/// Clock pinned to 2026-10-18 09:30 UTC.
pub fn fixed_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap(),
    ))
}

pub const MOSCOW: [f64; 2] = [55.75, 37.61];
