//! Slot blob format
//!
//! The slot holds a JSON array of flat entries:
//!
//! ```json
//! [{"kind":"running","id":"0781234567","createdAt":"2026-10-18T09:30:00Z",
//!   "coordinates":[55.75,37.61],"distance":5.2,"duration":24.0,"cadence":178}]
//! ```
//!
//! Pace, speed and description are never written. On the way back in,
//! entries written by the older browser build (`type`, `date`, `coords`,
//! `elevation`, plus derived fields) are accepted too.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validate::{cadence_from, invalid_measurements};
use crate::workout::{Activity, CalendarZone, Coordinates, Locale, Workout, WorkoutKind};
use crate::{Error, Result};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EntryOut<'a> {
    kind: WorkoutKind,
    id: &'a str,
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    distance: f64,
    duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    cadence: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elevation_gain: Option<f64>,
}

impl<'a> From<&'a Workout> for EntryOut<'a> {
    fn from(w: &'a Workout) -> Self {
        Self {
            kind: w.kind(),
            id: w.id(),
            created_at: w.created_at(),
            coordinates: w.coordinates(),
            distance: w.distance(),
            duration: w.duration(),
            cadence: w.cadence(),
            elevation_gain: w.elevation_gain(),
        }
    }
}

/// Creation time as RFC 3339 text or epoch milliseconds.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredTimestamp {
    Rfc3339(DateTime<Utc>),
    Millis(i64),
}

impl StoredTimestamp {
    fn into_datetime(self) -> Result<DateTime<Utc>> {
        match self {
            Self::Rfc3339(at) => Ok(at),
            Self::Millis(ms) => DateTime::from_timestamp_millis(ms)
                .ok_or_else(|| Error::Deserialization(format!("timestamp {ms} out of range"))),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntryIn {
    id: String,
    #[serde(alias = "date")]
    created_at: StoredTimestamp,
    #[serde(alias = "coords")]
    coordinates: Coordinates,
    distance: f64,
    duration: f64,
    cadence: Option<f64>,
    #[serde(alias = "elevation")]
    elevation_gain: Option<f64>,
}

/// An entry that could not be rebuilt, with its position in the blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Zero-based index in the persisted array
    pub index: usize,
    /// Why it was dropped
    pub reason: String,
}

/// Result of decoding a whole blob.
#[derive(Debug, Default)]
pub(crate) struct Decoded {
    pub workouts: Vec<Workout>,
    pub skipped: Vec<SkippedEntry>,
}

/// Serialize workouts in collection order.
pub(crate) fn encode(workouts: &[Workout]) -> Result<Vec<u8>> {
    let entries: Vec<EntryOut<'_>> = workouts.iter().map(EntryOut::from).collect();
    Ok(serde_json::to_vec(&entries)?)
}

/// Decode a blob, skipping entries that cannot be rebuilt.
///
/// Fails only when the blob itself is not a JSON array.
pub(crate) fn decode(bytes: &[u8], locale: Locale, zone: CalendarZone) -> Result<Decoded> {
    let entries: Vec<Value> = serde_json::from_slice(bytes)
        .map_err(|e| Error::Deserialization(format!("slot is not a JSON array: {e}")))?;

    let mut decoded = Decoded::default();
    for (index, entry) in entries.into_iter().enumerate() {
        match decode_entry(entry, locale, zone) {
            Ok(workout) => decoded.workouts.push(workout),
            Err(e) => decoded.skipped.push(SkippedEntry {
                index,
                reason: e.to_string(),
            }),
        }
    }
    Ok(decoded)
}

fn decode_entry(entry: Value, locale: Locale, zone: CalendarZone) -> Result<Workout> {
    let kind = entry
        .get("kind")
        .or_else(|| entry.get("type"))
        .and_then(Value::as_str)
        .ok_or_else(|| Error::Deserialization("entry has no kind".to_string()))?
        .parse::<WorkoutKind>()?;

    let raw: EntryIn =
        serde_json::from_value(entry).map_err(|e| Error::Deserialization(e.to_string()))?;

    let activity = match kind {
        WorkoutKind::Running => {
            let cadence = raw
                .cadence
                .ok_or_else(|| Error::Deserialization("running entry has no cadence".into()))?;
            Activity::Running {
                cadence: cadence_from(cadence).unwrap_or(0),
            }
        }
        WorkoutKind::Cycling => Activity::Cycling {
            elevation_gain: raw.elevation_gain.ok_or_else(|| {
                Error::Deserialization("cycling entry has no elevation gain".into())
            })?,
        },
    };

    let invalid = invalid_measurements(raw.coordinates, raw.distance, raw.duration, activity);
    if !invalid.is_empty() {
        return Err(Error::Deserialization(format!(
            "entry {} has invalid {}",
            raw.id,
            invalid
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }

    Ok(
        Workout::builder(raw.id, raw.coordinates, raw.distance, raw.duration, activity)
            .created_at(raw.created_at.into_datetime()?)
            .locale(locale)
            .calendar_zone(zone)
            .build(),
    )
}
