//! Workout Record - one logged running or cycling session

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CalendarZone, Locale};
use crate::Error;

/// Kind discriminator for a workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    /// Distance-based run, tracked by pace.
    Running,
    /// Ride, tracked by speed.
    Cycling,
}

impl WorkoutKind {
    /// Discriminator string as persisted (`"running"` / `"cycling"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }

    /// The other kind (form toggle).
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Running => Self::Cycling,
            Self::Cycling => Self::Running,
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "running" => Ok(Self::Running),
            "cycling" => Ok(Self::Cycling),
            _ => Err(Error::UnknownKind(s.to_string())),
        }
    }
}

/// Latitude/longitude pair, persisted as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl Coordinates {
    /// Create a coordinate pair.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components finite and inside the WGS84 ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lng]
    }
}

/// Kind-specific payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activity {
    /// Running session
    Running {
        /// Steps per minute
        cadence: u32,
    },
    /// Cycling session
    Cycling {
        /// Climb in meters
        elevation_gain: f64,
    },
}

impl Activity {
    /// Discriminator of this payload.
    #[must_use]
    pub const fn kind(&self) -> WorkoutKind {
        match self {
            Self::Running { .. } => WorkoutKind::Running,
            Self::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// Derived per-kind metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    /// Minutes per kilometer
    Pace(f64),
    /// Kilometers per hour
    Speed(f64),
}

impl Metric {
    /// Raw metric value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        match self {
            Self::Pace(v) | Self::Speed(v) => *v,
        }
    }
}

/// A logged workout.
///
/// Distance and duration must be positive (checked by the controller and
/// by reload, not here). Pace and speed are computed on every call, so
/// they can never go stale; only the description is cached.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: String,
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    distance: f64,
    duration: f64,
    activity: Activity,
    description: String,
}

impl Workout {
    /// Create a workout stamped now, described in the default locale and local calendar.
    ///
    /// # Arguments
    ///
    /// * `id` - Unique workout id
    /// * `coordinates` - Where the session took place
    /// * `distance` - Kilometers, > 0
    /// * `duration` - Minutes, > 0
    /// * `activity` - Kind-specific payload
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        coordinates: Coordinates,
        distance: f64,
        duration: f64,
        activity: Activity,
    ) -> Self {
        WorkoutBuilder::new(id, coordinates, distance, duration, activity).build()
    }

    /// Create a builder for setting the timestamp or locale.
    #[must_use]
    pub fn builder(
        id: impl Into<String>,
        coordinates: Coordinates,
        distance: f64,
        duration: f64,
        activity: Activity,
    ) -> WorkoutBuilder {
        WorkoutBuilder::new(id, coordinates, distance, duration, activity)
    }

    /// Get the workout id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Get the coordinates.
    #[must_use]
    pub const fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Distance in kilometers.
    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.distance
    }

    /// Duration in minutes.
    #[must_use]
    pub const fn duration(&self) -> f64 {
        self.duration
    }

    /// Kind-specific payload.
    #[must_use]
    pub const fn activity(&self) -> Activity {
        self.activity
    }

    /// Kind discriminator.
    #[must_use]
    pub const fn kind(&self) -> WorkoutKind {
        self.activity.kind()
    }

    /// `"<Label> <Month> <day>, <year>"` in the locale the record was built with.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Cadence for runs.
    #[must_use]
    pub const fn cadence(&self) -> Option<u32> {
        match self.activity {
            Activity::Running { cadence } => Some(cadence),
            Activity::Cycling { .. } => None,
        }
    }

    /// Elevation gain for rides.
    #[must_use]
    pub const fn elevation_gain(&self) -> Option<f64> {
        match self.activity {
            Activity::Cycling { elevation_gain } => Some(elevation_gain),
            Activity::Running { .. } => None,
        }
    }

    /// Pace in min/km for runs.
    #[must_use]
    pub fn pace(&self) -> Option<f64> {
        match self.metric() {
            Metric::Pace(v) => Some(v),
            Metric::Speed(_) => None,
        }
    }

    /// Speed in km/h for rides.
    #[must_use]
    pub fn speed(&self) -> Option<f64> {
        match self.metric() {
            Metric::Speed(v) => Some(v),
            Metric::Pace(_) => None,
        }
    }

    /// Derived metric for this kind.
    #[must_use]
    pub fn metric(&self) -> Metric {
        match self.activity {
            Activity::Running { .. } => Metric::Pace(self.duration / self.distance),
            Activity::Cycling { .. } => Metric::Speed(self.distance / (self.duration / 60.0)),
        }
    }

    /// Description rendered in another locale or calendar zone.
    #[must_use]
    pub fn describe(&self, locale: Locale, zone: CalendarZone) -> String {
        locale.describe(self.kind(), self.created_at, zone)
    }
}

/// Builder for `Workout`.
#[derive(Debug)]
pub struct WorkoutBuilder {
    id: String,
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    distance: f64,
    duration: f64,
    activity: Activity,
    locale: Locale,
    zone: CalendarZone,
}

impl WorkoutBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        coordinates: Coordinates,
        distance: f64,
        duration: f64,
        activity: Activity,
    ) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
            coordinates,
            distance,
            duration,
            activity,
            locale: Locale::default(),
            zone: CalendarZone::default(),
        }
    }

    /// Set the creation timestamp (reload keeps the stored one).
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Set the description locale.
    #[must_use]
    pub const fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Set the zone whose calendar day goes into the description.
    #[must_use]
    pub const fn calendar_zone(mut self, zone: CalendarZone) -> Self {
        self.zone = zone;
        self
    }

    /// Build the `Workout`, computing its description.
    #[must_use]
    pub fn build(self) -> Workout {
        let description = self
            .locale
            .describe(self.activity.kind(), self.created_at, self.zone);
        Workout {
            id: self.id,
            created_at: self.created_at,
            coordinates: self.coordinates,
            distance: self.distance,
            duration: self.duration,
            activity: self.activity,
            description,
        }
    }
}
