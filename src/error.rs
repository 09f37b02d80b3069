//! Error types for trailmark
//!
//! Every variant is recoverable: nothing in this crate should take the host
//! process down.

use std::fmt;

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Input field named in a [`Error::Validation`] failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    /// Workout kind selector
    Kind,
    /// Map coordinates of the session
    Coordinates,
    /// Distance in kilometers
    Distance,
    /// Duration in minutes
    Duration,
    /// Running cadence in steps per minute
    Cadence,
    /// Cycling elevation gain in meters
    ElevationGain,
}

impl InputField {
    /// Field name as shown to the user.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Kind => "kind",
            Self::Coordinates => "coordinates",
            Self::Distance => "distance",
            Self::Duration => "duration",
            Self::Cadence => "cadence",
            Self::ElevationGain => "elevation gain",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn join_fields(fields: &[InputField]) -> String {
    fields
        .iter()
        .map(InputField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Trailmark error types
#[derive(Error, Debug)]
pub enum Error {
    /// One or more raw input fields failed validation
    #[error("Invalid input: {}\nDistance, duration and cadence must be positive numbers; elevation gain must not be negative", join_fields(.fields))]
    Validation {
        /// Every field that failed, in form order
        fields: Vec<InputField>,
    },

    /// A persisted blob or entry could not be turned back into a workout
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Unrecognized workout kind discriminator
    #[error("Unknown workout kind: {0:?}")]
    UnknownKind(String),

    /// The key-value slot could not be read or written
    #[error("Storage unavailable: {0}\nWorkouts are kept in memory but were not saved")]
    StorageUnavailable(String),

    /// No reference location has arrived yet, so nothing can be placed on the map
    #[error("Location unavailable: no reference coordinates received yet")]
    LocationUnavailable,

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Fields named by a validation failure, empty for every other variant.
    #[must_use]
    pub fn invalid_fields(&self) -> &[InputField] {
        match self {
            Self::Validation { fields } => fields,
            _ => &[],
        }
    }
}
