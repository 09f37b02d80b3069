//! Raw form input and its validation
//!
//! The model layer trusts its inputs; everything that reaches
//! [`Workout`](crate::workout::Workout) passes through here first, whether
//! it came from the form or from a persisted slot.

use crate::error::InputField;
use crate::workout::{Activity, Coordinates, WorkoutKind};
use crate::{Error, Result};

/// Field values exactly as the input source supplied them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawWorkoutInput {
    /// `"running"` or `"cycling"`
    pub kind: String,
    /// Clicked map position, if the source provides one
    pub coordinates: Option<[f64; 2]>,
    /// Distance text (km)
    pub distance: String,
    /// Duration text (minutes)
    pub duration: String,
    /// Cadence (running) or elevation gain (cycling) text
    pub extra: String,
}

impl RawWorkoutInput {
    /// Build an input from already-numeric values.
    #[must_use]
    pub fn numeric(
        kind: WorkoutKind,
        coordinates: [f64; 2],
        distance: f64,
        duration: f64,
        extra: f64,
    ) -> Self {
        Self {
            kind: kind.as_str().to_string(),
            coordinates: Some(coordinates),
            distance: distance.to_string(),
            duration: duration.to_string(),
            extra: extra.to_string(),
        }
    }

    /// Same input with coordinates filled in when the source left them out.
    #[must_use]
    pub fn or_coordinates(mut self, fallback: Option<Coordinates>) -> Self {
        if self.coordinates.is_none() {
            self.coordinates = fallback.map(Into::into);
        }
        self
    }
}

/// Input that passed validation; safe to hand to the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidInput {
    /// Where the session took place
    pub coordinates: Coordinates,
    /// Kilometers, > 0
    pub distance: f64,
    /// Minutes, > 0
    pub duration: f64,
    /// Kind-specific payload
    pub activity: Activity,
}

/// Parse a numeric text field. Blank text is not a number.
#[must_use]
pub fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok()
}

/// Finite and strictly positive.
#[must_use]
pub fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Cadence as a whole number of steps per minute.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn cadence_from(value: f64) -> Option<u32> {
    (is_positive(value) && value.fract() == 0.0 && value <= f64::from(u32::MAX))
        .then(|| value as u32)
}

/// Elevation gain may be zero (flat ride) but never negative.
#[must_use]
pub fn is_valid_elevation(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Fields of an already-typed workout that break the record invariants.
#[must_use]
pub fn invalid_measurements(
    coordinates: Coordinates,
    distance: f64,
    duration: f64,
    activity: Activity,
) -> Vec<InputField> {
    let mut fields = Vec::new();
    if !coordinates.is_valid() {
        fields.push(InputField::Coordinates);
    }
    if !is_positive(distance) {
        fields.push(InputField::Distance);
    }
    if !is_positive(duration) {
        fields.push(InputField::Duration);
    }
    match activity {
        Activity::Running { cadence } if cadence == 0 => fields.push(InputField::Cadence),
        Activity::Cycling { elevation_gain } if !is_valid_elevation(elevation_gain) => {
            fields.push(InputField::ElevationGain);
        }
        _ => {}
    }
    fields
}

/// Validate raw form values, collecting every failed field.
///
/// # Errors
///
/// Returns `Error::Validation` naming each field that is missing,
/// non-numeric, non-finite or out of range.
pub fn validate(input: &RawWorkoutInput) -> Result<ValidInput> {
    let mut fields = Vec::new();

    let kind = input.kind.parse::<WorkoutKind>().ok();
    if kind.is_none() {
        fields.push(InputField::Kind);
    }

    let coordinates = input
        .coordinates
        .map(Coordinates::from)
        .filter(Coordinates::is_valid);
    if coordinates.is_none() {
        fields.push(InputField::Coordinates);
    }

    let distance = parse_number(&input.distance).filter(|v| is_positive(*v));
    if distance.is_none() {
        fields.push(InputField::Distance);
    }

    let duration = parse_number(&input.duration).filter(|v| is_positive(*v));
    if duration.is_none() {
        fields.push(InputField::Duration);
    }

    let extra = parse_number(&input.extra);
    let activity = match kind {
        Some(WorkoutKind::Running) => {
            let cadence = extra.and_then(cadence_from);
            if cadence.is_none() {
                fields.push(InputField::Cadence);
            }
            cadence.map(|cadence| Activity::Running { cadence })
        }
        Some(WorkoutKind::Cycling) => {
            let gain = extra.filter(|v| is_valid_elevation(*v));
            if gain.is_none() {
                fields.push(InputField::ElevationGain);
            }
            gain.map(|elevation_gain| Activity::Cycling { elevation_gain })
        }
        None => None,
    };

    match (coordinates, distance, duration, activity) {
        (Some(coordinates), Some(distance), Some(duration), Some(activity)) if fields.is_empty() => {
            Ok(ValidInput {
                coordinates,
                distance,
                duration,
                activity,
            })
        }
        _ => Err(Error::Validation { fields }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(distance: &str, duration: &str, cadence: &str) -> RawWorkoutInput {
        RawWorkoutInput {
            kind: "running".into(),
            coordinates: Some([55.75, 37.61]),
            distance: distance.into(),
            duration: duration.into(),
            extra: cadence.into(),
        }
    }

    #[test]
    fn test_valid_running() {
        let valid = validate(&running("5.2", "24", "178")).unwrap();
        assert_eq!(valid.activity, Activity::Running { cadence: 178 });
        assert!((valid.distance - 5.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_zero_negative_nan() {
        let err = validate(&running("0", "-5", "NaN")).unwrap_err();
        assert_eq!(
            err.invalid_fields(),
            &[InputField::Distance, InputField::Duration, InputField::Cadence]
        );
    }

    #[test]
    fn test_rejects_non_numeric_and_blank() {
        let err = validate(&running("five", "", "178")).unwrap_err();
        assert_eq!(
            err.invalid_fields(),
            &[InputField::Distance, InputField::Duration]
        );
    }

    #[test]
    fn test_rejects_infinite_and_fractional_cadence() {
        let err = validate(&running("inf", "30", "170.5")).unwrap_err();
        assert_eq!(
            err.invalid_fields(),
            &[InputField::Distance, InputField::Cadence]
        );
    }

    #[test]
    fn test_cycling_allows_zero_elevation() {
        let input = RawWorkoutInput {
            kind: "cycling".into(),
            coordinates: Some([48.85, 2.35]),
            distance: "20".into(),
            duration: "60".into(),
            extra: "0".into(),
        };
        let valid = validate(&input).unwrap();
        assert_eq!(valid.activity, Activity::Cycling { elevation_gain: 0.0 });

        let negative = RawWorkoutInput {
            extra: "-1".into(),
            ..input
        };
        assert_eq!(
            validate(&negative).unwrap_err().invalid_fields(),
            &[InputField::ElevationGain]
        );
    }

    #[test]
    fn test_unknown_kind_and_missing_coordinates() {
        let input = RawWorkoutInput {
            kind: "skiing".into(),
            coordinates: None,
            distance: "10".into(),
            duration: "60".into(),
            extra: "1".into(),
        };
        assert_eq!(
            validate(&input).unwrap_err().invalid_fields(),
            &[InputField::Kind, InputField::Coordinates]
        );
    }

    #[test]
    fn test_or_coordinates_only_fills_missing() {
        let fallback = Some(Coordinates::new(1.0, 2.0));

        let filled = RawWorkoutInput::default().or_coordinates(fallback);
        assert_eq!(filled.coordinates, Some([1.0, 2.0]));

        let kept = running("1", "1", "1").or_coordinates(fallback);
        assert_eq!(kept.coordinates, Some([55.75, 37.61]));
    }

    #[test]
    fn test_invalid_measurements() {
        let fields = invalid_measurements(
            Coordinates::new(0.0, 0.0),
            -1.0,
            10.0,
            Activity::Running { cadence: 0 },
        );
        assert_eq!(fields, vec![InputField::Distance, InputField::Cadence]);
    }
}
