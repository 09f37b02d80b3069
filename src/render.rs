//! Render sinks and the text they are fed
//!
//! The map widget, the workout list and the alert box live outside this
//! crate. They are reached through the sink traits below; this module
//! also builds the strings they display so every frontend shows the same
//! numbers.

use crate::workout::{Coordinates, Locale, Metric, Workout, WorkoutKind};

/// Map widget.
pub trait MapSink {
    /// Drop a marker with a short hover `label` and a longer `rich_text` body.
    fn place_marker(&mut self, coordinates: Coordinates, label: &str, rich_text: &str);

    /// Center the map on `coordinates`.
    fn pan_to(&mut self, coordinates: Coordinates);
}

/// Workout list.
pub trait ListSink {
    /// Render one entry; called in store order.
    fn render_entry(&mut self, entry: &ListEntry);
}

/// User-facing notification channel.
pub trait AlertSink {
    /// Show a message.
    fn alert(&mut self, message: &str);
}

/// Icon shown next to a workout.
#[must_use]
pub const fn icon(kind: WorkoutKind) -> &'static str {
    match kind {
        WorkoutKind::Running => "🏃‍♂️",
        WorkoutKind::Cycling => "🚴‍♀️",
    }
}

/// One `value unit` line of a list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    /// Icon glyph
    pub icon: &'static str,
    /// Formatted number
    pub value: String,
    /// Unit suffix
    pub unit: &'static str,
}

/// View model for one row of the workout list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// Workout id, used to map clicks back to [`locate`](crate::controller::WorkoutController::locate)
    pub id: String,
    /// Kind, for per-kind styling
    pub kind: WorkoutKind,
    /// Title line, the workout's description
    pub title: String,
    /// Distance, duration, metric, then cadence or elevation
    pub details: Vec<Detail>,
}

impl ListEntry {
    /// Build the list row for `workout`.
    #[must_use]
    pub fn new(workout: &Workout, locale: Locale) -> Self {
        let units = locale.units();
        let mut details = vec![
            Detail {
                icon: icon(workout.kind()),
                value: workout.distance().to_string(),
                unit: units.km,
            },
            Detail {
                icon: "⏱",
                value: workout.duration().to_string(),
                unit: units.min,
            },
        ];

        let metric = match workout.metric() {
            Metric::Pace(v) => (v, units.min_per_km),
            Metric::Speed(v) => (v, units.km_per_h),
        };
        details.push(Detail {
            icon: "⚡️",
            value: format!("{:.1}", metric.0),
            unit: metric.1,
        });

        if let Some(cadence) = workout.cadence() {
            details.push(Detail {
                icon: "🦶🏼",
                value: cadence.to_string(),
                unit: units.steps_per_min,
            });
        }
        if let Some(gain) = workout.elevation_gain() {
            details.push(Detail {
                icon: "⛰",
                value: gain.to_string(),
                unit: units.meters,
            });
        }

        Self {
            id: workout.id().to_string(),
            kind: workout.kind(),
            title: workout.description().to_string(),
            details,
        }
    }
}

/// Hover label for a map marker.
#[must_use]
pub fn marker_label(workout: &Workout) -> &str {
    workout.description()
}

/// Balloon body for a map marker, one fact per line.
#[must_use]
pub fn marker_text(workout: &Workout, locale: Locale) -> String {
    let units = locale.units();
    let metric = match workout.metric() {
        Metric::Pace(v) => format!("{}: {v:.1} {}", units.pace, units.min_per_km),
        Metric::Speed(v) => format!("{}: {v:.1} {}", units.speed, units.km_per_h),
    };
    format!(
        "{} {}\n{}: {} {}\n{}: {} {}\n{metric}",
        icon(workout.kind()),
        workout.description(),
        units.distance,
        workout.distance(),
        units.km,
        units.duration,
        workout.duration(),
        units.min,
    )
}
