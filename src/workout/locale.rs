//! Locale tables for descriptions and render labels

use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

use super::WorkoutKind;

/// Time zone whose calendar day names a workout.
///
/// Timestamps are always stored in UTC; only the description's month, day
/// and year are read in this zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarZone {
    /// The host's local time zone, with daylight saving resolved per instant.
    #[default]
    Local,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl CalendarZone {
    /// Zero offset.
    #[must_use]
    pub fn utc() -> Self {
        Self::Fixed(Utc.fix())
    }

    /// Fixed zone `minutes` east of UTC, `None` outside ±24h.
    #[must_use]
    pub fn east_minutes(minutes: i32) -> Option<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::Fixed)
    }

    /// Calendar date of `at` in this zone.
    #[must_use]
    pub fn date_of(self, at: DateTime<Utc>) -> NaiveDate {
        match self {
            Self::Local => at.with_timezone(&Local).date_naive(),
            Self::Fixed(offset) => at.with_timezone(&offset).date_naive(),
        }
    }
}

/// Presentation language for descriptions and rendered units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English (default)
    #[default]
    En,
    /// Russian
    Ru,
}

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_RU: [&str; 12] = [
    "Январь",
    "Февраль",
    "Март",
    "Апрель",
    "Май",
    "Июнь",
    "Июль",
    "Август",
    "Сентябрь",
    "Октябрь",
    "Ноябрь",
    "Декабрь",
];

/// Unit and caption strings for one locale.
#[derive(Debug, Clone, Copy)]
pub struct Units {
    /// Distance unit
    pub km: &'static str,
    /// Duration unit
    pub min: &'static str,
    /// Pace unit
    pub min_per_km: &'static str,
    /// Speed unit
    pub km_per_h: &'static str,
    /// Cadence unit
    pub steps_per_min: &'static str,
    /// Elevation unit
    pub meters: &'static str,
    /// "Distance" caption
    pub distance: &'static str,
    /// "Duration" caption
    pub duration: &'static str,
    /// "Pace" caption
    pub pace: &'static str,
    /// "Speed" caption
    pub speed: &'static str,
}

impl Locale {
    /// Parse a locale tag such as `"en"` or `"ru-RU"`.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        let lang = tag.trim().split(['-', '_']).next()?.to_ascii_lowercase();
        match lang.as_str() {
            "en" => Some(Self::En),
            "ru" => Some(Self::Ru),
            _ => None,
        }
    }

    /// Month name for a 1-based month number.
    #[must_use]
    pub fn month_name(self, month: u32) -> &'static str {
        let table = match self {
            Self::En => &MONTHS_EN,
            Self::Ru => &MONTHS_RU,
        };
        let idx = usize::try_from(month.clamp(1, 12) - 1).unwrap_or(0);
        table[idx]
    }

    /// Human label for a workout kind.
    #[must_use]
    pub const fn kind_label(self, kind: WorkoutKind) -> &'static str {
        match (self, kind) {
            (Self::En, WorkoutKind::Running) => "Running",
            (Self::En, WorkoutKind::Cycling) => "Cycling",
            (Self::Ru, WorkoutKind::Running) => "Бег",
            (Self::Ru, WorkoutKind::Cycling) => "Велосипед",
        }
    }

    /// Units and captions used by the render layer.
    #[must_use]
    pub const fn units(self) -> Units {
        match self {
            Self::En => Units {
                km: "km",
                min: "min",
                min_per_km: "min/km",
                km_per_h: "km/h",
                steps_per_min: "spm",
                meters: "m",
                distance: "Distance",
                duration: "Duration",
                pace: "Pace",
                speed: "Speed",
            },
            Self::Ru => Units {
                km: "км",
                min: "мин",
                min_per_km: "мин/км",
                km_per_h: "км/ч",
                steps_per_min: "шаг/мин",
                meters: "м",
                distance: "Дистанция",
                duration: "Продолжительность",
                pace: "Темп",
                speed: "Скорость",
            },
        }
    }

    /// `"<Label> <Month> <day>, <year>"` for a workout created at `at`,
    /// dated in `zone`.
    #[must_use]
    pub fn describe(self, kind: WorkoutKind, at: DateTime<Utc>, zone: CalendarZone) -> String {
        let day = zone.date_of(at);
        format!(
            "{} {} {}, {}",
            self.kind_label(kind),
            self.month_name(day.month()),
            day.day(),
            day.year()
        )
    }
}
