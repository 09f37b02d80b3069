//! Tracker configuration

use std::env;
use std::path::PathBuf;

use serde::Deserialize;

use crate::store::DEFAULT_SLOT;
use crate::workout::{CalendarZone, Locale};

/// Where and how workouts are kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Key of the slot holding the serialized collection
    pub slot: String,
    /// Language for descriptions and rendered units
    pub locale: Locale,
    /// Directory for `FileKvStore`; `None` keeps workouts in memory only
    pub data_dir: Option<PathBuf>,
    /// Minutes east of UTC for description dates; `None` uses the host zone
    pub utc_offset_minutes: Option<i32>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            slot: DEFAULT_SLOT.to_string(),
            locale: Locale::default(),
            data_dir: None,
            utc_offset_minutes: None,
        }
    }
}

impl TrackerConfig {
    /// Create a config builder
    #[must_use]
    pub fn builder() -> TrackerConfigBuilder {
        TrackerConfigBuilder::default()
    }

    /// Zone whose calendar day names workouts.
    ///
    /// An offset outside ±24h falls back to the host zone.
    #[must_use]
    pub fn calendar_zone(&self) -> CalendarZone {
        self.utc_offset_minutes
            .and_then(CalendarZone::east_minutes)
            .unwrap_or_default()
    }

    /// Read `TRAILMARK_SLOT`, `TRAILMARK_LOCALE`, `TRAILMARK_DATA_DIR` and
    /// `TRAILMARK_UTC_OFFSET_MINUTES`, falling back to defaults for anything
    /// unset or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let slot = env::var("TRAILMARK_SLOT")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.slot);
        let locale = env::var("TRAILMARK_LOCALE")
            .ok()
            .and_then(|tag| Locale::parse(&tag))
            .unwrap_or(defaults.locale);
        let data_dir = env::var_os("TRAILMARK_DATA_DIR").map(PathBuf::from);
        let utc_offset_minutes = env::var("TRAILMARK_UTC_OFFSET_MINUTES")
            .ok()
            .and_then(|m| m.trim().parse().ok());

        Self {
            slot,
            locale,
            data_dir,
            utc_offset_minutes,
        }
    }
}

/// Builder for `TrackerConfig`.
#[derive(Debug, Default)]
pub struct TrackerConfigBuilder {
    config: TrackerConfig,
}

impl TrackerConfigBuilder {
    /// Set the slot key
    #[must_use]
    pub fn slot(mut self, slot: impl Into<String>) -> Self {
        self.config.slot = slot.into();
        self
    }

    /// Set the locale
    #[must_use]
    pub const fn locale(mut self, locale: Locale) -> Self {
        self.config.locale = locale;
        self
    }

    /// Persist under `dir`
    #[must_use]
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.data_dir = Some(dir.into());
        self
    }

    /// Date descriptions `minutes` east of UTC
    #[must_use]
    pub const fn utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.config.utc_offset_minutes = Some(minutes);
        self
    }

    /// Build the config
    #[must_use]
    pub fn build(self) -> TrackerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::default();
        assert_eq!(config.slot, "workouts");
        assert_eq!(config.locale, Locale::En);
        assert!(config.data_dir.is_none());
        assert_eq!(config.calendar_zone(), CalendarZone::Local);
    }

    #[test]
    fn test_builder_chain() {
        let config = TrackerConfig::builder()
            .slot("log")
            .locale(Locale::Ru)
            .data_dir("/tmp/trailmark")
            .build();

        assert_eq!(config.slot, "log");
        assert_eq!(config.locale, Locale::Ru);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/trailmark")));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: TrackerConfig = serde_json::from_str(r#"{"locale":"ru"}"#).unwrap();
        assert_eq!(config.locale, Locale::Ru);
        assert_eq!(config.slot, "workouts");
    }

    #[test]
    fn test_calendar_zone_from_offset() {
        let moscow = TrackerConfig::builder().utc_offset_minutes(180).build();
        assert_eq!(moscow.calendar_zone(), CalendarZone::east_minutes(180).unwrap());

        let out_of_range = TrackerConfig::builder().utc_offset_minutes(100_000).build();
        assert_eq!(out_of_range.calendar_zone(), CalendarZone::Local);

        let config: TrackerConfig =
            serde_json::from_str(r#"{"utc_offset_minutes":-300}"#).unwrap();
        assert_eq!(config.calendar_zone(), CalendarZone::east_minutes(-300).unwrap());
    }
}
